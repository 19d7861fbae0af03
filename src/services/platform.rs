use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Outcome of a single platform capability call.
pub type CapabilityResult = Result<(), String>;

/// Device capabilities the action modules call into. Injected so actions can
/// run against a real surface, a dry-run recorder, or a test fake.
pub trait Platform: Send + Sync {
    fn open_url(&self, url: &str) -> CapabilityResult;

    fn open_directions(&self, destination: &str) -> CapabilityResult;

    fn wallet_supported(&self) -> bool {
        false
    }

    fn add_wallet_pass(&self, description: &str, code: &str) -> CapabilityResult;

    fn add_calendar_event(
        &self,
        title: &str,
        start: DateTime<Utc>,
        location: Option<&str>,
    ) -> CapabilityResult;

    fn compose_message(&self, recipient: &str, body: &str) -> CapabilityResult;

    fn create_reminder(&self, title: &str, due: DateTime<Utc>) -> CapabilityResult;

    fn share_text(&self, text: &str) -> CapabilityResult;
}

/// Desktop surface: URL-shaped capabilities go through the configured browser
/// command; capabilities with no desktop equivalent are logged and succeed,
/// except Wallet which is reported unsupported.
pub struct DesktopPlatform {
    browser_command: String,
}

impl DesktopPlatform {
    pub fn new(browser_command: &str) -> Self {
        Self {
            browser_command: browser_command.to_string(),
        }
    }

    fn spawn_browser(&self, url: &str) -> CapabilityResult {
        std::process::Command::new(&self.browser_command)
            .arg(url)
            .spawn()
            .map(|_| ())
            .map_err(|e| format!("Failed to open URL: {}", e))
    }
}

impl Platform for DesktopPlatform {
    fn open_url(&self, url: &str) -> CapabilityResult {
        self.spawn_browser(url)
    }

    fn open_directions(&self, destination: &str) -> CapabilityResult {
        let query = destination.replace(' ', "+");
        self.spawn_browser(&format!(
            "https://www.google.com/maps/dir/?api=1&destination={}",
            query
        ))
    }

    fn add_wallet_pass(&self, _description: &str, _code: &str) -> CapabilityResult {
        Err("Wallet is not supported on this device".to_string())
    }

    fn add_calendar_event(
        &self,
        title: &str,
        start: DateTime<Utc>,
        location: Option<&str>,
    ) -> CapabilityResult {
        log::info!(
            "Calendar event: '{}' at {}{}",
            title,
            start.format("%Y-%m-%d %H:%M"),
            location.map(|l| format!(" ({})", l)).unwrap_or_default()
        );
        Ok(())
    }

    fn compose_message(&self, recipient: &str, body: &str) -> CapabilityResult {
        self.spawn_browser(&format!(
            "mailto:{}?body={}",
            recipient,
            body.replace(' ', "%20")
        ))
    }

    fn create_reminder(&self, title: &str, due: DateTime<Utc>) -> CapabilityResult {
        log::info!("Reminder: '{}' due {}", title, due.format("%Y-%m-%d %H:%M"));
        Ok(())
    }

    fn share_text(&self, text: &str) -> CapabilityResult {
        log::info!("Share: {}", text);
        Ok(())
    }
}

/// Records every capability call instead of performing it. Backs `--dry-run`
/// and the engine tests.
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<String>>,
    pub wallet: bool,
}

impl RecordingPlatform {
    pub fn with_wallet() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            wallet: true,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, entry: String) -> CapabilityResult {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(entry);
        }
        Ok(())
    }
}

impl Platform for RecordingPlatform {
    fn open_url(&self, url: &str) -> CapabilityResult {
        self.record(format!("open_url {}", url))
    }

    fn open_directions(&self, destination: &str) -> CapabilityResult {
        self.record(format!("open_directions {}", destination))
    }

    fn wallet_supported(&self) -> bool {
        self.wallet
    }

    fn add_wallet_pass(&self, description: &str, code: &str) -> CapabilityResult {
        if !self.wallet {
            return Err("Wallet is not supported on this device".to_string());
        }
        self.record(format!("add_wallet_pass {} ({})", description, code))
    }

    fn add_calendar_event(
        &self,
        title: &str,
        start: DateTime<Utc>,
        location: Option<&str>,
    ) -> CapabilityResult {
        self.record(format!(
            "add_calendar_event {} at {}{}",
            title,
            start.format("%Y-%m-%dT%H:%M"),
            location.map(|l| format!(" ({})", l)).unwrap_or_default()
        ))
    }

    fn compose_message(&self, recipient: &str, body: &str) -> CapabilityResult {
        self.record(format!("compose_message to {}: {}", recipient, body))
    }

    fn create_reminder(&self, title: &str, due: DateTime<Utc>) -> CapabilityResult {
        self.record(format!("create_reminder {} due {}", title, due.format("%Y-%m-%d")))
    }

    fn share_text(&self, text: &str) -> CapabilityResult {
        self.record(format!("share_text {}", text))
    }
}
