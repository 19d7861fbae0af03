use super::ActionEngine;
use crate::core::feedback::{ActionError, Feedback};

pub(crate) fn run(
    engine: &ActionEngine,
    alert_kind: Option<&str>,
    review_url: &str,
    device: Option<&str>,
    location: Option<&str>,
) -> Result<Feedback, ActionError> {
    engine
        .platform
        .open_url(review_url)
        .map_err(ActionError::Capability)?;

    let mut message = match alert_kind {
        Some(kind) => format!("Review opened for {} alert", kind),
        None => String::from("Security review opened"),
    };
    match (device, location) {
        (Some(d), Some(l)) => message.push_str(&format!(" ({} in {})", d, l)),
        (Some(d), None) => message.push_str(&format!(" ({})", d)),
        (None, Some(l)) => message.push_str(&format!(" ({})", l)),
        (None, None) => {}
    }
    Ok(Feedback::success(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZeroConfig;
    use crate::services::platform::RecordingPlatform;
    use std::sync::Arc;

    #[test]
    fn missing_details_are_omitted_not_errors() {
        let platform = Arc::new(RecordingPlatform::default());
        let engine = ActionEngine::new(platform.clone(), &ZeroConfig::default()).unwrap();

        let fb = run(&engine, None, "https://account.example.com/security", None, None).unwrap();
        assert_eq!(fb.message(), "Security review opened");

        let fb = run(
            &engine,
            Some("new sign-in"),
            "https://account.example.com/security",
            Some("Pixel 9"),
            Some("Lisbon"),
        )
        .unwrap();
        assert_eq!(
            fb.message(),
            "Review opened for new sign-in alert (Pixel 9 in Lisbon)"
        );
    }
}
