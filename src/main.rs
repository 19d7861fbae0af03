#![allow(dead_code)]

use std::sync::Arc;

use zero_actions::config::ZeroConfig;
use zero_actions::core::card::{self, CardType, EmailCard};
use zero_actions::core::context::ActionContext;
use zero_actions::core::feedback::Feedback;
use zero_actions::engine::ActionEngine;
use zero_actions::extract::{dates, facts};
use zero_actions::ingest;
use zero_actions::services::platform::{DesktopPlatform, RecordingPlatform};
use zero_actions::services::purchases::PurchaseClient;
use zero_actions::services::replies::{CannedReplies, SmartReplies, Summarizer, TruncatingSummarizer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ZeroConfig::load();

    // Set up logging to the systemd user journal (`journalctl --user -t zero-actions -f`).
    // Wrapper filters: this crate at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                if metadata.target().starts_with("zero_actions") {
                    let max = if zero_actions::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        let journal = systemd_journal_logger::JournalLog::new()
            .unwrap()
            .with_syslog_identifier("zero-actions".to_string());

        zero_actions::set_debug_logging(config.debug_logging);

        log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).unwrap();
        // Global max must be Debug so crate debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }

    if let Err(e) = config.ensure_files() {
        log::error!("Failed to create data directory: {}", e);
    }

    let args: Vec<String> = std::env::args().collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");

    match args.get(1).map(String::as_str) {
        Some("triage") => {
            let path = args
                .get(2)
                .ok_or("usage: zero-actions triage <message.eml>")?;
            cmd_triage(&config, path)?;
        }
        Some("run") => {
            let path = args
                .get(2)
                .ok_or("usage: zero-actions run <message.eml> [--action <key>] [--dry-run]")?;
            let action_key = args
                .iter()
                .position(|a| a == "--action")
                .and_then(|i| args.get(i + 1))
                .cloned();
            cmd_run(&config, path, action_key.as_deref(), dry_run).await?;
        }
        Some("purchases") => cmd_purchases(&config).await?,
        Some("cancel") => {
            let id = args.get(2).ok_or("usage: zero-actions cancel <purchase-id>")?;
            cmd_cancel(&config, id).await?;
        }
        _ => {
            println!("zero-actions <command>");
            println!();
            println!("  triage <message.eml>                    build a card, print suggested actions");
            println!("  run <message.eml> [--action <key>] [--dry-run]");
            println!("                                          execute a suggested action");
            println!("  purchases                               list scheduled purchases");
            println!("  cancel <purchase-id>                    cancel a scheduled purchase");
        }
    }

    Ok(())
}

fn load_card(path: &str) -> Result<EmailCard, Box<dyn std::error::Error>> {
    let raw = std::fs::read(path)?;
    ingest::card_from_raw(&raw)
        .ok_or_else(|| format!("Could not parse {} as an email message", path).into())
}

fn cmd_triage(config: &ZeroConfig, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let card = load_card(path)?;

    println!("[{}] {}", card.card_type.as_key(), card.title);
    println!("From: {}", card.sender);
    println!("{}", TruncatingSummarizer::default().summarize(&card));
    if let Some(percent) = card.discount_percent() {
        println!("Discount: {}%", percent);
    }

    // Detail lines extracted from the body, per card type
    match card.card_type {
        CardType::Travel => {
            if let Some(code) = facts::confirmation_code(&card.body) {
                println!("Confirmation: {}", code);
            }
        }
        CardType::Social => {
            if let (Some(likes), Some(comments)) = (
                facts::like_count(&card.body),
                facts::comment_count(&card.body),
            ) {
                println!("Engagement: {} likes, {} comments", likes, comments);
            }
        }
        CardType::Generic => {
            if let Some(code) = facts::access_code(&card.body) {
                println!("Access code: {}", code);
            }
            if let Some(listing) = facts::listing_summary(&card.body) {
                println!("Listing: {}", listing);
            }
            if let Some(phone) = facts::phone_number(&card.body) {
                println!("Phone: {}", phone);
            }
        }
        _ => {}
    }

    if card.suggested_actions.is_empty() {
        println!("\nNo suggested actions.");
    } else {
        println!("\nSuggested actions:");
        for action in &card.suggested_actions {
            let marker = if action.is_primary { "*" } else { " " };
            println!(
                "  {} {} ({})",
                marker,
                action.display_name,
                action.action_type.as_key()
            );
        }
    }

    println!("\nQuick replies:");
    for reply in CannedReplies.replies_for(&card) {
        println!("  - {}", reply);
    }

    // Keep the card so `purchases` and purchase-check can cross-reference it.
    let cards_path = config.cards_path();
    let mut cards = card::load_cards(&cards_path);
    cards.push(card);
    card::save_cards(&cards_path, &cards);

    Ok(())
}

async fn cmd_run(
    config: &ZeroConfig,
    path: &str,
    action_key: Option<&str>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let card = load_card(path)?;
    let action = match action_key {
        Some(key) => card
            .action_by_key(key)
            .ok_or_else(|| format!("No '{}' action on this card", key))?,
        None => card
            .primary_action()
            .ok_or("This card has no suggested actions")?,
    };

    println!("Running '{}' for: {}", action.display_name, card.title);

    if dry_run {
        // Scheduling would hit the backend; preview the request instead.
        if let Ok(ActionContext::SchedulePurchase {
            product_name,
            product_url,
            sale_date,
        }) = ActionContext::from_action(action)
        {
            let when = dates::parse_date_phrase(&sale_date, chrono::Utc::now());
            println!("  would: POST {}/api/purchases", config.backend_url);
            println!(
                "         {} at {} ({})",
                product_name,
                when.format("%Y-%m-%dT%H:%M:%SZ"),
                product_url
            );
            return Ok(());
        }

        let recorder = Arc::new(RecordingPlatform::with_wallet());
        let engine = ActionEngine::new(recorder.clone(), config)?;
        let feedback = engine.execute(&card, action).await;
        for call in recorder.calls() {
            println!("  would: {}", call);
        }
        print_feedback(&feedback);
        return Ok(());
    }

    let platform = Arc::new(DesktopPlatform::new(&config.browser_command));
    let engine = ActionEngine::new(platform, config)?;
    let feedback = engine.execute(&card, action).await;
    print_feedback(&feedback);
    Ok(())
}

fn print_feedback(feedback: &Feedback) {
    match feedback {
        Feedback::Success { message } => println!("OK: {}", message),
        Feedback::Error { message, retryable } => {
            if *retryable {
                println!("Error (retryable): {}", message);
            } else {
                println!("Error: {}", message);
            }
        }
    }
}

async fn cmd_purchases(config: &ZeroConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = PurchaseClient::new(&config.backend_url)?;
    let list = client.list_for_user(&config.user_id).await?;

    println!("{} scheduled purchase(s)", list.count);
    for p in &list.purchases {
        println!(
            "  [{}] {}  {}  {}",
            p.status,
            p.id,
            p.product_name,
            p.scheduled_time.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

async fn cmd_cancel(config: &ZeroConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = PurchaseClient::new(&config.backend_url)?;
    client.cancel(id).await?;
    println!("Cancelled purchase {}", id);
    Ok(())
}
