use zero_actions::core::action::ActionType;
use zero_actions::services::purchases::PurchaseClient;

#[tokio::main]
async fn main() {
    systemd_journal_logger::JournalLog::new()
        .unwrap()
        .with_syslog_identifier("zero-purchase-check".to_string())
        .install()
        .unwrap();
    log::set_max_level(log::LevelFilter::Info);

    let config = zero_actions::config::ZeroConfig::load();

    println!("=== Scheduled Purchases vs Local Cards ===\n");

    // Load triaged cards from the local cache
    let cards = zero_actions::core::card::load_cards(&config.cards_path());
    let purchase_titles: Vec<&str> = cards
        .iter()
        .filter(|c| {
            c.suggested_actions
                .iter()
                .any(|a| a.action_type == ActionType::SchedulePurchase)
        })
        .map(|c| c.title.as_str())
        .collect();

    println!(
        "Local: {} cards, {} with purchase actions\n",
        cards.len(),
        purchase_titles.len()
    );

    println!("--- Backend: {} ---", config.backend_url);

    let client = match PurchaseClient::new(&config.backend_url) {
        Ok(c) => c,
        Err(e) => {
            println!("  Client error: {}", e);
            return;
        }
    };

    match client.list_for_user(&config.user_id).await {
        Ok(list) => {
            println!("  Remote: {} purchase(s)", list.count);

            let mut matched = 0;
            let mut remote_only = Vec::new();
            for p in &list.purchases {
                if purchase_titles.iter().any(|t| *t == p.product_name) {
                    matched += 1;
                } else {
                    remote_only.push(p);
                }
            }

            println!("  Matched to local cards: {}", matched);

            if !remote_only.is_empty() {
                println!("\n  ON BACKEND ONLY ({}):", remote_only.len());
                for p in &remote_only {
                    println!(
                        "    [{}] {} ({})",
                        p.status,
                        p.product_name,
                        p.scheduled_time.format("%Y-%m-%d")
                    );
                }
            }

            let local_only: Vec<&str> = purchase_titles
                .iter()
                .filter(|t| !list.purchases.iter().any(|p| p.product_name == **t))
                .copied()
                .collect();
            if !local_only.is_empty() {
                println!("\n  LOCAL ONLY ({}):", local_only.len());
                for title in &local_only {
                    println!("    {}", title);
                }
            }

            if remote_only.is_empty() && local_only.is_empty() {
                println!("  All accounted for!");
            }
        }
        Err(e) => println!("  Error listing purchases: {}", e),
    }

    println!("\n=== Done ===");
}
