use chrono::{DateTime, Utc};

use super::ActionEngine;
use crate::core::card::EmailCard;
use crate::core::feedback::{ActionError, Feedback};
use crate::extract::dates;
use crate::services::purchases::ScheduledPurchaseRequest;

/// Build the wire request for scheduling a purchase from a card. The sale
/// date phrase resolves through the date ladder; the card id becomes the
/// request's email id.
pub(crate) fn build_request(
    user_id: &str,
    timezone: &str,
    card: &EmailCard,
    product_name: &str,
    product_url: &str,
    sale_date: &str,
    now: DateTime<Utc>,
) -> ScheduledPurchaseRequest {
    ScheduledPurchaseRequest {
        user_id: user_id.to_string(),
        email_id: card.id.to_string(),
        product_name: product_name.to_string(),
        product_url: product_url.to_string(),
        scheduled_time: dates::parse_date_phrase(sale_date, now),
        timezone: timezone.to_string(),
    }
}

pub(crate) async fn run(
    engine: &ActionEngine,
    card: &EmailCard,
    product_name: &str,
    product_url: &str,
    sale_date: &str,
    now: DateTime<Utc>,
) -> Result<Feedback, ActionError> {
    let req = build_request(
        &engine.user_id,
        &engine.timezone,
        card,
        product_name,
        product_url,
        sale_date,
        now,
    );
    let scheduled_for = req.scheduled_time;
    let record = engine
        .purchases
        .schedule(&req)
        .await
        .map_err(ActionError::Service)?;
    log::info!("Scheduled purchase {} ({})", record.id, record.status);
    Ok(Feedback::success(format!(
        "Purchase of {} scheduled for {}",
        product_name,
        scheduled_for.format("%B %-d, %Y")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn request_carries_resolved_sale_date_and_card_id() {
        let card = EmailCard::new("Widget sale", "store@example.com");
        let now = Utc.with_ymd_and_hms(2025, 10, 7, 9, 0, 0).unwrap();
        let req = build_request(
            "u-1",
            "UTC",
            &card,
            "Widget",
            "https://example.com/p",
            "31 October",
            now,
        );
        assert_eq!(req.user_id, "u-1");
        assert_eq!(req.email_id, card.id.to_string());
        assert_eq!(req.product_name, "Widget");
        assert_eq!(
            req.scheduled_time,
            Utc.with_ymd_and_hms(2025, 10, 31, 17, 0, 0).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap()["scheduledTime"],
            "2025-10-31T17:00:00Z"
        );
    }

    #[test]
    fn unparsable_sale_date_still_schedules_a_week_out() {
        let card = EmailCard::new("Widget sale", "store@example.com");
        let now = Utc.with_ymd_and_hms(2025, 10, 7, 9, 0, 0).unwrap();
        let req = build_request(
            "u-1",
            "UTC",
            &card,
            "Widget",
            "https://example.com/p",
            "sometime soon",
            now,
        );
        assert_eq!(req.scheduled_time, now + chrono::Duration::days(7));
    }
}
