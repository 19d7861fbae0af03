//! Builds cards from raw email messages.
//!
//! The classifier and action suggestions are keyword heuristics over the
//! subject and body, backed by the fact detectors; no AI service is involved.

use mail_parser::MessageParser;

use crate::core::action::{ActionType, EmailAction};
use crate::core::card::{CardType, EmailCard};
use crate::extract::facts;

/// Parse a raw RFC 822 message into a card with suggested actions. `None`
/// means the bytes were not parseable as a message.
pub fn card_from_raw(raw: &[u8]) -> Option<EmailCard> {
    let parsed = MessageParser::default().parse(raw)?;

    let title = parsed.subject().unwrap_or("(no subject)").to_string();

    let (sender, sender_address) = parsed
        .from()
        .and_then(|addrs| addrs.first())
        .map(|a| {
            let address = a.address().map(|s| s.to_string());
            let name = a
                .name()
                .map(|n| n.to_string())
                .or_else(|| address.clone())
                .unwrap_or_else(|| "unknown".to_string());
            (name, address)
        })
        .unwrap_or_else(|| ("unknown".to_string(), None));

    let body = parsed.body_text(0).unwrap_or_default().to_string();

    let mut card = EmailCard::new(title, sender);
    card.summary = body.chars().take(200).collect();
    card.body = body;
    card.card_type = classify(&card);
    attach_prices(&mut card);
    card.suggested_actions = suggest_actions(&card, sender_address.as_deref());
    Some(card)
}

fn classify(card: &EmailCard) -> CardType {
    let haystack = format!("{} {}", card.title, card.body).to_lowercase();
    let has_any = |needles: &[&str]| needles.iter().any(|n| haystack.contains(n));

    if has_any(&["security alert", "new sign-in", "new login", "suspicious activity"]) {
        CardType::Security
    } else if has_any(&["tracking", "shipped", "out for delivery", "your package"]) {
        CardType::Delivery
    } else if has_any(&["flight", "boarding pass", "itinerary"]) {
        CardType::Travel
    } else if has_any(&["invoice", "payment due", "amount due"]) {
        CardType::Billing
    } else if has_any(&["subscription", "renewal", "will renew"]) {
        CardType::Subscription
    } else if has_any(&["rsvp", "you're invited", "invitation"]) {
        CardType::Event
    } else if has_any(&["sale", "% off", "price drop", "discount", "deal of"]) {
        CardType::Purchase
    } else if has_any(&["likes", "commented", "followed you", "mentioned you"]) {
        CardType::Social
    } else {
        CardType::Generic
    }
}

fn attach_prices(card: &mut EmailCard) {
    let text = format!("{} {}", card.title, card.body);
    match card.card_type {
        CardType::Billing => {
            card.payment_amount = facts::price(&text).and_then(|p| facts::parse_amount(&p));
        }
        CardType::Purchase | CardType::Subscription => {
            let amounts: Vec<f64> = facts::all_prices(&text)
                .iter()
                .filter_map(|p| facts::parse_amount(p))
                .collect();
            match amounts.as_slice() {
                [] => {}
                [only] => card.sale_price = Some(*only),
                // Sale emails quote the deal first and the list price after.
                [first, rest @ ..] => {
                    card.sale_price = Some(*first);
                    let highest = rest.iter().cloned().fold(*first, f64::max);
                    if highest > *first {
                        card.original_price = Some(highest);
                    }
                }
            }
        }
        _ => {}
    }
}

fn guess_carrier(haystack: &str) -> Option<&'static str> {
    if haystack.contains("ups") {
        Some("UPS")
    } else if haystack.contains("fedex") {
        Some("FedEx")
    } else if haystack.contains("usps") {
        Some("USPS")
    } else if haystack.contains("dhl") {
        Some("DHL")
    } else {
        None
    }
}

/// Suggested actions for a card; only actions whose required context is
/// actually present get suggested, so validation can't fail downstream.
fn suggest_actions(card: &EmailCard, sender_address: Option<&str>) -> Vec<EmailAction> {
    let text = format!("{} {}", card.title, card.body);
    let haystack = text.to_lowercase();
    let mut actions = Vec::new();

    match card.card_type {
        CardType::Delivery => {
            if let Some(tracking) = facts::tracking_number(&text) {
                let mut action = EmailAction::new(ActionType::TrackPackage, "Track package")
                    .with_context("trackingNumber", tracking);
                // The carrier usually names itself in the From line, not the body.
                let with_sender = format!("{} {}", card.sender.to_lowercase(), haystack);
                if let Some(carrier) = guess_carrier(&with_sender) {
                    action = action.with_context("carrier", carrier);
                }
                actions.push(action);
            }
        }
        CardType::Travel => {
            if let Some(code) = facts::confirmation_code(&text) {
                let mut action = EmailAction::new(ActionType::FlightCheckIn, "Check in")
                    .with_context("confirmationCode", code);
                if let Some(flight) = facts::flight_number(&text) {
                    action = action.with_context("flightNumber", flight);
                }
                if let Some(url) = facts::first_url(&text) {
                    action = action.with_context("checkinUrl", url);
                }
                actions.push(action);
            }
        }
        CardType::Billing => {
            if let Some(url) = facts::first_url(&text) {
                let mut action = EmailAction::new(ActionType::PayInvoice, "Pay invoice")
                    .with_context("paymentUrl", url);
                if let Some(amount) = facts::price(&text) {
                    action = action.with_context("amount", amount);
                }
                if let Some(number) = facts::invoice_number(&text) {
                    action = action.with_context("invoiceNumber", number);
                }
                if let Some(due) = facts::date_phrase(&text) {
                    action = action.with_context("dueDate", due);
                }
                actions.push(action);
            }
        }
        CardType::Subscription => {
            let mut action =
                EmailAction::new(ActionType::CancelSubscription, "Cancel subscription")
                    .with_context("serviceName", card.sender.clone());
            if let Some(url) = facts::first_url(&text) {
                action = action.with_context("cancelUrl", url);
            }
            if let Some(address) = sender_address {
                action = action.with_context("supportEmail", address);
            }
            if let Some(date) = facts::date_phrase(&text) {
                action = action.with_context("renewalDate", date);
            }
            if let Some(price) = facts::price(&text) {
                action = action.with_context("monthlyPrice", price);
            }
            actions.push(action);
        }
        CardType::Event => {
            let mut action = EmailAction::new(ActionType::Rsvp, "RSVP")
                .with_context("eventTitle", card.title.clone());
            if let Some(date) = facts::date_phrase(&text) {
                action = action.with_context("eventDate", date);
            }
            if let Some(address) = sender_address {
                action = action.with_context("organizerEmail", address);
            }
            actions.push(action);
        }
        CardType::Purchase => {
            // Scheduling needs all three pieces; suggest nothing otherwise.
            if let (Some(url), Some(date)) = (facts::first_url(&text), facts::date_phrase(&text)) {
                actions.push(
                    EmailAction::new(ActionType::SchedulePurchase, "Buy on sale day")
                        .with_context("productName", card.title.clone())
                        .with_context("productUrl", url)
                        .with_context("saleDate", date),
                );
            }
        }
        CardType::Security => {
            if let Some(url) = facts::first_url(&text) {
                let mut action = EmailAction::new(ActionType::SecurityReview, "Review activity")
                    .with_context("reviewUrl", url);
                if haystack.contains("new sign-in") || haystack.contains("new login") {
                    action = action.with_context("alertType", "new sign-in");
                }
                actions.push(action);
            }
        }
        CardType::Social | CardType::Generic => {}
    }

    if let Some(first) = actions.first_mut() {
        first.is_primary = true;
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::ActionContext;

    #[test]
    fn shipped_email_suggests_tracking() {
        let raw = b"From: UPS <auto-notify@ups.example>\r\n\
            Subject: Your package has shipped\r\n\
            \r\n\
            Good news! Tracking number 1Z999AA10123456784. Expected Friday.\r\n";
        let card = card_from_raw(raw).unwrap();
        assert_eq!(card.card_type, CardType::Delivery);
        let action = card.primary_action().unwrap();
        assert_eq!(action.action_type, ActionType::TrackPackage);
        assert_eq!(action.ctx("trackingNumber"), Some("1Z999AA10123456784"));
        assert_eq!(action.ctx("carrier"), Some("UPS"));
        assert!(ActionContext::from_action(action).is_ok());
    }

    #[test]
    fn sale_email_suggests_scheduling_when_complete() {
        let raw = b"From: Gadget Store <deals@example.com>\r\n\
            Subject: Widget Pro\r\n\
            \r\n\
            Flash sale! Now $129.99, was $199.99. Sale ends October 31.\r\n\
            Shop: https://example.com/p/widget-pro\r\n";
        let card = card_from_raw(raw).unwrap();
        assert_eq!(card.card_type, CardType::Purchase);
        assert_eq!(card.sale_price, Some(129.99));
        assert_eq!(card.original_price, Some(199.99));
        let action = card.primary_action().unwrap();
        assert_eq!(action.action_type, ActionType::SchedulePurchase);
        assert_eq!(action.ctx("saleDate"), Some("October 31"));
        assert_eq!(action.ctx("productUrl"), Some("https://example.com/p/widget-pro"));
    }

    #[test]
    fn flight_email_suggests_check_in() {
        let raw = b"From: Acme Air <no-reply@acmeair.example>\r\n\
            Subject: Your flight is tomorrow\r\n\
            \r\n\
            Check in for Flight UA 1234. Confirmation code: XJK4P2.\r\n\
            https://acmeair.example/checkin\r\n";
        let card = card_from_raw(raw).unwrap();
        assert_eq!(card.card_type, CardType::Travel);
        let action = card.primary_action().unwrap();
        assert_eq!(action.action_type, ActionType::FlightCheckIn);
        assert_eq!(action.ctx("confirmationCode"), Some("XJK4P2"));
        assert_eq!(action.ctx("flightNumber"), Some("UA 1234"));
        assert_eq!(action.ctx("checkinUrl"), Some("https://acmeair.example/checkin"));
    }

    #[test]
    fn invoice_email_suggests_payment() {
        let raw = b"From: Billing <billing@vendor.example>\r\n\
            Subject: Invoice INV-120\r\n\
            \r\n\
            Invoice #INV-120 for $45.00 is due December 1.\r\n\
            Pay at https://pay.example.com/i/120\r\n";
        let card = card_from_raw(raw).unwrap();
        assert_eq!(card.card_type, CardType::Billing);
        assert_eq!(card.payment_amount, Some(45.0));
        let action = card.primary_action().unwrap();
        assert_eq!(action.action_type, ActionType::PayInvoice);
        assert_eq!(action.ctx("paymentUrl"), Some("https://pay.example.com/i/120"));
        assert_eq!(action.ctx("amount"), Some("$45.00"));
        assert_eq!(action.ctx("invoiceNumber"), Some("INV-120"));
        assert_eq!(action.ctx("dueDate"), Some("December 1"));
    }

    #[test]
    fn sale_email_without_a_link_suggests_nothing() {
        let raw = b"From: Gadget Store <deals@example.com>\r\n\
            Subject: Widget Pro\r\n\
            \r\n\
            Flash sale! 40% off everything, this weekend only.\r\n";
        let card = card_from_raw(raw).unwrap();
        assert_eq!(card.card_type, CardType::Purchase);
        assert!(card.suggested_actions.is_empty());
    }

    #[test]
    fn invitation_carries_the_organizer() {
        let raw = b"From: Dana Reyes <dana@example.com>\r\n\
            Subject: You're invited: rooftop dinner\r\n\
            \r\n\
            Please RSVP by December 5, 2025. Hope to see you!\r\n";
        let card = card_from_raw(raw).unwrap();
        assert_eq!(card.card_type, CardType::Event);
        let action = card.primary_action().unwrap();
        assert_eq!(action.action_type, ActionType::Rsvp);
        assert_eq!(action.ctx("organizerEmail"), Some("dana@example.com"));
        assert_eq!(action.ctx("eventDate"), Some("December 5, 2025"));
    }

    #[test]
    fn plain_email_stays_generic() {
        let raw = b"From: A Friend <friend@example.com>\r\n\
            Subject: lunch?\r\n\
            \r\n\
            Want to grab lunch tomorrow?\r\n";
        let card = card_from_raw(raw).unwrap();
        assert_eq!(card.card_type, CardType::Generic);
        assert!(card.suggested_actions.is_empty());
        assert_eq!(card.sender, "A Friend");
    }
}
