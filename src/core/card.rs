use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use super::action::EmailAction;

/// Category assigned to a card when it is built from an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Purchase,
    Travel,
    Billing,
    Subscription,
    Delivery,
    Event,
    Security,
    Social,
    Generic,
}

impl CardType {
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Travel => "travel",
            Self::Billing => "billing",
            Self::Subscription => "subscription",
            Self::Delivery => "delivery",
            Self::Event => "event",
            Self::Security => "security",
            Self::Social => "social",
            Self::Generic => "generic",
        }
    }

    /// Unknown keys fall back to Generic rather than failing.
    pub fn from_key(s: &str) -> Self {
        match s {
            "purchase" => Self::Purchase,
            "travel" => Self::Travel,
            "billing" => Self::Billing,
            "subscription" => Self::Subscription,
            "delivery" => Self::Delivery,
            "event" => Self::Event,
            "security" => Self::Security,
            "social" => Self::Social,
            _ => Self::Generic,
        }
    }
}

/// An email-derived record presented to the user with suggested actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailCard {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub sender: String,
    pub card_type: CardType,
    pub original_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub payment_amount: Option<f64>,
    pub received: NaiveDateTime,
    pub suggested_actions: Vec<EmailAction>,
}

impl EmailCard {
    pub fn new(title: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            summary: String::new(),
            body: String::new(),
            sender: sender.into(),
            card_type: CardType::Generic,
            original_price: None,
            sale_price: None,
            payment_amount: None,
            received: chrono::Local::now().naive_local(),
            suggested_actions: Vec::new(),
        }
    }

    /// The action the card's primary button fires, if any.
    pub fn primary_action(&self) -> Option<&EmailAction> {
        self.suggested_actions
            .iter()
            .find(|a| a.is_primary)
            .or_else(|| self.suggested_actions.first())
    }

    pub fn action_by_key(&self, key: &str) -> Option<&EmailAction> {
        self.suggested_actions
            .iter()
            .find(|a| a.action_type.as_key() == key)
    }

    /// Percentage saved when both prices are present and the sale is a discount.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        let sale = self.sale_price?;
        if original <= 0.0 || sale >= original {
            return None;
        }
        Some(((1.0 - sale / original) * 100.0).round() as u32)
    }
}

pub fn load_cards(path: &Path) -> Vec<EmailCard> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

pub fn save_cards(path: &Path, cards: &[EmailCard]) {
    match serde_json::to_string_pretty(cards) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to save cards: {}", e);
            }
        }
        Err(e) => log::error!("Failed to serialize cards: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{ActionType, EmailAction};

    #[test]
    fn card_type_round_trip() {
        assert_eq!(CardType::from_key("delivery"), CardType::Delivery);
        assert_eq!(CardType::Delivery.as_key(), "delivery");
        assert_eq!(CardType::from_key("whatever"), CardType::Generic);
    }

    #[test]
    fn primary_action_prefers_flagged() {
        let mut card = EmailCard::new("Sale ends soon", "store@example.com");
        let mut secondary = EmailAction::new(ActionType::WriteReview, "Write a review");
        secondary.is_primary = false;
        let mut primary = EmailAction::new(ActionType::SchedulePurchase, "Buy on sale day");
        primary.is_primary = true;
        card.suggested_actions = vec![secondary, primary];
        assert_eq!(
            card.primary_action().unwrap().action_type,
            ActionType::SchedulePurchase
        );
    }

    #[test]
    fn primary_action_falls_back_to_first() {
        let mut card = EmailCard::new("Invoice", "billing@example.com");
        let mut action = EmailAction::new(ActionType::PayInvoice, "Pay invoice");
        action.is_primary = false;
        card.suggested_actions = vec![action];
        assert!(card.primary_action().is_some());
    }

    #[test]
    fn discount_percent_needs_both_prices() {
        let mut card = EmailCard::new("Deal", "store@example.com");
        assert_eq!(card.discount_percent(), None);
        card.original_price = Some(200.0);
        card.sale_price = Some(150.0);
        assert_eq!(card.discount_percent(), Some(25));
        card.sale_price = Some(250.0);
        assert_eq!(card.discount_percent(), None);
    }
}
