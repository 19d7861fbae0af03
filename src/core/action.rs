use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The kind of handler an action routes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    SchedulePurchase,
    Rsvp,
    FlightCheckIn,
    TrackPackage,
    PayInvoice,
    CancelSubscription,
    SecurityReview,
    WriteReview,
    /// Action types this build doesn't handle; the key is preserved for display.
    Other(String),
}

impl ActionType {
    pub fn as_key(&self) -> &str {
        match self {
            Self::SchedulePurchase => "schedule_purchase",
            Self::Rsvp => "rsvp",
            Self::FlightCheckIn => "flight_check_in",
            Self::TrackPackage => "track_package",
            Self::PayInvoice => "pay_invoice",
            Self::CancelSubscription => "cancel_subscription",
            Self::SecurityReview => "security_review",
            Self::WriteReview => "write_review",
            Self::Other(key) => key,
        }
    }

    pub fn from_key(s: &str) -> Self {
        match s {
            "schedule_purchase" => Self::SchedulePurchase,
            "rsvp" => Self::Rsvp,
            "flight_check_in" => Self::FlightCheckIn,
            "track_package" => Self::TrackPackage,
            "pay_invoice" => Self::PayInvoice,
            "cancel_subscription" => Self::CancelSubscription,
            "security_review" => Self::SecurityReview,
            "write_review" => Self::WriteReview,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A suggested action attached to a card upstream.
///
/// `context` is a free-form key/value bag; its shape is only imposed when an
/// `ActionContext` is built from it at execution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAction {
    pub action_id: String,
    pub display_name: String,
    pub action_type: ActionType,
    pub is_primary: bool,
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl EmailAction {
    pub fn new(action_type: ActionType, display_name: impl Into<String>) -> Self {
        Self {
            action_id: format!("{}-{}", action_type.as_key(), uuid::Uuid::new_v4()),
            display_name: display_name.into(),
            action_type,
            is_primary: false,
            context: HashMap::new(),
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn with_context(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// Look up a context value, treating empty strings as absent.
    pub fn ctx(&self, key: &str) -> Option<&str> {
        self.context
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// First present value among several historical key spellings.
    pub fn ctx_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.ctx(k))
    }
}
