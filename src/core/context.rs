use thiserror::Error;

use super::action::{ActionType, EmailAction};

/// Why an action's context bag could not be turned into a typed context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Missing required purchase information")]
    MissingPurchaseInfo,
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),
    #[error("No handler for action '{0}'")]
    UnknownAction(String),
}

/// Typed, validated view of an action's context bag.
///
/// Validation happens once, when the action is about to execute. Required
/// fields produce an error when absent; optional fields degrade to `None`
/// silently.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionContext {
    SchedulePurchase {
        product_name: String,
        product_url: String,
        sale_date: String,
    },
    Rsvp {
        event_title: String,
        event_date: Option<String>,
        organizer: Option<String>,
        location: Option<String>,
    },
    FlightCheckIn {
        airline: Option<String>,
        confirmation_code: String,
        flight_number: Option<String>,
        checkin_url: Option<String>,
    },
    TrackPackage {
        carrier: Option<String>,
        tracking_number: String,
        tracking_url: Option<String>,
    },
    PayInvoice {
        amount: Option<String>,
        invoice_number: Option<String>,
        payment_url: String,
        due_date: Option<String>,
    },
    CancelSubscription {
        service_name: String,
        cancel_url: Option<String>,
        support_email: Option<String>,
        renewal_date: Option<String>,
        monthly_price: Option<String>,
    },
    SecurityReview {
        alert_kind: Option<String>,
        review_url: String,
        device: Option<String>,
        location: Option<String>,
    },
    WriteReview {
        product_name: String,
        review_url: Option<String>,
    },
}

impl ActionContext {
    pub fn from_action(action: &EmailAction) -> Result<Self, ContextError> {
        match &action.action_type {
            ActionType::SchedulePurchase => {
                // All three are required; whichever key is missing, the
                // rejection is the same blanket message.
                let product_name = action
                    .ctx_any(&["productName", "title"])
                    .ok_or(ContextError::MissingPurchaseInfo)?;
                let product_url = action
                    .ctx_any(&["productUrl", "url"])
                    .ok_or(ContextError::MissingPurchaseInfo)?;
                let sale_date = action
                    .ctx_any(&["saleDate", "saleStartDate"])
                    .ok_or(ContextError::MissingPurchaseInfo)?;
                Ok(Self::SchedulePurchase {
                    product_name: product_name.to_string(),
                    product_url: product_url.to_string(),
                    sale_date: sale_date.to_string(),
                })
            }
            ActionType::Rsvp => {
                let event_title = action
                    .ctx_any(&["eventTitle", "eventName"])
                    .ok_or(ContextError::MissingField("eventTitle"))?;
                Ok(Self::Rsvp {
                    event_title: event_title.to_string(),
                    event_date: action.ctx("eventDate").map(str::to_string),
                    organizer: action
                        .ctx_any(&["organizerEmail", "organizer"])
                        .map(str::to_string),
                    location: action.ctx("location").map(str::to_string),
                })
            }
            ActionType::FlightCheckIn => {
                let confirmation_code = action
                    .ctx_any(&["confirmationCode", "confirmation"])
                    .ok_or(ContextError::MissingField("confirmationCode"))?;
                Ok(Self::FlightCheckIn {
                    airline: action.ctx("airline").map(str::to_string),
                    confirmation_code: confirmation_code.to_string(),
                    flight_number: action.ctx("flightNumber").map(str::to_string),
                    checkin_url: action
                        .ctx_any(&["checkinUrl", "checkInUrl"])
                        .map(str::to_string),
                })
            }
            ActionType::TrackPackage => {
                let tracking_number = action
                    .ctx("trackingNumber")
                    .ok_or(ContextError::MissingField("trackingNumber"))?;
                Ok(Self::TrackPackage {
                    carrier: action.ctx("carrier").map(str::to_string),
                    tracking_number: tracking_number.to_string(),
                    tracking_url: action.ctx("trackingUrl").map(str::to_string),
                })
            }
            ActionType::PayInvoice => {
                let payment_url = action
                    .ctx_any(&["paymentUrl", "invoiceUrl"])
                    .ok_or(ContextError::MissingField("paymentUrl"))?;
                Ok(Self::PayInvoice {
                    amount: action.ctx("amount").map(str::to_string),
                    invoice_number: action.ctx("invoiceNumber").map(str::to_string),
                    payment_url: payment_url.to_string(),
                    due_date: action.ctx("dueDate").map(str::to_string),
                })
            }
            ActionType::CancelSubscription => {
                let service_name = action
                    .ctx_any(&["serviceName", "service"])
                    .ok_or(ContextError::MissingField("serviceName"))?;
                Ok(Self::CancelSubscription {
                    service_name: service_name.to_string(),
                    cancel_url: action.ctx("cancelUrl").map(str::to_string),
                    support_email: action.ctx("supportEmail").map(str::to_string),
                    renewal_date: action.ctx("renewalDate").map(str::to_string),
                    monthly_price: action
                        .ctx_any(&["monthlyPrice", "price"])
                        .map(str::to_string),
                })
            }
            ActionType::SecurityReview => {
                let review_url = action
                    .ctx_any(&["reviewUrl", "accountUrl"])
                    .ok_or(ContextError::MissingField("reviewUrl"))?;
                Ok(Self::SecurityReview {
                    alert_kind: action.ctx("alertType").map(str::to_string),
                    review_url: review_url.to_string(),
                    device: action.ctx("device").map(str::to_string),
                    location: action.ctx("location").map(str::to_string),
                })
            }
            ActionType::WriteReview => {
                let product_name = action
                    .ctx_any(&["productName", "title"])
                    .ok_or(ContextError::MissingField("productName"))?;
                Ok(Self::WriteReview {
                    product_name: product_name.to_string(),
                    review_url: action.ctx("reviewUrl").map(str::to_string),
                })
            }
            ActionType::Other(key) => Err(ContextError::UnknownAction(key.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{ActionType, EmailAction};

    #[test]
    fn purchase_context_requires_all_three_keys() {
        let action = EmailAction::new(ActionType::SchedulePurchase, "Buy on sale day")
            .with_context("productName", "Widget")
            .with_context("productUrl", "https://example.com/p");
        // saleDate missing
        assert_eq!(
            ActionContext::from_action(&action),
            Err(ContextError::MissingPurchaseInfo)
        );
    }

    #[test]
    fn purchase_rejection_message_is_the_client_string() {
        assert_eq!(
            ContextError::MissingPurchaseInfo.to_string(),
            "Missing required purchase information"
        );
    }

    #[test]
    fn purchase_context_builds_from_complete_bag() {
        let action = EmailAction::new(ActionType::SchedulePurchase, "Buy on sale day")
            .with_context("productName", "Widget")
            .with_context("productUrl", "https://example.com/p")
            .with_context("saleDate", "31 October");
        let ctx = ActionContext::from_action(&action).unwrap();
        assert_eq!(
            ctx,
            ActionContext::SchedulePurchase {
                product_name: "Widget".to_string(),
                product_url: "https://example.com/p".to_string(),
                sale_date: "31 October".to_string(),
            }
        );
    }

    #[test]
    fn optional_fields_degrade_silently() {
        let action = EmailAction::new(ActionType::TrackPackage, "Track package")
            .with_context("trackingNumber", "1Z999AA10123456784");
        let ctx = ActionContext::from_action(&action).unwrap();
        match ctx {
            ActionContext::TrackPackage {
                carrier,
                tracking_number,
                tracking_url,
            } => {
                assert_eq!(carrier, None);
                assert_eq!(tracking_number, "1Z999AA10123456784");
                assert_eq!(tracking_url, None);
            }
            other => panic!("unexpected context: {:?}", other),
        }
    }

    #[test]
    fn fallback_key_spellings_are_accepted() {
        let action = EmailAction::new(ActionType::PayInvoice, "Pay invoice")
            .with_context("invoiceUrl", "https://pay.example.com/i/42");
        let ctx = ActionContext::from_action(&action).unwrap();
        assert!(matches!(ctx, ActionContext::PayInvoice { payment_url, .. }
            if payment_url == "https://pay.example.com/i/42"));
    }

    #[test]
    fn unknown_action_is_an_error() {
        let action = EmailAction::new(ActionType::from_key("sign_form"), "Sign form");
        assert_eq!(
            ActionContext::from_action(&action),
            Err(ContextError::UnknownAction("sign_form".to_string()))
        );
    }
}
