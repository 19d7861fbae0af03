pub mod flight;
pub mod invoice;
pub mod package;
pub mod purchase;
pub mod review;
pub mod rsvp;
pub mod security;
pub mod subscription;

use std::sync::Arc;

use chrono::Utc;

use crate::config::ZeroConfig;
use crate::core::action::EmailAction;
use crate::core::card::EmailCard;
use crate::core::context::ActionContext;
use crate::core::feedback::{ActionError, Feedback};
use crate::services::platform::Platform;
use crate::services::purchases::PurchaseClient;

/// Executes a card's suggested action against the injected services.
///
/// One action, one execution: validate the typed context, fire the action's
/// platform or REST call, fold the outcome into a banner. There is no
/// cancellation token; dropping the future is the only way to abandon
/// in-flight work.
pub struct ActionEngine {
    pub(crate) platform: Arc<dyn Platform>,
    pub(crate) purchases: PurchaseClient,
    pub(crate) user_id: String,
    pub(crate) timezone: String,
}

impl ActionEngine {
    pub fn new(platform: Arc<dyn Platform>, config: &ZeroConfig) -> Result<Self, String> {
        let purchases = PurchaseClient::new(&config.backend_url)?;
        Ok(Self {
            platform,
            purchases,
            user_id: config.user_id.clone(),
            timezone: config.timezone.clone(),
        })
    }

    /// Run an action and always come back with a banner.
    pub async fn execute(&self, card: &EmailCard, action: &EmailAction) -> Feedback {
        match self.run(card, action).await {
            Ok(feedback) => {
                log::info!(
                    "Action '{}' completed: {}",
                    action.display_name,
                    feedback.message()
                );
                feedback
            }
            Err(e) => {
                log::error!("Action '{}' failed: {}", action.display_name, e);
                Feedback::from_error(&e)
            }
        }
    }

    async fn run(&self, card: &EmailCard, action: &EmailAction) -> Result<Feedback, ActionError> {
        let context = ActionContext::from_action(action)?;
        let now = Utc::now();
        match context {
            ActionContext::SchedulePurchase {
                product_name,
                product_url,
                sale_date,
            } => purchase::run(self, card, &product_name, &product_url, &sale_date, now).await,
            ActionContext::Rsvp {
                event_title,
                event_date,
                organizer,
                location,
            } => rsvp::run(
                self,
                &event_title,
                event_date.as_deref(),
                organizer.as_deref(),
                location.as_deref(),
                now,
            ),
            ActionContext::FlightCheckIn {
                airline,
                confirmation_code,
                flight_number,
                checkin_url,
            } => flight::run(
                self,
                airline.as_deref(),
                &confirmation_code,
                flight_number.as_deref(),
                checkin_url.as_deref(),
            ),
            ActionContext::TrackPackage {
                carrier,
                tracking_number,
                tracking_url,
            } => package::run(
                self,
                carrier.as_deref(),
                &tracking_number,
                tracking_url.as_deref(),
            ),
            ActionContext::PayInvoice {
                amount,
                invoice_number,
                payment_url,
                due_date,
            } => invoice::run(
                self,
                amount.as_deref(),
                invoice_number.as_deref(),
                &payment_url,
                due_date.as_deref(),
            ),
            ActionContext::CancelSubscription {
                service_name,
                cancel_url,
                support_email,
                renewal_date,
                monthly_price,
            } => subscription::run(
                self,
                &service_name,
                cancel_url.as_deref(),
                support_email.as_deref(),
                renewal_date.as_deref(),
                monthly_price.as_deref(),
            ),
            ActionContext::SecurityReview {
                alert_kind,
                review_url,
                device,
                location,
            } => security::run(
                self,
                alert_kind.as_deref(),
                &review_url,
                device.as_deref(),
                location.as_deref(),
            ),
            ActionContext::WriteReview {
                product_name,
                review_url,
            } => review::run(self, &product_name, review_url.as_deref()),
        }
    }
}
