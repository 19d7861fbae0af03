use super::ActionEngine;
use crate::core::feedback::{ActionError, Feedback};

pub(crate) fn run(
    engine: &ActionEngine,
    service_name: &str,
    cancel_url: Option<&str>,
    support_email: Option<&str>,
    renewal_date: Option<&str>,
    monthly_price: Option<&str>,
) -> Result<Feedback, ActionError> {
    if let Some(url) = cancel_url {
        engine
            .platform
            .open_url(url)
            .map_err(ActionError::Capability)?;
        let mut message = format!("Cancellation page opened for {}", service_name);
        match (renewal_date, monthly_price) {
            (Some(date), Some(price)) => {
                message.push_str(&format!(" (renews {} at {})", date, price));
            }
            (Some(date), None) => message.push_str(&format!(" (renews {})", date)),
            (None, Some(price)) => message.push_str(&format!(" ({}/mo)", price)),
            (None, None) => {}
        }
        return Ok(Feedback::success(message));
    }

    if let Some(email) = support_email {
        let body = format!("Please cancel my {} subscription.", service_name);
        engine
            .platform
            .compose_message(email, &body)
            .map_err(ActionError::Capability)?;
        return Ok(Feedback::success(format!(
            "Cancellation request sent for {}",
            service_name
        )));
    }

    Err(ActionError::Invalid(format!(
        "No cancellation link or support contact for {}",
        service_name
    )))
}
