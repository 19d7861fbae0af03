use super::ActionEngine;
use crate::core::feedback::{ActionError, Feedback};

pub(crate) fn run(
    engine: &ActionEngine,
    amount: Option<&str>,
    invoice_number: Option<&str>,
    payment_url: &str,
    due_date: Option<&str>,
) -> Result<Feedback, ActionError> {
    engine
        .platform
        .open_url(payment_url)
        .map_err(ActionError::Capability)?;

    let mut message = String::from("Payment page opened");
    if let Some(number) = invoice_number {
        message.push_str(&format!(" for invoice {}", number));
    }
    if let Some(amount) = amount {
        message.push_str(&format!(" ({})", amount));
    }
    if let Some(due) = due_date {
        message.push_str(&format!(", due {}", due));
    }
    Ok(Feedback::success(message))
}
