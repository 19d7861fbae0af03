use super::ActionEngine;
use crate::core::feedback::{ActionError, Feedback};

pub(crate) fn run(
    engine: &ActionEngine,
    airline: Option<&str>,
    confirmation_code: &str,
    flight_number: Option<&str>,
    checkin_url: Option<&str>,
) -> Result<Feedback, ActionError> {
    let flight_label = flight_number.or(airline).unwrap_or("your flight");

    if let Some(url) = checkin_url {
        engine
            .platform
            .open_url(url)
            .map_err(ActionError::Capability)?;
        return Ok(Feedback::success(format!(
            "Check-in opened for {} (confirmation {})",
            flight_label, confirmation_code
        )));
    }

    if engine.platform.wallet_supported() {
        let description = format!("Boarding pass for {}", flight_label);
        engine
            .platform
            .add_wallet_pass(&description, confirmation_code)
            .map_err(ActionError::Capability)?;
        return Ok(Feedback::success(format!(
            "Boarding pass for {} added to Wallet",
            flight_label
        )));
    }

    Err(ActionError::unavailable("Wallet"))
}
