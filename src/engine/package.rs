use super::ActionEngine;
use crate::core::feedback::{ActionError, Feedback};

/// Carrier tracking page for a tracking number. UPS numbers are recognizable
/// without a carrier name; everything else falls back to a search.
fn carrier_url(carrier: Option<&str>, tracking: &str) -> String {
    let carrier = carrier.map(|c| c.to_ascii_lowercase());
    let carrier = match carrier.as_deref() {
        None if tracking.starts_with("1Z") => Some("ups"),
        other => other,
    };
    match carrier {
        Some("ups") => format!("https://www.ups.com/track?tracknum={}", tracking),
        Some("fedex") => format!("https://www.fedex.com/fedextrack/?trknbr={}", tracking),
        Some("usps") => format!(
            "https://tools.usps.com/go/TrackConfirmAction?tLabels={}",
            tracking
        ),
        Some("dhl") => format!(
            "https://www.dhl.com/en/express/tracking.html?AWB={}",
            tracking
        ),
        _ => format!("https://www.google.com/search?q={}", tracking),
    }
}

pub(crate) fn run(
    engine: &ActionEngine,
    carrier: Option<&str>,
    tracking_number: &str,
    tracking_url: Option<&str>,
) -> Result<Feedback, ActionError> {
    let url = tracking_url
        .map(str::to_string)
        .unwrap_or_else(|| carrier_url(carrier, tracking_number));
    engine
        .platform
        .open_url(&url)
        .map_err(ActionError::Capability)?;
    Ok(Feedback::success(format!(
        "Tracking {} with {}",
        tracking_number,
        carrier.unwrap_or("the carrier")
    )))
}
