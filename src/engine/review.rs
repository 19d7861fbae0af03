use super::ActionEngine;
use crate::core::feedback::{ActionError, Feedback};

pub(crate) fn run(
    engine: &ActionEngine,
    product_name: &str,
    review_url: Option<&str>,
) -> Result<Feedback, ActionError> {
    if let Some(url) = review_url {
        engine
            .platform
            .open_url(url)
            .map_err(ActionError::Capability)?;
        Ok(Feedback::success(format!(
            "Review page opened for {}",
            product_name
        )))
    } else {
        engine
            .platform
            .share_text(&format!("My review of {}", product_name))
            .map_err(ActionError::Capability)?;
        Ok(Feedback::success(format!(
            "Share sheet opened for your {} review",
            product_name
        )))
    }
}
