use chrono::{DateTime, Utc};

use super::ActionEngine;
use crate::core::feedback::{ActionError, Feedback};
use crate::extract::dates;

pub(crate) fn run(
    engine: &ActionEngine,
    event_title: &str,
    event_date: Option<&str>,
    organizer: Option<&str>,
    location: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Feedback, ActionError> {
    let mut added_event = false;
    if let Some(phrase) = event_date {
        let start = dates::parse_date_phrase(phrase, now);
        engine
            .platform
            .add_calendar_event(event_title, start, location)
            .map_err(ActionError::Capability)?;
        added_event = true;
    }

    if let Some(organizer) = organizer {
        let body = format!("Count me in for {}!", event_title);
        engine
            .platform
            .compose_message(organizer, &body)
            .map_err(ActionError::Capability)?;
        Ok(Feedback::success(format!("RSVP sent for {}", event_title)))
    } else if added_event {
        Ok(Feedback::success(format!(
            "{} added to your calendar",
            event_title
        )))
    } else {
        Err(ActionError::Invalid(
            "No event date or organizer to respond to".to_string(),
        ))
    }
}
