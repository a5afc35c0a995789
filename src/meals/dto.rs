use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::meals::repo_types::Meal;

pub const MIN_TEXT_LEN: usize = 3;

/// Request body shared by meal create and update.
#[derive(Debug, Deserialize)]
pub struct MealPayload {
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
    pub is_inside_diet: bool,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} must have at least {MIN_TEXT_LEN} characters")]
    TextTooShort(&'static str),
}

impl MealPayload {
    /// Checks the text fields and returns them trimmed, the way they are
    /// stored. `consumed_at` is already a valid timestamp once deserialized.
    pub fn validated_text(&self) -> Result<(&str, &str), ValidationError> {
        let name = self.name.trim();
        if name.chars().count() < MIN_TEXT_LEN {
            return Err(ValidationError::TextTooShort("name"));
        }
        let description = self.description.trim();
        if description.chars().count() < MIN_TEXT_LEN {
            return Err(ValidationError::TextTooShort("description"));
        }
        Ok((name, description))
    }
}

/// One calendar day of a user's history, newest day first in the list view.
#[derive(Debug, Serialize)]
pub struct DayBucket {
    pub day: String,
    pub meals_of_day: Vec<Meal>,
}

/// Adherence numbers for a user's full history.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total_meals: u32,
    pub total_meals_inside_diet: u32,
    pub total_meals_off_diet: u32,
    pub best_sequence_of_meals_inside_diet: u32,
}
