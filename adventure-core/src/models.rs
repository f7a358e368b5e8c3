use serde::{Deserialize, Serialize};
use crate::{CoreError, CoreResult};

pub const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Raw inbound body. Every field is optional so that an absent field and an
/// empty one fail the same way.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SuggestionParams {
    pub location: Option<String>,
    pub time: Option<String>,
    pub budget: Option<String>,
}

/// Validated request, alive for a single call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    pub location: String,
    pub time: String,
    pub budget: String,
}

impl SuggestionRequest {
    pub fn new(
        location: impl Into<String>,
        time: impl Into<String>,
        budget: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            time: time.into(),
            budget: budget.into(),
        }
    }
}

impl TryFrom<SuggestionParams> for SuggestionRequest {
    type Error = CoreError;

    fn try_from(params: SuggestionParams) -> CoreResult<Self> {
        match (
            non_empty(params.location),
            non_empty(params.time),
            non_empty(params.budget),
        ) {
            (Some(location), Some(time), Some(budget)) => Ok(Self { location, time, budget }),
            _ => Err(CoreError::Validation(MISSING_PARAMETERS.to_string())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A single activity recommendation, as the prompt asks the model to shape it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Short, catchy name
    pub name: String,

    /// One-paragraph pitch for the activity
    pub description: String,

    /// Free-form cost hint, e.g. "Free" or "$10-$20 per person"
    pub estimated_cost: String,

    /// Where the activity could take place
    pub location_hint: String,
}
