use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{RecipientQuery, BLOOD_GROUPS};

/// Request to recommend donors for a recipient
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "validate_blood_group"))]
    #[serde(alias = "blood_group_needed", rename = "bloodGroupNeeded")]
    pub blood_group_needed: String,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub age: Option<u32>,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(min = 1, max = 10))]
    #[serde(default)]
    pub urgency: Option<u8>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

impl RecommendRequest {
    pub fn to_query(&self) -> RecipientQuery {
        RecipientQuery {
            name: self.name.clone(),
            blood_group_needed: self.blood_group_needed.trim().to_uppercase(),
            age: self.age,
            location: self.location.clone(),
            urgency: self.urgency,
        }
    }
}

fn validate_blood_group(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    if BLOOD_GROUPS.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("blood_group"))
    }
}
