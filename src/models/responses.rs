use serde::{Deserialize, Serialize};

use crate::models::domain::{RankedMatch, SkippedRow};

/// One ranked donor as returned over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    #[serde(rename = "donorName")]
    pub donor_name: String,
    pub score: f64,
    #[serde(rename = "displayScore")]
    pub display_score: String,
}

impl From<RankedMatch> for MatchEntry {
    fn from(value: RankedMatch) -> Self {
        let display_score = value.display_score();
        Self {
            donor_name: value.donor_name,
            score: value.score,
            display_score,
        }
    }
}

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recipient: String,
    pub matches: Vec<MatchEntry>,
    #[serde(rename = "totalDonors")]
    pub total_donors: usize,
    #[serde(rename = "skippedRows", default)]
    pub skipped_rows: Vec<SkippedRow>,
    #[serde(default)]
    pub warning: Option<String>,
}

/// Donor table summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorSummaryResponse {
    pub columns: Vec<String>,
    #[serde(rename = "donorCount")]
    pub donor_count: usize,
    /// Required columns the header lacks; any entry means every query will fail
    #[serde(rename = "missingColumns", default)]
    pub missing_columns: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "donorsLoaded")]
    pub donors_loaded: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
