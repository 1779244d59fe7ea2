use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Normalized column names the matcher looks up
pub mod columns {
    pub const NAME: &str = "name";
    pub const BLOOD_GROUP: &str = "blood group";
    pub const AGE: &str = "age";
    pub const LOCATION: &str = "location";
    pub const TIMES_DONATED: &str = "number of times donated";

    /// Columns every donor row must carry to be ranked
    pub const REQUIRED: [&str; 3] = [NAME, BLOOD_GROUP, LOCATION];
}

/// The eight canonical ABO/Rh types accepted for a recipient
pub const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Number of positions in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = 5;

/// One donor row, keyed by normalized (trimmed, lower-cased) column name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRecord {
    /// Zero-based position of the row among the data rows of the table
    pub row: usize,
    /// One-based line in the source file
    pub line: usize,
    pub fields: HashMap<String, String>,
}

impl DonorRecord {
    /// Record whose line is inferred from a file with no blank lines
    pub fn new(row: usize, fields: HashMap<String, String>) -> Self {
        Self {
            row,
            line: row + 2,
            fields,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Look up a field by its normalized column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }
}

/// Donor record set plus the header it was read with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonorTable {
    pub columns: Vec<String>,
    pub records: Vec<DonorRecord>,
}

impl DonorTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Required columns absent from the header
    pub fn missing_required_columns(&self) -> Vec<String> {
        columns::REQUIRED
            .iter()
            .filter(|column| !self.has_column(column))
            .map(|column| column.to_string())
            .collect()
    }
}

/// A single recipient request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientQuery {
    pub name: String,
    #[serde(rename = "bloodGroupNeeded")]
    pub blood_group_needed: String,
    #[serde(default)]
    pub age: Option<u32>,
    pub location: String,
    #[serde(default)]
    pub urgency: Option<u8>,
}

/// Positional model input for one (donor, recipient) pair
///
/// Order: compatibility, age gap, location match, donation count, urgency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn compatibility(&self) -> f64 {
        self.0[0]
    }

    pub fn age_gap(&self) -> f64 {
        self.0[1]
    }

    pub fn location_match(&self) -> f64 {
        self.0[2]
    }

    pub fn times_donated(&self) -> f64 {
        self.0[3]
    }

    pub fn urgency(&self) -> f64 {
        self.0[4]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Ranked recommendation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(rename = "donorName")]
    pub donor_name: String,
    pub score: f64,
}

impl RankedMatch {
    pub fn new(donor_name: impl Into<String>, score: f64) -> Self {
        Self {
            donor_name: donor_name.into(),
            score,
        }
    }

    /// Score rounded to two decimals for display
    pub fn display_score(&self) -> String {
        format!("{:.2}", self.score)
    }
}

impl fmt::Display for RankedMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.donor_name, self.score)
    }
}

/// Donor row that was left out of a ranking under the skip policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}
