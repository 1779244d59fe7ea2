use crate::core::compatibility::is_compatible;
use crate::core::error::FeatureError;
use crate::models::domain::columns;
use crate::models::{DonorRecord, FeatureVector, RecipientQuery};

/// Build the model input for one donor against one recipient
///
/// Feature layout:
/// 1. compatibility indicator (1.0 / 0.0)
/// 2. absolute age gap, 0.0 when either age is unknown
/// 3. case-insensitive location match (1.0 / 0.0)
/// 4. donor's number of donations, 0.0 when unknown
/// 5. recipient urgency, 0.0 when unknown
///
/// `blood group` and `location` are required; their absence is an error.
pub fn extract_features(
    donor: &DonorRecord,
    recipient: &RecipientQuery,
) -> Result<FeatureVector, FeatureError> {
    let blood_group = required(donor, columns::BLOOD_GROUP)?;
    let compatible = indicator(is_compatible(blood_group, &recipient.blood_group_needed));

    let age_gap = match (optional_number(donor, columns::AGE)?, recipient.age) {
        (Some(donor_age), Some(recipient_age)) => (donor_age - recipient_age as f64).abs(),
        _ => 0.0,
    };

    let location = required(donor, columns::LOCATION)?;
    let same_location = indicator(location.to_lowercase() == recipient.location.to_lowercase());

    let times_donated = optional_number(donor, columns::TIMES_DONATED)?.unwrap_or(0.0);
    let urgency = recipient.urgency.map(f64::from).unwrap_or(0.0);

    Ok(FeatureVector([
        compatible,
        age_gap,
        same_location,
        times_donated,
        urgency,
    ]))
}

/// Donor display name; required like the matching columns
pub fn donor_name(donor: &DonorRecord) -> Result<&str, FeatureError> {
    required(donor, columns::NAME)
}

#[inline]
fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn required<'a>(donor: &'a DonorRecord, field: &str) -> Result<&'a str, FeatureError> {
    donor.get(field).ok_or_else(|| FeatureError::MissingField {
        field: field.to_string(),
        line: donor.line,
    })
}

/// Numeric column that may be absent or blank
fn optional_number(donor: &DonorRecord, field: &str) -> Result<Option<f64>, FeatureError> {
    let raw = match donor.get(field).map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(None),
    };

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| FeatureError::InvalidNumber {
            field: field.to_string(),
            line: donor.line,
            value: raw.to_string(),
        })
}
