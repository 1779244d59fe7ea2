use serde::Deserialize;
use std::sync::Arc;

use crate::core::error::{EmptyResultWarning, FeatureError, ModelError, RecommendError};
use crate::core::features::{donor_name, extract_features};
use crate::core::model::ScoringModel;
use crate::core::ranker::{rank_donors, DEFAULT_TOP_N};
use crate::models::{DonorRecord, DonorTable, FeatureVector, RankedMatch, RecipientQuery, SkippedRow};

/// What to do when one donor row cannot be turned into features
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowFailurePolicy {
    /// Fail the whole query on the first bad row
    #[default]
    Abort,
    /// Leave the row out and report it alongside the result
    Skip,
}

/// Outcome of one recommendation query
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub matches: Vec<RankedMatch>,
    pub total_donors: usize,
    pub skipped: Vec<SkippedRow>,
    pub warning: Option<EmptyResultWarning>,
}

/// Donor recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Feature extraction for every donor row
/// 2. Batch scoring with the pretrained model
/// 3. Ranking and top-N truncation
///
/// The donor table and model are loaded once and shared read-only, so a
/// `Recommender` can serve concurrent queries behind an `Arc`.
#[derive(Clone)]
pub struct Recommender {
    donors: Arc<DonorTable>,
    model: Arc<dyn ScoringModel>,
    top_n: usize,
    policy: RowFailurePolicy,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("donors", &self.donors)
            .field("top_n", &self.top_n)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Recommender {
    pub fn new(donors: Arc<DonorTable>, model: Arc<dyn ScoringModel>) -> Self {
        Self {
            donors,
            model,
            top_n: DEFAULT_TOP_N,
            policy: RowFailurePolicy::default(),
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_policy(mut self, policy: RowFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn donors(&self) -> &DonorTable {
        &self.donors
    }

    pub fn default_top_n(&self) -> usize {
        self.top_n
    }

    /// Recommend the configured default number of donors
    pub fn recommend(&self, recipient: &RecipientQuery) -> Result<Recommendation, RecommendError> {
        self.recommend_top(recipient, self.top_n)
    }

    /// Recommend up to `top_n` donors for `recipient`
    pub fn recommend_top(
        &self,
        recipient: &RecipientQuery,
        top_n: usize,
    ) -> Result<Recommendation, RecommendError> {
        let total_donors = self.donors.len();

        // Stage 1: features
        let mut names: Vec<&str> = Vec::with_capacity(total_donors);
        let mut batch: Vec<FeatureVector> = Vec::with_capacity(total_donors);
        let mut skipped = Vec::new();

        for donor in &self.donors.records {
            match donor_features(donor, recipient) {
                Ok((name, features)) => {
                    names.push(name);
                    batch.push(features);
                }
                Err(e) => match self.policy {
                    RowFailurePolicy::Abort => {
                        tracing::error!(
                            "Aborting recommendation for {}: {}",
                            recipient.name,
                            e
                        );
                        return Err(e.into());
                    }
                    RowFailurePolicy::Skip => {
                        tracing::warn!("Skipping donor on line {}: {}", e.line(), e);
                        skipped.push(SkippedRow {
                            line: e.line(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        // Stage 2: scoring
        let scores = if batch.is_empty() {
            Vec::new()
        } else {
            self.model.predict(&batch)?
        };

        if scores.len() != batch.len() {
            return Err(ModelError::ShapeMismatch {
                expected: batch.len(),
                actual: scores.len(),
            }
            .into());
        }

        // Stage 3: ranking
        let matches = rank_donors(&names, &scores, top_n);

        let warning = if matches.is_empty() {
            tracing::warn!(
                "No donors ranked for {} ({} donors, {} skipped)",
                recipient.name,
                total_donors,
                skipped.len()
            );
            Some(EmptyResultWarning::default())
        } else {
            None
        };

        tracing::info!(
            "Ranked {} of {} donors for {} (blood group needed: {})",
            matches.len(),
            total_donors,
            recipient.name,
            recipient.blood_group_needed
        );

        Ok(Recommendation {
            matches,
            total_donors,
            skipped,
            warning,
        })
    }
}

fn donor_features<'a>(
    donor: &'a DonorRecord,
    recipient: &RecipientQuery,
) -> Result<(&'a str, FeatureVector), FeatureError> {
    let features = extract_features(donor, recipient)?;
    let name = donor_name(donor)?;
    Ok((name, features))
}
