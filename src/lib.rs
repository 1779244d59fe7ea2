//! Donor Match - blood donor recommendation service
//!
//! Scores every donor in a loaded table against one recipient request with a
//! pretrained compatibility model and returns the top-ranked candidates.

pub mod bootstrap;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{is_compatible, extract_features, rank_donors, Recommender, Recommendation, RecommendError};
pub use crate::models::{DonorRecord, DonorTable, RecipientQuery, FeatureVector, RankedMatch, RecommendRequest, RecommendResponse};
