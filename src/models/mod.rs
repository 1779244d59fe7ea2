// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DonorRecord, DonorTable, RecipientQuery, FeatureVector, RankedMatch, SkippedRow, BLOOD_GROUPS, FEATURE_COUNT};
pub use requests::RecommendRequest;
pub use responses::{RecommendResponse, MatchEntry, DonorSummaryResponse, HealthResponse, ErrorResponse};
