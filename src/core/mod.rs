// Core algorithm exports
pub mod compatibility;
pub mod error;
pub mod features;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod ranker;

pub use compatibility::{is_compatible, matching_rule, CompatibilityRule};
pub use error::{DataSourceError, EmptyResultWarning, FeatureError, ModelError, RecommendError};
pub use features::extract_features;
pub use loader::{load_donor_table, parse_donor_table};
pub use model::{LogisticModel, ScoringModel};
pub use pipeline::{Recommendation, Recommender, RowFailurePolicy};
pub use ranker::{rank_donors, DEFAULT_TOP_N};
