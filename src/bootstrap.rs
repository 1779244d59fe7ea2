use std::sync::Arc;
use thiserror::Error;
use tokio::task::{self, JoinError};

use crate::config::Settings;
use crate::core::{load_donor_table, DataSourceError, LogisticModel, ModelError, Recommender};

/// Failures that stop the service before it starts listening
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load donor data: {0}")]
    Data(#[from] DataSourceError),

    #[error("Failed to load scoring model: {0}")]
    Model(#[from] ModelError),

    #[error("Loader task did not complete: {0}")]
    Join(#[from] JoinError),
}

/// Read the donor table and model artifact and build the shared [`Recommender`]
///
/// Both files are read on the blocking pool, concurrently.
pub async fn load_recommender(settings: &Settings) -> Result<Recommender, StartupError> {
    let donor_path = settings.data.donor_path.clone();
    let delimiter = settings.data.delimiter;
    let model_path = settings.model.path.clone();

    let donors = task::spawn_blocking(move || load_donor_table(donor_path, delimiter));
    let model = task::spawn_blocking(move || LogisticModel::load(model_path));

    let (donors, model) = tokio::join!(donors, model);
    let donors = donors??;
    let model = model??;

    Ok(Recommender::new(Arc::new(donors), Arc::new(model))
        .with_top_n(settings.matching.default_top_n)
        .with_policy(settings.matching.row_failure_policy))
}
