use std::path::PathBuf;

use thiserror::Error;

use super::model::DatasetKind;
use super::trend::MAX_HORIZON_YEARS;

/// Value-level outcomes of the stats pipeline. None of these abort a view;
/// callers drop the affected record or skip the affected overlay.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("ratio {numerator}/{denominator} is undefined")]
    UndefinedRatio { numerator: u32, denominator: u32 },

    #[error("need at least 2 distinct years to fit a trend, got {distinct_years}")]
    InsufficientData { distinct_years: usize },

    #[error("prediction horizon must be between 1 and {} years", MAX_HORIZON_YEARS)]
    InvalidHorizon,
}

/// Why a dataset is absent from the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("{dataset} file not found: {}", path.display())]
    MissingInputFile { dataset: DatasetKind, path: PathBuf },

    #[error("failed to read {dataset} file {}: {message}", path.display())]
    Unreadable {
        dataset: DatasetKind,
        path: PathBuf,
        message: String,
    },
}

impl LoadError {
    pub fn dataset(&self) -> DatasetKind {
        match self {
            LoadError::MissingInputFile { dataset, .. } | LoadError::Unreadable { dataset, .. } => {
                *dataset
            }
        }
    }
}
