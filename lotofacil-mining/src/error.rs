use lotofacil_data::models::DrawError;
use thiserror::Error;

/// Errors raised by the analysis pipeline. None of them is transient: each one
/// points at a data or configuration problem the caller has to fix.
#[derive(Debug, Error)]
pub enum MiningError {
    /// A draw breaks the game invariants; `row` is the 0-based index in the history.
    #[error("Tirage invalide (ligne {row})")]
    Validation {
        row: usize,
        #[source]
        source: DrawError,
    },

    #[error("Données insuffisantes : {0}")]
    InsufficientData(String),

    #[error("Paramètre `{parameter}` invalide : {reason}")]
    Configuration {
        parameter: &'static str,
        reason: String,
    },
}

impl MiningError {
    pub(crate) fn config(parameter: &'static str, reason: impl Into<String>) -> Self {
        MiningError::Configuration {
            parameter,
            reason: reason.into(),
        }
    }
}

pub type MiningResult<T> = std::result::Result<T, MiningError>;
