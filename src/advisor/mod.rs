//! On-demand financial advice from a text-generation service.
//!
//! The advisor never fails upward: every problem turns into one of the fixed
//! messages below so the caller can show it as-is.

mod gemini;
mod prompt;

pub(crate) use gemini::GeminiAdvisor;
pub(crate) use prompt::build_prompt;

use thiserror::Error;

use crate::models::{FinancialSummary, Transaction};

pub(crate) const MISSING_KEY_MESSAGE: &str =
    "**Configuration error:** no API key found. Set GEMINI_API_KEY and try again.";
pub(crate) const FALLBACK_MESSAGE: &str =
    "Sorry, something went wrong reaching the financial assistant. Check your API key or try again later.";
pub(crate) const EMPTY_RESPONSE_MESSAGE: &str = "No analysis could be generated right now.";

#[derive(Debug, Error)]
pub(crate) enum AdvisoryError {
    #[error("no API key configured")]
    MissingKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response had no text")]
    EmptyResponse,
}

impl AdvisoryError {
    /// The text shown to the user in place of advice.
    pub(crate) fn user_message(&self) -> &'static str {
        match self {
            Self::MissingKey => MISSING_KEY_MESSAGE,
            Self::EmptyResponse => EMPTY_RESPONSE_MESSAGE,
            Self::Transport(_) | Self::Status { .. } => FALLBACK_MESSAGE,
        }
    }
}

pub(crate) trait Advisor: Send + Sync {
    /// Fetch raw advice text. Implementations report failures here; callers
    /// normally go through [`Advisor::advise`].
    fn request(
        &self,
        summary: &FinancialSummary,
        transactions: &[Transaction],
    ) -> Result<String, AdvisoryError>;

    /// Advice text, or a user-readable fallback.
    fn advise(&self, summary: &FinancialSummary, transactions: &[Transaction]) -> String {
        match self.request(summary, transactions) {
            Ok(text) => text,
            Err(AdvisoryError::MissingKey) => {
                tracing::warn!("Advice requested without an API key");
                MISSING_KEY_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::error!("Advice request failed: {e}");
                e.user_message().to_string()
            }
        }
    }
}
