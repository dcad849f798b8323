use serde::{Deserialize, Serialize};

use super::{build_prompt, Advisor, AdvisoryError};
use crate::config::AdvisorConfig;
use crate::models::{FinancialSummary, Transaction};

/// Google Generative Language `generateContent` client.
pub(crate) struct GeminiAdvisor {
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined.
    pub(super) fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiAdvisor {
    pub(crate) fn new(config: &AdvisorConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Local gateways are reached directly, never through a system proxy.
    fn is_local(&self) -> bool {
        reqwest::Url::parse(&self.endpoint)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .is_some_and(|h| matches!(h.as_str(), "localhost" | "127.0.0.1" | "[::1]"))
    }
}

impl Advisor for GeminiAdvisor {
    fn request(
        &self,
        summary: &FinancialSummary,
        transactions: &[Transaction],
    ) -> Result<String, AdvisoryError> {
        let api_key = match self.api_key.as_deref() {
            Some(k) if !k.trim().is_empty() => k,
            _ => return Err(AdvisoryError::MissingKey),
        };

        let prompt = build_prompt(summary, transactions);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        tracing::info!("Requesting advice from {}", self.model);
        let mut builder = reqwest::blocking::Client::builder().timeout(None);
        if self.is_local() {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        let response = client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdvisoryError::Status { status, body });
        }

        let parsed: GenerateResponse = response.json()?;
        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(AdvisoryError::EmptyResponse);
        }
        tracing::debug!("Received {} bytes of advice", text.len());
        Ok(text)
    }
}
