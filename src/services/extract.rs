//! Text extraction through an OpenAI-compatible chat-completion endpoint.
//!
//! Turns scraped page text into structured program records.

use super::remote::RemoteClient;
use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default completion budget for program extraction
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// One assistance program as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramInfo {
    #[serde(rename = "Drug Name")]
    pub drug_name: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Program Type")]
    pub program_type: String,
    #[serde(rename = "Eligibility")]
    pub eligibility: String,
    #[serde(rename = "Discount")]
    pub discount: String,
    #[serde(rename = "Application Link")]
    pub application_link: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

const SCHEMA_DESCRIPTION: &str = r#"The JSON should be a list of objects with these fields:

[
  {
    "Drug Name": "string",
    "Manufacturer": "string",
    "Program Type": "string",
    "Eligibility": "string",
    "Discount": "string",
    "Application Link": "string"
  }
]"#;

/// Build the extraction prompt for a block of page text
pub fn build_prompt(text: &str) -> String {
    [
        "Extract the following information from this text. Return ONLY valid JSON.".to_string(),
        SCHEMA_DESCRIPTION.to_string(),
        format!("Text to extract from:\n\"\"\"{}\"\"\"", text),
        "Output ONLY JSON, no explanations or extra text.".to_string(),
    ]
    .join("\n\n")
}

/// Parse model output; unparseable output is logged and yields `None`
pub fn parse_programs(raw: &str) -> Option<Vec<ProgramInfo>> {
    match serde_json::from_str(raw) {
        Ok(programs) => Some(programs),
        Err(e) => {
            tracing::warn!(error = %e, raw_output = raw, "Failed to parse model response as JSON");
            None
        }
    }
}

/// Chat-completion client; credentials are passed in, never read from the environment here
pub struct TextExtractor {
    client: RemoteClient,
    config: ExtractionConfig,
}

impl TextExtractor {
    pub fn new(client: RemoteClient, config: ExtractionConfig) -> Self {
        Self { client, config }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    /// Send one user message and return the trimmed reply text
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ExtractError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ExtractError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        let reply = self
            .client
            .post_json(&self.completions_url(), api_key, &request)
            .await?;

        reply
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|content| content.trim().to_string())
            .ok_or(ExtractError::EmptyResponse)
    }

    /// Extract program records from page text
    pub async fn extract_programs(
        &self,
        text: &str,
        max_tokens: u32,
    ) -> Result<Option<Vec<ProgramInfo>>, ExtractError> {
        let raw = self.complete(&build_prompt(text), max_tokens).await?;
        Ok(parse_programs(&raw))
    }
}
