use crate::errors::{ChatError, ChatResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Path of the one endpoint the backend exposes.
pub const CHAT_ENDPOINT: &str = "/chat";

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    #[serde(default)]
    answer: Option<String>,
}

/// HTTP client for the question-answering backend.
///
/// One request at a time is the caller's concern; the client itself is
/// stateless and cheap to clone behind an `Arc`.
#[derive(Debug)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts a question and returns the backend's answer.
    ///
    /// Non-2xx statuses become `ChatError::Http` with the response body kept
    /// as diagnostic text. Transport and body-decode failures are
    /// `ChatError::Network`. A well-formed 2xx body whose `answer` field is
    /// missing or an empty string is `ChatError::InvalidResponse`; empty is
    /// intentionally not a valid answer. No timeout is applied: an
    /// unresponsive backend keeps the request outstanding until the
    /// connection settles.
    pub async fn ask(&self, question: &str) -> ChatResult<String> {
        let url = format!("{}{}", self.base_url, CHAT_ENDPOINT);
        log::debug!("POST {} question={:?}", url, question);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&AskRequest { question })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("backend returned {}: {}", status, body);
            return Err(ChatError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data: AskResponse = response.json().await?;

        match data.answer {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Err(ChatError::InvalidResponse),
        }
    }
}
