//! Typed HTTP client for the notes API.

use notes_types::{CreateNoteRequest, MessageResponse, Note, UpdateNoteRequest};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx answer; `message` comes from the server's `{message}` body.
    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }
}

pub struct NotesClient {
    /// Collection URL, e.g. `http://localhost:3000/api/notes`.
    base_url: String,
    client: reqwest::Client,
}

impl NotesClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a preconfigured reqwest client (timeouts, proxies).
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn note_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        let resp = self.client.get(&self.base_url).send().await?;
        handle_response(resp).await
    }

    pub async fn create_note(&self, title: &str, content: &str) -> Result<Note, ClientError> {
        let resp = self
            .client
            .post(&self.base_url)
            .json(&CreateNoteRequest::new(title, content))
            .send()
            .await?;
        handle_response(resp).await
    }

    pub async fn update_note(
        &self,
        id: &str,
        update: &UpdateNoteRequest,
    ) -> Result<Note, ClientError> {
        let resp = self.client.put(self.note_url(id)).json(update).send().await?;
        handle_response(resp).await
    }

    /// Returns the server's confirmation message.
    pub async fn delete_note(&self, id: &str) -> Result<String, ClientError> {
        let resp = self.client.delete(self.note_url(id)).send().await?;
        let body: MessageResponse = handle_response(resp).await?;
        Ok(body.message)
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<MessageResponse>()
            .await
            .map(|m| m.message)
            .unwrap_or_else(|_| FALLBACK_MESSAGE.to_string());
        return Err(ClientError::Api { status, message });
    }
    Ok(resp.json::<T>().await?)
}
