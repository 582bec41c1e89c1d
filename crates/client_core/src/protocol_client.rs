use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{GameType, Strategy},
    protocol::{GuessRequest, GuessResponse, MediaResponse, QuestionMetadataResponse},
};
use tracing::info;

use crate::{
    error::TransportError,
    transport::{ApiTransport, Endpoint},
};

/// Typed view of the three backend endpoints over any [`ApiTransport`].
#[derive(Clone)]
pub struct AkinatorApi {
    transport: Arc<dyn ApiTransport>,
}

impl AkinatorApi {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub fn guess_endpoint(game_type: GameType, strategy: Strategy) -> Endpoint {
        Endpoint::new(["guess", game_type.as_str()]).with_query("strategy", strategy.as_str())
    }

    pub fn question_endpoint(game_type: GameType, question: &str) -> Endpoint {
        Endpoint::new(["question", game_type.as_str(), question])
    }

    pub fn media_endpoint(guess: &str, category: u8) -> Endpoint {
        Endpoint::new(["media", guess]).with_query("category", category)
    }

    pub async fn request_guess(
        &self,
        game_type: GameType,
        strategy: Strategy,
        request: &GuessRequest,
    ) -> Result<GuessResponse, TransportError> {
        let endpoint = Self::guess_endpoint(game_type, strategy);
        let body = serde_json::to_value(request).map_err(|err| TransportError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("failed to encode guess request: {err}"),
        })?;
        info!(
            game_type = %game_type,
            strategy = %strategy,
            history_len = request.questions.len(),
            "api: request guess"
        );
        let raw = self.transport.post(&endpoint, &body).await?;
        decode(&endpoint, raw)
    }

    pub async fn question_metadata(
        &self,
        game_type: GameType,
        question: &str,
    ) -> Result<QuestionMetadataResponse, TransportError> {
        let endpoint = Self::question_endpoint(game_type, question);
        let raw = self.transport.get(&endpoint).await?;
        decode(&endpoint, raw)
    }

    pub async fn guess_media(
        &self,
        guess: &str,
        category: u8,
    ) -> Result<MediaResponse, TransportError> {
        let endpoint = Self::media_endpoint(guess, category);
        let raw = self.transport.get(&endpoint).await?;
        decode(&endpoint, raw)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &Endpoint, raw: Value) -> Result<T, TransportError> {
    serde_json::from_value(raw).map_err(|err| TransportError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}
