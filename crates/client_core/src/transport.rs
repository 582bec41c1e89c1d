//! HTTP gateway: the only place that knows about the base URL and the wire.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use shared::error::ApiError;
use tracing::{debug, warn};
use url::Url;

use crate::{config::ClientSettings, error::ConfigError, error::TransportError};

/// Relative API location: path segments plus query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Resolves against `base`, percent-encoding every segment.
    pub fn resolve(&self, base: &Url) -> Result<Url, TransportError> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| TransportError::InvalidUrl {
                endpoint: self.to_string(),
                message: format!("base url '{base}' cannot carry a path"),
            })?;
            path.pop_if_empty();
            path.extend(&self.segments);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let sep = if index == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, endpoint: &Endpoint) -> Result<Value, TransportError>;
    async fn post(&self, endpoint: &Endpoint, body: &Value) -> Result<Value, TransportError>;
}

pub struct HttpGateway {
    http: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::InvalidUrl {
                endpoint: base_url.to_string(),
                message: format!("failed to build http client: {err}"),
            })?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, GatewayBuildError> {
        let base_url = settings.parsed_base_url()?;
        Ok(Self::new(base_url, settings.request_timeout())?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, TransportError> {
        let network = |err: reqwest::Error| TransportError::Network {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        };

        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(network)?;
        let status = response.status();
        let body = response.text().await.map_err(network)?;

        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), &body);
            warn!(
                endpoint = %endpoint,
                status = status.as_u16(),
                "api request rejected: {}",
                error.message
            );
            return Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                error,
            });
        }

        serde_json::from_str(&body).map_err(|err| TransportError::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl ApiTransport for HttpGateway {
    async fn get(&self, endpoint: &Endpoint) -> Result<Value, TransportError> {
        let url = endpoint.resolve(&self.base_url)?;
        debug!(%url, "GET");
        self.send(endpoint, self.http.get(url)).await
    }

    async fn post(&self, endpoint: &Endpoint, body: &Value) -> Result<Value, TransportError> {
        let url = endpoint.resolve(&self.base_url)?;
        debug!(%url, %body, "POST");
        // `json` also sets `Content-Type: application/json`.
        self.send(endpoint, self.http.post(url).json(body)).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayBuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
