// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GraphQL-over-HTTP transport to the vendor API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, COOKIE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::graphql::{
    ENDPOINT_STATE_QUERY, EndpointStateVariables, FeatureControlRequest, GRAPHQL_PATH,
    GraphQlRequest, SET_ENDPOINT_FEATURES_MUTATION, SetEndpointFeaturesVariables,
};
use super::{ActionParameters, Transport};
use crate::error::TransportError;
use crate::response::{EndpointStateResponse, RawFeature, SetEndpointFeaturesResponse};
use crate::types::{ActionVerb, FeatureName};

/// Connection settings of the vendor API.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use alexa_hap_lib::protocol::HttpConfig;
///
/// let config = HttpConfig::new("https://alexa.amazon.com/")
///     .with_cookie("session-id=123")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "https://alexa.amazon.com");
/// assert_eq!(config.graphql_url(), "https://alexa.amazon.com/nexus/v1/graphql");
/// assert_eq!(config.cookie(), Some("session-id=123"));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    cookie: Option<String>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the `Cookie` header value sent with every request.
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the cookie header value, if set.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub fn graphql_url(&self) -> String {
        format!("{}{GRAPHQL_PATH}", self.base_url)
    }
}

/// [`Transport`] backed by the vendor GraphQL API.
///
/// ```no_run
/// use alexa_hap_lib::protocol::{HttpConfig, HttpTransport, Transport};
///
/// # async fn example() -> Result<(), alexa_hap_lib::error::TransportError> {
/// let transport = HttpTransport::new(HttpConfig::new("https://alexa.amazon.com"))?;
/// let features = transport.fetch_device_state("amzn1.alexa.endpoint.1").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: HttpConfig,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Http` if the HTTP client cannot be created.
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn post<V, R>(&self, request: &GraphQlRequest<V>) -> Result<R, TransportError>
    where
        V: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut builder = self
            .client
            .post(self.config.graphql_url())
            .header(ACCEPT, "application/json")
            .json(request);
        if let Some(cookie) = &self.config.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        tracing::trace!(body = %body, "Received GraphQL response");
        Ok(serde_json::from_str(&body)?)
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(
                u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            )
        } else {
            TransportError::Http(error)
        }
    }
}

impl Transport for HttpTransport {
    async fn fetch_device_state(
        &self,
        endpoint_id: &str,
    ) -> Result<Vec<RawFeature>, TransportError> {
        tracing::debug!(endpoint = %endpoint_id, "Querying endpoint state");
        let request = GraphQlRequest {
            query: ENDPOINT_STATE_QUERY,
            variables: EndpointStateVariables { endpoint_id },
        };
        let response: EndpointStateResponse = self.post(&request).await?;
        response.into_features()
    }

    async fn invoke_device_action(
        &self,
        endpoint_id: &str,
        feature: FeatureName,
        action: ActionVerb,
        parameters: ActionParameters,
    ) -> Result<(), TransportError> {
        tracing::debug!(
            endpoint = %endpoint_id,
            feature = %feature,
            action = %action,
            "Setting endpoint feature"
        );
        let request = GraphQlRequest {
            query: SET_ENDPOINT_FEATURES_MUTATION,
            variables: SetEndpointFeaturesVariables {
                feature_control_requests: [FeatureControlRequest {
                    endpoint_id,
                    feature_name: feature.as_str(),
                    feature_operation_name: action.as_str(),
                    payload: parameters,
                }],
            },
        };
        let response: SetEndpointFeaturesResponse = self.post(&request).await?;
        response.into_result()
    }
}
