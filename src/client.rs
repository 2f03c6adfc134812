//! Claimable database provisioning over the Instagres HTTP API.
//!
//! Provisioning is two sequential calls: a POST that creates the database,
//! then a GET that fetches its connection details. The claim URL is derived
//! locally and never fetched.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InstagresError, InstagresResult};

/// Hosted provisioning service.
const DEFAULT_HOST: &str = "https://neon.new";

/// Referrer reported to the service when callers have no better identifier.
pub const DEFAULT_REFERRER: &str = "neon/instagres";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A provisioned claimable database.
///
/// The database lives until `expires_at` unless its claim URL is visited
/// first, which makes it permanent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimableDatabase {
    /// PostgreSQL connection string for the new database.
    pub connection_string: String,
    /// URL a user visits to claim the database before it expires.
    pub claim_url: String,
    /// Expiry timestamp as reported by the service.
    pub expires_at: String,
}

/// Client for the provisioning API.
///
/// # Example
/// ```ignore
/// use instagres::{Client, DEFAULT_REFERRER};
///
/// let client = Client::new()?;
/// let db = client.create_claimable_database(DEFAULT_REFERRER, None).await?;
/// println!("{}", db.claim_url);
/// ```
pub struct Client {
    http: reqwest::Client,
    host: String,
}

impl Client {
    /// Create a client with the default host and timeouts.
    pub fn new() -> InstagresResult<Self> {
        ClientBuilder::new().build()
    }

    /// Start building a client with a custom host or timeouts.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a claimable database and fetch its connection details.
    ///
    /// A random UUID v4 identifies the database when `db_id` is `None`. The
    /// referrer is sent url-encoded as a query parameter, omitted when
    /// empty. The two underlying calls run sequentially, each bounded by
    /// the configured timeouts, and are never retried.
    pub async fn create_claimable_database(
        &self,
        referrer: &str,
        db_id: Option<Uuid>,
    ) -> InstagresResult<ClaimableDatabase> {
        let db_id = db_id.unwrap_or_else(Uuid::new_v4);
        let database_url = format!("{}/api/v1/database/{}", self.host, db_id);

        tracing::debug!("creating claimable database {db_id}");
        let mut request = self
            .http
            .post(&database_url)
            .header(CONTENT_TYPE, "application/json");
        if !referrer.is_empty() {
            request = request.query(&[("referrer", referrer)]);
        }
        let response = request.send().await.map_err(http_failed)?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(InstagresError::network(format!(
                "failed to create database (HTTP status {})",
                status.as_u16()
            )));
        }

        tracing::debug!("fetching connection details for {db_id}");
        let response = self
            .http
            .get(&database_url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(http_failed)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(InstagresError::network(format!(
                "failed to retrieve database information (HTTP status {})",
                status.as_u16()
            )));
        }

        let info: serde_json::Value = response.json().await.map_err(|e| {
            InstagresError::invalid_response(format!("invalid JSON from API: {e}"))
        })?;
        let connection_string = require_text_field(&info, "connection_string")?;
        let expires_at = require_text_field(&info, "expires_at")?;

        Ok(ClaimableDatabase {
            connection_string,
            claim_url: self.claim_url(db_id),
            expires_at,
        })
    }

    /// Claim URL for a database id. Derived locally, never fetched.
    pub fn claim_url(&self, db_id: Uuid) -> String {
        format!("{}/database/{}", self.host, db_id)
    }
}

fn http_failed(err: reqwest::Error) -> InstagresError {
    InstagresError::network(format!("HTTP request failed: {err}"))
}

fn require_text_field(info: &serde_json::Value, field: &str) -> InstagresResult<String> {
    info.get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            InstagresError::invalid_response(format!("API response missing {field} field"))
        })
}

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    host: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl ClientBuilder {
    /// Builder with the default host and timeouts.
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the provisioning service host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Connect timeout applied to each of the two calls.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Total timeout applied to each of the two calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> InstagresResult<Client> {
        let http = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                InstagresError::network(format!("failed to initialize HTTP client: {e}"))
            })?;
        Ok(Client {
            http,
            host: self.host.trim_end_matches('/').to_owned(),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_url_format() {
        let client = Client::new().expect("Failed to build client");
        let db_id = Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap();
        assert_eq!(
            client.claim_url(db_id),
            "https://neon.new/database/123e4567-e89b-12d3-a456-426614174000"
        );
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = Client::builder()
            .host("http://localhost:4444/")
            .build()
            .expect("Failed to build client");
        let db_id = Uuid::new_v4();
        assert_eq!(
            client.claim_url(db_id),
            format!("http://localhost:4444/database/{db_id}")
        );
    }
}
