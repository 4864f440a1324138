//! MongoDB Atlas Admin API client
//!
//! Authenticates with the programmatic API key pair (public key as user,
//! private key as password).

use reqwest::{Method, Url};

use super::{PlatformError, UpstreamResponse, endpoint, parse_base_url};

const ACCEPT: &str = "application/vnd.atlas.2023-01-01+json";

#[derive(Debug, Clone)]
pub struct AtlasClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AtlasClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, PlatformError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn user_url(&self, project_id: &str, username: &str) -> Result<Url, PlatformError> {
        endpoint(
            &self.base_url,
            &["groups", project_id, "databaseUsers", "admin", username],
        )
    }

    /// `GET /groups/{projectId}/databaseUsers/admin/{username}`
    pub async fn get_database_user(
        &self,
        public_key: &str,
        private_key: &str,
        project_id: &str,
        username: &str,
    ) -> Result<UpstreamResponse, PlatformError> {
        let response = self
            .http
            .request(Method::GET, self.user_url(project_id, username)?)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .basic_auth(public_key, Some(private_key))
            .send()
            .await?;
        UpstreamResponse::read(response).await
    }

    /// `PATCH /groups/{projectId}/databaseUsers/admin/{username}` with `{password}`
    pub async fn update_password(
        &self,
        public_key: &str,
        private_key: &str,
        project_id: &str,
        username: &str,
        new_password: &str,
    ) -> Result<UpstreamResponse, PlatformError> {
        let response = self
            .http
            .request(Method::PATCH, self.user_url(project_id, username)?)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .basic_auth(public_key, Some(private_key))
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await?;
        UpstreamResponse::read(response).await
    }
}
