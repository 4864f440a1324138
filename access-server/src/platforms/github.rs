//! GitHub REST client

use async_trait::async_trait;
use reqwest::{Method, Url};

use super::{PlatformError, UpstreamResponse, endpoint, parse_base_url};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// GitHub operations used by the directory and the reconciler
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Public account lookup, `GET /users/{account}` (unauthenticated)
    async fn get_user(&self, account: &str) -> Result<UpstreamResponse, PlatformError>;

    /// `PUT /repos/{owner}/{repo}/collaborators/{account}`
    async fn add_collaborator(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        account: &str,
    ) -> Result<UpstreamResponse, PlatformError>;

    /// `DELETE /repos/{owner}/{repo}/collaborators/{account}`
    async fn remove_collaborator(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        account: &str,
    ) -> Result<UpstreamResponse, PlatformError>;

    /// `GET /orgs/{org}/repos`
    async fn list_org_repos(&self, token: &str, org: &str)
    -> Result<UpstreamResponse, PlatformError>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, PlatformError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    async fn call(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
    ) -> Result<UpstreamResponse, PlatformError> {
        let url = endpoint(&self.base_url, segments)?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if method == Method::PUT {
            // GitHub expects an explicit empty body on PUT
            request = request.header(reqwest::header::CONTENT_LENGTH, 0);
        }

        let response = request.send().await?;
        let upstream = UpstreamResponse::read(response).await?;
        tracing::debug!(
            target: "platform",
            platform = "GitHub",
            method = %method,
            path = %segments.join("/"),
            status = upstream.status,
            "GitHub call completed"
        );
        Ok(upstream)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, account: &str) -> Result<UpstreamResponse, PlatformError> {
        self.call(Method::GET, &["users", account], None).await
    }

    async fn add_collaborator(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        account: &str,
    ) -> Result<UpstreamResponse, PlatformError> {
        self.call(
            Method::PUT,
            &["repos", owner, repo, "collaborators", account],
            Some(token),
        )
        .await
    }

    async fn remove_collaborator(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        account: &str,
    ) -> Result<UpstreamResponse, PlatformError> {
        self.call(
            Method::DELETE,
            &["repos", owner, repo, "collaborators", account],
            Some(token),
        )
        .await
    }

    async fn list_org_repos(
        &self,
        token: &str,
        org: &str,
    ) -> Result<UpstreamResponse, PlatformError> {
        self.call(Method::GET, &["orgs", org, "repos"], Some(token))
            .await
    }
}
