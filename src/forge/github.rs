//! forge::github
//!
//! GitHub implementation of [`ObjectStore`] and [`PullRequests`].
//!
//! # Design
//!
//! - REST v3 git data endpoints (`git/blobs`, `git/trees`, `git/commits`,
//!   `git/ref`, `git/refs`) build the commit graph remotely
//! - REST `pulls` endpoints create, find and update pull requests
//! - GraphQL for auto-merge (`enablePullRequestAutoMerge`, no REST equivalent)
//!
//! # Authentication
//!
//! A static bearer token (personal access token or Actions `GITHUB_TOKEN`).
//! Requests without a token fail with [`ForgeError::AuthRequired`].
//!
//! # Rate Limiting
//!
//! Returns `ForgeError::RateLimited` when limits are hit. Nothing is retried.
//!
//! # Example
//!
//! ```ignore
//! use stagepr::forge::github::GitHubForge;
//! use stagepr::forge::ObjectStore;
//!
//! let forge = GitHubForge::new(Some(token), "owner", "repo");
//! let blob = forge.create_blob(b"hello\n").await?;
//! ```

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{
    CreatePullRequest, ForgeError, MergeMethod, ObjectStore, PullRequest, PullRequests,
    UpdatePullRequest,
};
use crate::core::config::DEFAULT_API_BASE;
use crate::core::tree::TreeOverlayEntry;
use crate::core::types::{BranchName, Oid, RefName};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("stagepr/", env!("CARGO_PKG_VERSION"));

/// GitHub forge implementation.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Bearer token
    token: Option<String>,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("has_token", &self.token.is_some())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubForge {
    /// Create a forge for `owner/repo` on github.com.
    pub fn new(token: Option<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self::with_api_base(token, owner, repo, DEFAULT_API_BASE)
    }

    /// Create a forge against a custom API base URL.
    ///
    /// Use this for GitHub Enterprise (`https://github.example.com/api/v3`).
    /// A trailing slash is ignored.
    pub fn with_api_base(
        token: Option<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base: String = api_base.into();
        Self {
            client: Client::new(),
            token,
            owner: owner.into(),
            repo: repo.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let token = self.token.as_deref().ok_or(ForgeError::AuthRequired)?;
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ForgeError::AuthFailed("token is not a valid header value".into()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// GraphQL endpoint for this API base.
    ///
    /// github.com serves it at `/graphql`; Enterprise at `/api/graphql`
    /// next to `/api/v3`.
    fn graphql_url(&self) -> String {
        match self.api_base.strip_suffix("/v3") {
            Some(root) => format!("{}/graphql", root),
            None => format!("{}/graphql", self.api_base),
        }
    }

    /// Send a request with auth headers and decode a JSON response.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ForgeError> {
        let response = request
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        self.handle_response(response).await
    }

    /// Send a request and ignore the body of a successful response.
    async fn send_discard(&self, request: RequestBuilder) -> Result<(), ForgeError> {
        let response = request
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, ForgeError> {
        let required_permissions = response
            .headers()
            .get("X-Accepted-GitHub-Permissions")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN => {
                let mut err_msg = format!("Permission denied: {}", message);
                if let Some(perms) = required_permissions.filter(|p| !p.is_empty()) {
                    err_msg.push_str(&format!(" [required: {}]", perms));
                }
                ForgeError::AuthFailed(err_msg)
            }
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Execute a GraphQL mutation and surface the first reported error.
    async fn graphql(&self, query: &str, variables: serde_json::Value) -> Result<(), ForgeError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let result: GraphQLResponse = self
            .send(self.client.post(self.graphql_url()).json(&body))
            .await?;

        match result.errors.unwrap_or_default().into_iter().next() {
            Some(error) => Err(ForgeError::ApiError {
                status: 200,
                message: error.message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStore for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn create_blob(&self, content: &[u8]) -> Result<Oid, ForgeError> {
        let body = CreateBlobBody {
            content: base64::engine::general_purpose::STANDARD.encode(content),
            encoding: "base64",
        };

        let created: GitHubSha = self
            .send(self.client.post(self.repo_url("git/blobs")).json(&body))
            .await?;
        debug!(sha = %created.sha, bytes = content.len(), "created blob");
        created.into_oid()
    }

    async fn resolve_ref(&self, refname: &RefName) -> Result<Oid, ForgeError> {
        let url = self.repo_url(&format!("git/ref/{}", refname.api_path()));
        let reference: GitHubRefResponse = self.send(self.client.get(url)).await?;
        reference.object.into_oid()
    }

    async fn create_tree(
        &self,
        base: &Oid,
        overlay: &[TreeOverlayEntry],
    ) -> Result<Oid, ForgeError> {
        let body = CreateTreeBody {
            base_tree: base.as_str(),
            tree: overlay
                .iter()
                .map(|entry| TreeItem {
                    path: &entry.path,
                    mode: entry.mode.as_str(),
                    object_type: "blob",
                    sha: entry.oid.as_ref().map(Oid::as_str),
                })
                .collect(),
        };

        let created: GitHubSha = self
            .send(self.client.post(self.repo_url("git/trees")).json(&body))
            .await?;
        created.into_oid()
    }

    async fn create_commit(
        &self,
        parent: &Oid,
        tree: &Oid,
        message: &str,
    ) -> Result<Oid, ForgeError> {
        let body = CreateCommitBody {
            message,
            tree: tree.as_str(),
            parents: [parent.as_str()],
        };

        let created: GitHubSha = self
            .send(self.client.post(self.repo_url("git/commits")).json(&body))
            .await?;
        created.into_oid()
    }
}

#[async_trait]
impl PullRequests for GitHubForge {
    async fn ref_exists(&self, refname: &RefName) -> Result<bool, ForgeError> {
        match self.resolve_ref(refname).await {
            Ok(_) => Ok(true),
            Err(ForgeError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_ref(&self, refname: &RefName, oid: &Oid) -> Result<(), ForgeError> {
        let body = CreateRefBody {
            ref_name: refname.as_str(),
            sha: oid.as_str(),
        };
        self.send_discard(self.client.post(self.repo_url("git/refs")).json(&body))
            .await
    }

    async fn update_ref(
        &self,
        refname: &RefName,
        oid: &Oid,
        force: bool,
    ) -> Result<(), ForgeError> {
        let url = self.repo_url(&format!("git/refs/{}", refname.api_path()));
        let body = UpdateRefBody {
            sha: oid.as_str(),
            force,
        };
        self.send_discard(self.client.patch(url).json(&body)).await
    }

    async fn list_open_pulls(
        &self,
        head: &BranchName,
        base: &BranchName,
    ) -> Result<Vec<PullRequest>, ForgeError> {
        let head_param = format!("{}:{}", self.owner, head);
        let request = self.client.get(self.repo_url("pulls")).query(&[
            ("head", head_param.as_str()),
            ("base", base.as_str()),
            ("state", "open"),
        ]);

        let pulls: Vec<GitHubPullRequest> = self.send(request).await?;
        Ok(pulls.into_iter().map(Into::into).collect())
    }

    async fn create_pull(&self, request: CreatePullRequest) -> Result<PullRequest, ForgeError> {
        let body = CreatePullBody {
            head: request.head.as_str(),
            base: request.base.as_str(),
            title: &request.title,
            body: request.body.as_deref(),
        };

        let pull: GitHubPullRequest = self
            .send(self.client.post(self.repo_url("pulls")).json(&body))
            .await?;
        Ok(pull.into())
    }

    async fn update_pull(&self, request: UpdatePullRequest) -> Result<PullRequest, ForgeError> {
        let url = self.repo_url(&format!("pulls/{}", request.number));
        let body = UpdatePullBody {
            title: &request.title,
            body: request.body.as_deref(),
        };

        let pull: GitHubPullRequest = self.send(self.client.patch(url).json(&body)).await?;
        Ok(pull.into())
    }

    async fn enable_auto_merge(
        &self,
        pull: &PullRequest,
        method: MergeMethod,
    ) -> Result<(), ForgeError> {
        let node_id = pull.node_id.as_deref().ok_or_else(|| ForgeError::ApiError {
            status: 0,
            message: format!("PR #{} is missing node_id required for auto-merge", pull.number),
        })?;

        self.graphql(
            r#"mutation($id: ID!, $method: PullRequestMergeMethod!) {
                enablePullRequestAutoMerge(input: {pullRequestId: $id, mergeMethod: $method}) {
                    pullRequest { id }
                }
            }"#,
            serde_json::json!({ "id": node_id, "method": method.graphql_name() }),
        )
        .await
    }
}

// --------------------------------------------------------------------------
// API Request/Response Types
// --------------------------------------------------------------------------

#[derive(Serialize)]
struct CreateBlobBody {
    content: String,
    encoding: &'static str,
}

#[derive(Serialize)]
struct CreateTreeBody<'a> {
    base_tree: &'a str,
    tree: Vec<TreeItem<'a>>,
}

/// One tree payload item. A `null` sha deletes the path.
#[derive(Serialize)]
struct TreeItem<'a> {
    path: &'a str,
    mode: &'a str,
    #[serde(rename = "type")]
    object_type: &'a str,
    sha: Option<&'a str>,
}

#[derive(Serialize)]
struct CreateCommitBody<'a> {
    message: &'a str,
    tree: &'a str,
    parents: [&'a str; 1],
}

#[derive(Serialize)]
struct CreateRefBody<'a> {
    #[serde(rename = "ref")]
    ref_name: &'a str,
    sha: &'a str,
}

#[derive(Serialize)]
struct UpdateRefBody<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Serialize)]
struct CreatePullBody<'a> {
    head: &'a str,
    base: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

#[derive(Serialize)]
struct UpdatePullBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// Any response that carries an object `sha`.
#[derive(Deserialize)]
struct GitHubSha {
    sha: String,
}

impl GitHubSha {
    fn into_oid(self) -> Result<Oid, ForgeError> {
        Oid::new(self.sha).map_err(|e| ForgeError::ApiError {
            status: 200,
            message: e.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct GitHubRefResponse {
    object: GitHubSha,
}

/// GitHub PR response format.
#[derive(Deserialize)]
struct GitHubPullRequest {
    number: u64,
    html_url: String,
    head: GitHubRef,
    base: GitHubRef,
    title: String,
    body: Option<String>,
    node_id: Option<String>,
}

/// GitHub ref (head/base) format.
#[derive(Deserialize)]
struct GitHubRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

impl From<GitHubPullRequest> for PullRequest {
    fn from(gh: GitHubPullRequest) -> Self {
        PullRequest {
            number: gh.number,
            url: gh.html_url,
            head: gh.head.ref_name,
            base: gh.base.ref_name,
            title: gh.title,
            body: gh.body,
            node_id: gh.node_id,
        }
    }
}

#[derive(Deserialize)]
struct GraphQLResponse {
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize)]
struct GraphQLError {
    message: String,
}
