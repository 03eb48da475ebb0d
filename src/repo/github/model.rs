//! Response schema for the open pull request query.

use serde::Deserialize;

use crate::domain::pull_request::PullRequest;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    #[serde(rename = "pullRequests")]
    pub pull_requests: PullRequestConnection,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestConnection {
    pub nodes: Option<Vec<PullRequestNode>>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestNode {
    pub url: String,
    #[serde(rename = "reviewRequests")]
    pub review_requests: Option<ReviewRequestConnection>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequestConnection {
    pub nodes: Option<Vec<ReviewRequestNode>>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequestNode {
    #[serde(rename = "requestedReviewer")]
    pub requested_reviewer: Option<RequestedReviewer>,
}

#[derive(Debug, Deserialize)]
pub struct RequestedReviewer {
    #[serde(rename = "__typename")]
    pub typename: Option<String>,
    pub login: Option<String>, // User
}

impl RequestedReviewer {
    /// Login of a user reviewer; teams, bots and mannequins yield `None`.
    fn user_login(self) -> Option<String> {
        if self.typename.as_deref() != Some("User") {
            return None;
        }
        self.login
    }
}

impl From<PullRequestNode> for PullRequest {
    fn from(node: PullRequestNode) -> Self {
        let requested_reviewers = node
            .review_requests
            .and_then(|rr| rr.nodes)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|n| n.requested_reviewer?.user_login())
            .collect();
        PullRequest::new(node.url, requested_reviewers)
    }
}

impl RepositoryNode {
    pub fn into_pull_requests(self) -> Vec<PullRequest> {
        self.pull_requests
            .nodes
            .unwrap_or_default()
            .into_iter()
            .map(PullRequest::from)
            .collect()
    }
}
