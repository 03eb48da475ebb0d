pub mod auth;
pub mod model;

use anyhow::{Result, anyhow};
use model::{GraphQlResponse, RepositoryData};
use octocrab::Octocrab;
use tokio::runtime::Runtime;

use super::PullRequestSource;
use crate::domain::pull_request::PullRequest;

#[derive(Debug, serde::Serialize)]
struct RepositoryVars<'a> {
    owner: &'a str,
    name: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct GraphQlPayload<V> {
    query: &'static str,
    variables: V,
}

// Team requests carry no login and are dropped when decoding.
const OPEN_PULL_REQUESTS_QUERY: &str = r#"
query ($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    pullRequests(states: [OPEN], last: 50) {
      nodes {
        url
        reviewRequests(last: 10) {
          nodes {
            requestedReviewer {
              __typename
              ... on User {
                login
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Turn a raw response into pull requests, surfacing GraphQL level errors.
fn decode_response(
    resp: GraphQlResponse<RepositoryData>,
    owner: &str,
    name: &str,
) -> Result<Vec<PullRequest>> {
    if let Some(errors) = resp.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        return Err(anyhow!(
            "GitHub GraphQL query for {owner}/{name} failed: {}",
            messages.join("; ")
        ));
    }
    let repository = resp
        .data
        .and_then(|d| d.repository)
        .ok_or_else(|| anyhow!("repository {owner}/{name} not found or not accessible"))?;
    Ok(repository.into_pull_requests())
}

/// Blocking GitHub client: one GraphQL request per call on its own runtime.
pub struct GithubSource {
    rt: Runtime,
    octo: Octocrab,
}

impl GithubSource {
    pub fn new(token: &str, api_base: Option<String>) -> Result<Self> {
        let token = token.to_owned();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| anyhow!("failed to build tokio runtime: {e}"))?;

        let octo = rt.block_on(async move {
            let mut builder = Octocrab::builder().personal_token(token);
            if let Some(api) = api_base {
                builder = builder
                    .base_uri(api)
                    .map_err(|e| anyhow!("invalid GitHub API base: {e}"))?;
            }
            builder
                .build()
                .map_err(|e| anyhow!("failed to init GitHub client: {e}"))
        })?;

        Ok(Self { rt, octo })
    }
}

impl PullRequestSource for GithubSource {
    fn open_pull_requests(&self, owner: &str, name: &str) -> Result<Vec<PullRequest>> {
        let payload = GraphQlPayload {
            query: OPEN_PULL_REQUESTS_QUERY,
            variables: RepositoryVars { owner, name },
        };
        let resp: GraphQlResponse<RepositoryData> = self
            .rt
            .block_on(self.octo.graphql(&payload))
            .map_err(|e| anyhow!("GitHub GraphQL query for {owner}/{name} failed: {e}"))?;
        decode_response(resp, owner, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GraphQlResponse<RepositoryData> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_user_reviewers_and_drops_teams() {
        let resp = parse(
            r#"{
              "data": {
                "repository": {
                  "pullRequests": {
                    "nodes": [
                      {
                        "url": "https://github.com/acme/svc/pull/1",
                        "reviewRequests": {
                          "nodes": [
                            {"requestedReviewer": {"__typename": "User", "login": "alice"}},
                            {"requestedReviewer": {"__typename": "Team"}},
                            {"requestedReviewer": null},
                            {"requestedReviewer": {"__typename": "User", "login": "bob"}}
                          ]
                        }
                      },
                      {"url": "https://github.com/acme/svc/pull/2", "reviewRequests": {"nodes": []}}
                    ]
                  }
                }
              }
            }"#,
        );

        let prs = decode_response(resp, "acme", "svc").unwrap();

        assert_eq!(
            prs,
            vec![
                PullRequest::new(
                    "https://github.com/acme/svc/pull/1",
                    vec!["alice".to_string(), "bob".to_string()]
                ),
                PullRequest::new("https://github.com/acme/svc/pull/2", vec![]),
            ]
        );
    }

    #[test]
    fn missing_repository_is_an_error() {
        let resp = parse(r#"{"data": {"repository": null}}"#);
        let err = decode_response(resp, "acme", "gone").unwrap_err();
        assert!(err.to_string().contains("acme/gone"));
    }

    #[test]
    fn graphql_errors_are_surfaced() {
        let resp = parse(
            r#"{"data": null, "errors": [{"message": "Could not resolve to a Repository"}]}"#,
        );
        let err = decode_response(resp, "acme", "svc").unwrap_err();
        assert!(err.to_string().contains("Could not resolve to a Repository"));
    }

    #[test]
    fn query_asks_for_open_prs_with_bounded_pages() {
        let query = OPEN_PULL_REQUESTS_QUERY
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        assert!(query.contains("repository(owner: $owner, name: $name)"));
        assert!(query.contains("pullRequests(states: [OPEN], last: 50)"));
        assert!(query.contains("reviewRequests(last: 10)"));
        assert!(query.contains("... on User { login }"));
    }

    #[test]
    fn empty_error_list_is_not_a_failure() {
        let resp =
            parse(r#"{"data": {"repository": {"pullRequests": {"nodes": null}}}, "errors": []}"#);
        assert!(decode_response(resp, "acme", "svc").unwrap().is_empty());
    }
}
