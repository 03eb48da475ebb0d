use std::collections::HashMap;

use anyhow::{Result, anyhow};

use super::PullRequestSource;
use crate::domain::pull_request::PullRequest;

/// Canned responses keyed by `owner/name`.
#[derive(Default)]
pub struct InMemorySource {
    repos: HashMap<String, Vec<PullRequest>>,
}

impl InMemorySource {
    pub fn with_repo(
        mut self,
        owner: &str,
        name: &str,
        prs: impl IntoIterator<Item = PullRequest>,
    ) -> Self {
        self.repos
            .insert(format!("{owner}/{name}"), prs.into_iter().collect());
        self
    }
}

impl PullRequestSource for InMemorySource {
    fn open_pull_requests(&self, owner: &str, name: &str) -> Result<Vec<PullRequest>> {
        self.repos
            .get(&format!("{owner}/{name}"))
            .cloned()
            .ok_or_else(|| {
                anyhow!("Could not resolve to a Repository with the name '{owner}/{name}'")
            })
    }
}
