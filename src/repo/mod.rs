use anyhow::Result;

use crate::domain::pull_request::{PullRequest, RepositoryMap};

pub mod github;
pub mod memory;

/// Anything that can list the open pull requests of one repository.
pub trait PullRequestSource {
    fn open_pull_requests(&self, owner: &str, name: &str) -> Result<Vec<PullRequest>>;
}

/// Fetch `owner/name` and store the result under `name`.
///
/// The map is only touched once the query succeeded, so a failing repository
/// leaves whatever entry (if any) it had before.
pub fn fetch_repository(
    source: &dyn PullRequestSource,
    name: &str,
    owner: &str,
    repos: &mut RepositoryMap,
) -> Result<()> {
    log::debug!("fetching open pull requests for {owner}/{name}");
    let prs = source.open_pull_requests(owner, name)?;
    log::debug!("{owner}/{name}: {} open pull requests", prs.len());
    repos.insert(name, prs);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::memory::InMemorySource;
    use super::*;

    fn pr(uri: &str, reviewers: &[&str]) -> PullRequest {
        PullRequest::new(uri, reviewers.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn fetch_stores_prs_in_response_order() {
        let source = InMemorySource::default().with_repo(
            "acme",
            "svc",
            vec![pr("u2", &["bob"]), pr("u1", &["alice", "bob"])],
        );
        let mut repos = RepositoryMap::default();

        fetch_repository(&source, "svc", "acme", &mut repos).unwrap();

        let uris: Vec<_> = repos.get("svc").unwrap().iter().map(|p| p.uri.as_str()).collect();
        assert_eq!(uris, vec!["u2", "u1"]);
    }

    #[test]
    fn fetch_overwrites_previous_entry() {
        let source = InMemorySource::default().with_repo("acme", "svc", vec![pr("new", &[])]);
        let mut repos = RepositoryMap::default();
        repos.insert("svc", vec![pr("old", &[])]);

        fetch_repository(&source, "svc", "acme", &mut repos).unwrap();

        assert_eq!(repos.get("svc").unwrap(), [pr("new", &[])]);
    }

    #[test]
    fn failed_fetch_leaves_map_untouched() {
        let source = InMemorySource::default();
        let mut repos = RepositoryMap::default();
        repos.insert("other", vec![pr("u1", &["alice"])]);
        let before = repos.clone();

        let err = fetch_repository(&source, "missing", "acme", &mut repos).unwrap_err();

        assert!(err.to_string().contains("acme/missing"));
        assert_eq!(repos, before);
    }
}
