use anyhow::Result;

use crate::config::RepoRef;
use crate::domain::pull_request::{RepositoryMap, ReviewRequestMap};
use crate::repo::{PullRequestSource, fetch_repository};

/// One fetch cycle: poll every repository in order, then filter for `username`.
///
/// The first failing repository aborts the cycle; nothing is reported for it
/// or for the repositories after it.
pub fn collect_review_requests(
    source: &dyn PullRequestSource,
    username: &str,
    repos: &[RepoRef],
    dedup: bool,
) -> Result<ReviewRequestMap> {
    let mut fetched = RepositoryMap::default();
    for repo in repos {
        fetch_repository(source, &repo.name, &repo.owner, &mut fetched)?;
    }
    log::debug!("fetched {} repositories", fetched.len());
    let requests = filter_review_requests(username, &fetched);
    Ok(if dedup { requests.dedup() } else { requests })
}

/// Collect the pull requests that ask `username` for a review.
///
/// Matching is exact and case-sensitive. A login listed twice on the same pull
/// request yields its URI twice; see [`ReviewRequestMap::dedup`].
pub fn filter_review_requests(username: &str, repos: &RepositoryMap) -> ReviewRequestMap {
    let mut out = ReviewRequestMap::default();
    for (name, prs) in repos.iter() {
        for pr in prs {
            for reviewer in &pr.requested_reviewers {
                if reviewer == username {
                    out.push(name, pr.uri.as_str());
                }
            }
        }
    }
    out
}
