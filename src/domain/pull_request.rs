/// An open pull request as seen by one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub uri: String,
    /// Logins of requested user reviewers, in API response order.
    pub requested_reviewers: Vec<String>,
}

impl PullRequest {
    pub fn new(uri: impl Into<String>, requested_reviewers: Vec<String>) -> Self {
        Self {
            uri: uri.into(),
            requested_reviewers,
        }
    }
}

/// Repository name -> open pull requests, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryMap {
    entries: Vec<(String, Vec<PullRequest>)>,
}

impl RepositoryMap {
    /// Insert or overwrite in place; an overwritten key keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, prs: Vec<PullRequest>) {
        let name = name.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            *existing = prs;
            return;
        }
        self.entries.push((name, prs));
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&[PullRequest]> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PullRequest])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Repository name -> URIs of pull requests awaiting the configured user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRequestMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ReviewRequestMap {
    pub fn push(&mut self, name: &str, uri: impl Into<String>) {
        let uri = uri.into();
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, uris)) => uris.push(uri),
            None => self.entries.push((name.to_string(), vec![uri])),
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop repeated URIs within each repository, keeping the first occurrence.
    pub fn dedup(mut self) -> Self {
        for (_, uris) in &mut self.entries {
            let mut seen = std::collections::HashSet::new();
            uris.retain(|u| seen.insert(u.clone()));
        }
        self
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for ReviewRequestMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (name, uris) in iter {
            let name = name.into();
            for uri in uris {
                map.push(&name, uri);
            }
        }
        map
    }
}
