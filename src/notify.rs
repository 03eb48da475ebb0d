use std::io::Write;

use crate::domain::pull_request::ReviewRequestMap;

const BANNER: &str = "Your review is requested for the following PRs";

/// Render the report, or `None` when nothing is waiting on the user.
pub fn render(requests: &ReviewRequestMap) -> Option<String> {
    if requests.is_empty() {
        return None;
    }
    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    for (name, uris) in requests.iter() {
        out.push_str(name);
        out.push_str(":\n");
        for uri in uris {
            out.push_str("\t- ");
            out.push_str(uri);
            out.push('\n');
        }
    }
    out.push('\n');
    Some(out)
}

/// Print the report to stdout. Best effort: write errors are ignored.
pub fn notify(requests: &ReviewRequestMap) {
    notify_to(&mut std::io::stdout().lock(), requests);
}

fn notify_to(w: &mut impl Write, requests: &ReviewRequestMap) {
    if let Some(report) = render(requests) {
        let _ = w.write_all(report.as_bytes());
        let _ = w.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_writes_nothing() {
        let mut buf = Vec::new();
        notify_to(&mut buf, &ReviewRequestMap::default());
        assert!(buf.is_empty());
        assert!(render(&ReviewRequestMap::default()).is_none());
    }

    #[test]
    fn report_lists_repo_and_uris() {
        let map: ReviewRequestMap = [(
            "repoA",
            vec![
                "https://example/pr/1".to_string(),
                "https://example/pr/2".to_string(),
            ],
        )]
        .into_iter()
        .collect();

        let mut buf = Vec::new();
        notify_to(&mut buf, &map);
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "Your review is requested for the following PRs\n\
             repoA:\n\
             \t- https://example/pr/1\n\
             \t- https://example/pr/2\n\
             \n"
        );
    }

    #[test]
    fn repositories_render_in_map_order() {
        let map: ReviewRequestMap = [
            ("zeta", vec!["z1".to_string()]),
            ("alpha", vec!["a1".to_string()]),
        ]
        .into_iter()
        .collect();

        let text = render(&map).unwrap();
        let zeta = text.find("zeta:").unwrap();
        let alpha = text.find("alpha:").unwrap();
        assert!(zeta < alpha);
    }
}
