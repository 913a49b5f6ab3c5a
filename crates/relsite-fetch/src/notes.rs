//! Release notes assembled from closed issues of a milestone.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::http::{GITHUB_ACCEPT, HttpClient};

static NEXT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<([^>]*)>\s*;\s*rel="next""#).unwrap());

/// Guard against a server that keeps handing out `next` links.
const MAX_PAGES: usize = 100;

pub const ENHANCEMENT_LABEL: &str = "enhancement";
pub const BUG_LABEL: &str = "bug";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number:    u64,
    pub title:     String,
    #[serde(default)]
    pub milestone: Option<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Milestone {
    pub title: String,
}

impl Issue {
    pub fn in_milestone(&self, title: &str) -> bool {
        self.milestone.as_ref().is_some_and(|m| m.title == title)
    }
}

/// Closed issues carrying `label`, oldest first.
pub fn closed_issues_url(api_base: &str, owner: &str, repo: &str, label: &str) -> String {
    format!(
        "{}/repos/{}/{}/issues?state=closed&direction=asc&labels={}",
        api_base.trim_end_matches('/'),
        owner,
        repo,
        label
    )
}

/// Target of the `rel="next"` entry of a `Link` header.
pub fn next_link(header: &str) -> Option<String> {
    header
        .split(',')
        .find_map(|part| NEXT_LINK.captures(part))
        .map(|caps| caps[1].to_string())
}

/// Walk every page starting at `url`, keeping issues in `milestone`.
pub async fn milestone_issues<C: HttpClient>(
    client: &C,
    url: &str,
    milestone: &str,
) -> Result<Vec<Issue>> {
    let headers = [("Accept".to_string(), GITHUB_ACCEPT.to_string())];
    let mut issues = Vec::new();
    let mut next = Some(url.to_string());
    let mut pages = 0;

    while let Some(url) = next.take() {
        if pages == MAX_PAGES {
            return Err(FetchError::TooManyPages(MAX_PAGES));
        }
        pages += 1;

        let response = client
            .get(&url, &headers)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if response.status != 200 {
            return Err(FetchError::Status {
                status: response.status,
                url,
            });
        }

        let page: Vec<Issue> = serde_json::from_slice(&response.body).map_err(|source| {
            FetchError::Decode {
                url: url.clone(),
                source,
            }
        })?;
        debug!(%url, count = page.len(), "fetched issue page");

        issues.extend(page.into_iter().filter(|i| i.in_milestone(milestone)));
        next = response.header("link").and_then(next_link);
    }

    Ok(issues)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub enhancements: Vec<Issue>,
    pub bugfixes:     Vec<Issue>,
}

impl ReleaseNotes {
    pub async fn collect<C: HttpClient>(
        client: &C,
        api_base: &str,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Self> {
        let enhancements = milestone_issues(
            client,
            &closed_issues_url(api_base, owner, repo, ENHANCEMENT_LABEL),
            milestone,
        )
        .await?;
        let bugfixes = milestone_issues(
            client,
            &closed_issues_url(api_base, owner, repo, BUG_LABEL),
            milestone,
        )
        .await?;

        Ok(Self {
            enhancements,
            bugfixes,
        })
    }
}

impl fmt::Display for ReleaseNotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Enhancements:")?;
        for issue in &self.enhancements {
            writeln!(f, "* (#{}) {}", issue.number, issue.title)?;
        }
        writeln!(f, "\nBugfixes:")?;
        for issue in &self.bugfixes {
            writeln!(f, "* (#{}) {}", issue.number, issue.title)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(number: u64, title: &str) -> Issue {
        Issue {
            number,
            title: title.to_string(),
            milestone: Some(Milestone {
                title: "1.4".to_string(),
            }),
        }
    }

    #[test]
    fn test_next_link() {
        let header = r#"<https://api.github.com/repositories/1/issues?page=2>; rel="next", <https://api.github.com/repositories/1/issues?page=5>; rel="last""#;
        assert_eq!(
            next_link(header).as_deref(),
            Some("https://api.github.com/repositories/1/issues?page=2")
        );
    }

    #[test]
    fn test_next_link_absent_on_last_page() {
        let header = r#"<https://api.github.com/repositories/1/issues?page=1>; rel="first", <https://api.github.com/repositories/1/issues?page=4>; rel="prev""#;
        assert_eq!(next_link(header), None);
    }

    #[test]
    fn test_in_milestone() {
        let mut i = issue(1, "x");
        assert!(i.in_milestone("1.4"));
        assert!(!i.in_milestone("1.3"));
        i.milestone = None;
        assert!(!i.in_milestone("1.4"));
    }

    #[test]
    fn test_render() {
        let notes = ReleaseNotes {
            enhancements: vec![issue(12, "Support TOML job files")],
            bugfixes:     vec![issue(34, "Fix crash on empty jobfile"), issue(40, "Fix log rotation")],
        };
        assert_eq!(
            notes.to_string(),
            "Enhancements:\n* (#12) Support TOML job files\n\nBugfixes:\n* (#34) Fix crash on empty jobfile\n* (#40) Fix log rotation\n"
        );
    }
}
