//! Turns a GitHub repository reference into its `main` branch archive URL.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid repository link: {0}")]
pub struct LinkError(pub String);

static SSH_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@github\.com:([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$")
        .expect("static regex")
});

static HTTPS_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(?:([^@/\s]+)@)?github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$")
        .expect("static regex")
});

/// Resolve `git@github.com:owner/repo(.git)` or `https://[token@]github.com/owner/repo(.git)`
/// to `https://[token@]github.com/owner/repo/archive/refs/heads/main.zip`.
pub fn resolve(link: &str) -> Result<String, LinkError> {
    let link = link.trim();

    if let Some(caps) = SSH_FORM.captures(link) {
        return Ok(archive_url(None, &caps[1], &caps[2]));
    }

    if let Some(caps) = HTTPS_FORM.captures(link) {
        let token = caps.get(1).map(|m| m.as_str());
        return Ok(archive_url(token, &caps[2], &caps[3]));
    }

    Err(LinkError(link.to_string()))
}

/// Whether the link points at github.com at all, valid or not
pub fn is_github_link(link: &str) -> bool {
    let link = link.trim();
    link.starts_with("git@github.com:") || link.contains("github.com/")
}

/// Canonical form of a non-GitHub download link: an absolute http(s) URL with a
/// host, percent-encoded. `None` for anything else.
pub fn web_link(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(url.as_str().to_string())
}

fn archive_url(token: Option<&str>, owner: &str, repo: &str) -> String {
    match token {
        Some(token) => format!(
            "https://{}@github.com/{}/{}/archive/refs/heads/main.zip",
            token, owner, repo
        ),
        None => format!("https://github.com/{}/{}/archive/refs/heads/main.zip", owner, repo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_https() {
        assert_eq!(
            resolve("https://github.com/acme/library-manager").unwrap(),
            "https://github.com/acme/library-manager/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn strips_git_suffix_and_trailing_slash() {
        assert_eq!(
            resolve("https://github.com/acme/library-manager.git").unwrap(),
            "https://github.com/acme/library-manager/archive/refs/heads/main.zip"
        );
        assert_eq!(
            resolve("https://github.com/acme/library-manager/").unwrap(),
            "https://github.com/acme/library-manager/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn resolves_ssh() {
        assert_eq!(
            resolve("git@github.com:acme/library-manager.git").unwrap(),
            "https://github.com/acme/library-manager/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn keeps_embedded_token() {
        assert_eq!(
            resolve("https://ghp_abc123@github.com/acme/private-repo.git").unwrap(),
            "https://ghp_abc123@github.com/acme/private-repo/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(resolve("https://github.com/acme").is_err());
        assert!(resolve("https://gitlab.com/acme/repo").is_err());
        assert!(resolve("https://github.com/acme/repo/tree/dev").is_err());
        assert!(resolve("not a link").is_err());
    }

    #[test]
    fn detects_github_links() {
        assert!(is_github_link("https://github.com/acme"));
        assert!(is_github_link("git@github.com:acme/repo"));
        assert!(!is_github_link("https://drive.google.com/file/d/xyz"));
    }

    #[test]
    fn web_links_must_be_absolute_http() {
        assert_eq!(
            web_link(" https://drive.example.com/bundle.zip ").as_deref(),
            Some("https://drive.example.com/bundle.zip")
        );
        assert_eq!(
            web_link("https://drive.example.com/bündel.zip").as_deref(),
            Some("https://drive.example.com/b%C3%BCndel.zip")
        );
        assert_eq!(web_link("see the shared drive folder"), None);
        assert_eq!(web_link("/relative/path.zip"), None);
        assert_eq!(web_link("ftp://files.example.com/x.zip"), None);
        assert_eq!(web_link("javascript:alert(1)"), None);
    }
}
