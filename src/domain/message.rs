use std::fmt;

use chrono::Utc;

use crate::domain::version::{Component, Version};

/// A commit message split into the version tag and the body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// e.g. `[00.*01.00]`
    pub version_tag: String,
    pub body: String,
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.version_tag, self.body)
    }
}

/// Render `[MM.mm.pp]`, prefixing the starred component with `*`
pub fn version_tag(version: &Version, starred: Option<Component>) -> String {
    let field = |component: Component| {
        let star = if starred == Some(component) { "*" } else { "" };
        format!("{}{:02}", star, version.get(component))
    };

    format!(
        "[{}.{}.{}]",
        field(Component::Major),
        field(Component::Minor),
        field(Component::Patch)
    )
}

/// Build the commit message, using the current Unix timestamp when the
/// operator left the body blank.
pub fn build(
    version: &Version,
    starred: Option<Component>,
    user_text: Option<&str>,
) -> CommitMessage {
    build_at(version, starred, user_text, Utc::now().timestamp())
}

/// Same as [`build`] with a fixed timestamp for the blank-body fallback.
pub fn build_at(
    version: &Version,
    starred: Option<Component>,
    user_text: Option<&str>,
    timestamp: i64,
) -> CommitMessage {
    let body = match user_text.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => timestamp.to_string(),
    };

    CommitMessage {
        version_tag: version_tag(version, starred),
        body,
    }
}
