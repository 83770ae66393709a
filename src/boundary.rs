use std::fmt;

use crate::domain::Component;

/// Non-fatal conditions worth telling the operator about.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No version file yet; it will be created on this run
    NewVersionFile { file: String },
    /// Exclusion tokens that were not a listed index
    IgnoredExclusions { tokens: Vec<String> },
    /// Every listed change was excluded
    OnlyVersionFile { file: String },
    /// Changes left out of the list because their path is not UTF-8
    UnreadablePaths { paths: Vec<String> },
    /// An increment was requested on a component already at 99
    ComponentAtLimit { component: Component },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NewVersionFile { file } => {
                write!(f, "No {} found; it will be created on this run", file)
            }
            BoundaryWarning::IgnoredExclusions { tokens } => {
                write!(f, "Ignoring invalid exclusion input: {}", tokens.join(", "))
            }
            BoundaryWarning::OnlyVersionFile { file } => {
                write!(f, "All changes excluded; only {} will be committed", file)
            }
            BoundaryWarning::UnreadablePaths { paths } => write!(
                f,
                "Skipping {} path(s) that are not valid UTF-8: {}",
                paths.len(),
                paths.join(", ")
            ),
            BoundaryWarning::ComponentAtLimit { component } => {
                let name = match component {
                    Component::Major => "major",
                    Component::Minor => "minor",
                    Component::Patch => "patch",
                };
                write!(f, "The {} component is already at 99 and stays there", name)
            }
        }
    }
}
