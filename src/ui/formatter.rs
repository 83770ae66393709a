//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build text without printing; the `display_*`
//! functions print to stdout or stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{ChangeEntry, ChangeStatus, Version};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the version transition for this run
pub fn display_version_change(old: &Version, new: &Version) {
    println!("\n{}", style("Version:").bold());
    println!("  From: {}", style(old).red());
    println!("  To:   {}", style(new).green());
}

fn status_label(status: ChangeStatus) -> String {
    let label = style(status.label());
    let label = match status {
        ChangeStatus::Added | ChangeStatus::Untracked => label.green(),
        ChangeStatus::Deleted => label.red(),
        ChangeStatus::Modified => label.yellow(),
        ChangeStatus::Renamed | ChangeStatus::Copied => label.cyan(),
    };
    label.to_string()
}

/// Numbered change list, one entry per line.
///
/// Renames and copies show `source -> destination`.
pub fn format_change_list(entries: &[ChangeEntry]) -> String {
    let mut out = format!("\n{}\n", style("Files to be committed:").bold());

    for entry in entries {
        let path = match &entry.original_path {
            Some(from) => format!("{} -> {}", from, entry.path),
            None => entry.path.clone(),
        };
        out.push_str(&format!(
            "{}. {} {}\n",
            entry.display_index,
            status_label(entry.status),
            path
        ));
    }

    out
}

/// List of paths handed to git for staging
pub fn format_staged_list(paths: &[String]) -> String {
    let mut out = format!("\n{}\n", style("Files that will be added to commit:").bold());
    for (i, path) in paths.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, path));
    }
    out
}

/// Display what a dry run would have done
pub fn display_dry_run(version: &Version, paths: &[String], message: &str) {
    display_status("Dry run, nothing was written:");
    display_success(&format!("  Step 1: would write version {}", version));
    display_success(&format!("  Step 2: would stage {} path(s)", paths.len()));
    display_success(&format!("  Step 3: would commit \"{}\"", message));
    display_success("  Step 4: would push to remote");
}
