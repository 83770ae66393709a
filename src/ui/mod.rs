//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The two interactive prompts of a run
//!
//! The prompts form a fixed sequence: [ExclusionPrompt] hands over a
//! [MessagePrompt] once it has been answered, so the message can never be
//! asked for before the file selection. Both are generic over the input and
//! output streams; tests feed them a `Cursor` and capture a `Vec<u8>`.

use std::io::{self, BufRead, Stdout, Write};

use log::warn;

use crate::domain::selection::{parse_exclusions, Exclusions};
use crate::domain::ChangeEntry;
use crate::error::{Result, SgitError};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_dry_run, display_error, display_status, display_success,
    display_version_change, format_change_list, format_staged_list,
};

/// Prompts for the indices to leave out of the commit
pub struct ExclusionPrompt<R, W> {
    input: R,
    output: W,
}

/// Prompts for the commit message body
pub struct MessagePrompt<R, W> {
    input: R,
    output: W,
}

/// Prompts bound to the controlling terminal
pub fn terminal() -> ExclusionPrompt<io::StdinLock<'static>, Stdout> {
    ExclusionPrompt::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> ExclusionPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ExclusionPrompt { input, output }
    }

    /// Show the numbered list and read one line of comma-separated indices.
    ///
    /// Invalid tokens are reported in [Exclusions::ignored] and otherwise
    /// ignored. Closing the input at this prompt aborts the run.
    pub fn ask(mut self, entries: &[ChangeEntry]) -> Result<(Exclusions, MessagePrompt<R, W>)> {
        write!(self.output, "{}", format_change_list(entries))?;
        write!(
            self.output,
            "\nEnter indices of files to exclude (comma-separated) or press Enter to include all:\n> "
        )?;
        self.output.flush()?;

        let line = read_line(&mut self.input)?
            .ok_or_else(|| SgitError::abort("input closed before file selection"))?;

        let exclusions = parse_exclusions(&line, entries.len());
        if !exclusions.ignored.is_empty() {
            warn!("ignored exclusion tokens: {:?}", exclusions.ignored);
        }

        let next = MessagePrompt {
            input: self.input,
            output: self.output,
        };
        Ok((exclusions, next))
    }
}

impl<R: BufRead, W: Write> MessagePrompt<R, W> {
    /// Read the message body. Blank input and closed input both yield `None`.
    pub fn ask(mut self) -> Result<Option<String>> {
        write!(
            self.output,
            "\nEnter commit message (press Enter for timestamp):\n> "
        )?;
        self.output.flush()?;

        let text = read_line(&mut self.input)?
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty());
        Ok(text)
    }
}

/// One line without its terminator, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::parse_porcelain;
    use std::collections::BTreeSet;
    use std::io::Cursor;

    fn entries() -> Vec<ChangeEntry> {
        parse_porcelain(" M a.rs\0?? b.rs\0 D c.rs\0").entries
    }

    #[test]
    fn test_prompt_sequence() {
        let input = Cursor::new("2\nship it\n");
        let mut output = Vec::new();

        let (exclusions, message) = ExclusionPrompt::new(input, &mut output)
            .ask(&entries())
            .unwrap();
        assert_eq!(exclusions.indices, BTreeSet::from([2]));
        assert_eq!(message.ask().unwrap().as_deref(), Some("ship it"));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("a.rs"));
        assert!(shown.contains("Enter indices of files to exclude"));
        assert!(shown.contains("Enter commit message"));
    }

    #[test]
    fn test_blank_answers() {
        let input = Cursor::new("\n\n");
        let (exclusions, message) = ExclusionPrompt::new(input, Vec::new())
            .ask(&entries())
            .unwrap();
        assert!(exclusions.indices.is_empty());
        assert_eq!(message.ask().unwrap(), None);
    }

    #[test]
    fn test_malformed_exclusions_do_not_fail() {
        let input = Cursor::new("1, x, 42\r\nmsg\r\n");
        let (exclusions, message) = ExclusionPrompt::new(input, Vec::new())
            .ask(&entries())
            .unwrap();
        assert_eq!(exclusions.indices, BTreeSet::from([1]));
        assert_eq!(exclusions.ignored, vec!["x", "42"]);
        assert_eq!(message.ask().unwrap().as_deref(), Some("msg"));
    }

    #[test]
    fn test_closed_input_at_selection_aborts() {
        let result = ExclusionPrompt::new(Cursor::new(""), Vec::new()).ask(&entries());
        assert!(matches!(result, Err(SgitError::UserAbort(_))));
    }

    #[test]
    fn test_closed_input_at_message_is_blank() {
        let (_, message) = ExclusionPrompt::new(Cursor::new("\n"), Vec::new())
            .ask(&entries())
            .unwrap();
        assert_eq!(message.ask().unwrap(), None);
    }
}
