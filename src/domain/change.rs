use std::fmt;

/// Status of a changed path as reported by the status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Modified,
    Added,
    Deleted,
    Renamed,
    Untracked,
    Copied,
}

impl ChangeStatus {
    /// Map a porcelain `XY` code to a status.
    ///
    /// A rename or copy in either column wins, since those records are
    /// followed by a source path. Otherwise the index column wins over the
    /// worktree column, except for untracked entries (`??`). Codes without a
    /// dedicated status (type change, unmerged) count as modified.
    pub fn from_code(code: &str) -> Self {
        if code == "??" {
            return ChangeStatus::Untracked;
        }
        if code.contains('R') {
            return ChangeStatus::Renamed;
        }
        if code.contains('C') {
            return ChangeStatus::Copied;
        }

        let mut columns = code.chars().filter(|c| *c != ' ');
        match columns.next() {
            Some('A') => ChangeStatus::Added,
            Some('D') => ChangeStatus::Deleted,
            _ => ChangeStatus::Modified,
        }
    }

    /// Short operator-facing label
    pub fn label(&self) -> &'static str {
        match self {
            ChangeStatus::Added | ChangeStatus::Untracked => "INSERT",
            ChangeStatus::Deleted => "DELETE",
            ChangeStatus::Modified => "UPDATE",
            ChangeStatus::Renamed => "RENAME",
            ChangeStatus::Copied => "COPY",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the numbered change list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    /// 1-based position in the list shown to the operator
    pub display_index: usize,
    pub path: String,
    pub status: ChangeStatus,
    /// Source path for renames and copies
    pub original_path: Option<String>,
}

impl ChangeEntry {
    /// Paths that must be staged to record this change
    pub fn stage_paths(&self) -> Vec<&str> {
        match (&self.status, &self.original_path) {
            (ChangeStatus::Renamed, Some(from)) => vec![from.as_str(), self.path.as_str()],
            _ => vec![self.path.as_str()],
        }
    }
}

/// Parsed status query output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Changes that can be listed and staged
    pub entries: Vec<ChangeEntry>,
    /// Lossy renderings of paths that are not valid UTF-8
    pub unreadable: Vec<String>,
}

/// Parse NUL-separated porcelain v1 output (`git status --porcelain -z`).
///
/// Every record is `XY <path>`; rename and copy records are followed by an
/// extra record holding the source path. Indices are assigned in the order the
/// records appear, starting at 1. Malformed records are skipped. A change
/// whose path (or source path) is not UTF-8 gets no index and is reported in
/// [StatusReport::unreadable] instead.
pub fn parse_porcelain(raw: impl AsRef<[u8]>) -> StatusReport {
    let mut report = StatusReport::default();
    let mut records = raw.as_ref().split(|b| *b == 0).filter(|r| !r.is_empty());

    while let Some(record) = records.next() {
        if record.len() < 4 {
            continue;
        }
        let code = match std::str::from_utf8(&record[..2]) {
            Ok(code) => code,
            Err(_) => continue,
        };
        let status = ChangeStatus::from_code(code);

        let source = match status {
            ChangeStatus::Renamed | ChangeStatus::Copied => records.next(),
            _ => None,
        };

        let path = String::from_utf8(record[3..].to_vec());
        let original_path = source.map(|s| String::from_utf8(s.to_vec())).transpose();

        match (path, original_path) {
            (Ok(path), Ok(original_path)) => report.entries.push(ChangeEntry {
                display_index: report.entries.len() + 1,
                path,
                status,
                original_path,
            }),
            _ => report
                .unreadable
                .push(String::from_utf8_lossy(&record[3..]).into_owned()),
        }
    }

    report
}
