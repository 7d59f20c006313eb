#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    Location,
    Addition,
    Deletion,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine<'a> {
    pub kind: DiffLineKind,
    pub text: &'a str,
}

pub fn classify_diff_line(line: &str) -> DiffLineKind {
    if line.starts_with("@@") {
        DiffLineKind::Location
    } else if line.starts_with('+') {
        DiffLineKind::Addition
    } else if line.starts_with('-') {
        DiffLineKind::Deletion
    } else {
        DiffLineKind::Context
    }
}

/// Splits unified diff text on `\n` and classifies every line, keeping the
/// original order and text.
pub fn diff_lines(content: &str) -> Vec<DiffLine<'_>> {
    content
        .split('\n')
        .map(|text| DiffLine {
            kind: classify_diff_line(text),
            text,
        })
        .collect()
}

/// Expand/collapse state of the approval diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalView {
    pub expanded: bool,
}

impl ApprovalView {
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn toggle_label(self) -> &'static str {
        if self.expanded {
            "▼ View Changes"
        } else {
            "▶ View Changes"
        }
    }
}
