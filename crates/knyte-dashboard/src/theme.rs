use knyte_core::{ActivityKind, DiffLineKind, EmployeeStatus, Impact};
use ratatui::style::{Color, Modifier, Style};

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Rgb(191, 219, 254))
    .add_modifier(Modifier::BOLD);
pub const SELECTED_BORDER: Style = Style::new().fg(Color::Cyan);
pub const MUTED: Color = Color::Rgb(107, 114, 128);
pub const ALERT: Color = Color::Rgb(245, 158, 11);

pub mod icons {
    pub const STATUS_DOT: &str = "●";
    pub const GPU_ON: &str = "● Enabled";
    pub const GPU_OFF: &str = "○ Disabled";
    pub const APPROVAL: &str = "!";
    pub const ARROW: &str = "→";
    pub const SEPARATOR: &str = "•";
}

pub fn status_color(status: &EmployeeStatus) -> Color {
    match status {
        EmployeeStatus::Active => Color::Rgb(30, 64, 175),
        EmployeeStatus::Working => Color::Rgb(16, 185, 129),
        EmployeeStatus::Idle => MUTED,
        EmployeeStatus::Other(_) => MUTED,
    }
}

pub fn status_badge_style(status: &EmployeeStatus) -> Style {
    Style::new()
        .bg(status_color(status))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn impact_color(impact: Impact) -> Color {
    match impact {
        Impact::Low => Color::Rgb(16, 185, 129),
        Impact::Medium => ALERT,
        Impact::High => Color::Rgb(239, 68, 68),
    }
}

pub fn diff_line_style(kind: DiffLineKind) -> Style {
    match kind {
        DiffLineKind::Location => Style::new().fg(Color::Rgb(96, 165, 250)),
        DiffLineKind::Addition => Style::new().fg(Color::Rgb(16, 185, 129)),
        DiffLineKind::Deletion => Style::new().fg(Color::Rgb(239, 68, 68)),
        DiffLineKind::Context => Style::new().fg(Color::Rgb(203, 213, 225)),
    }
}

pub fn activity_kind_color(kind: &ActivityKind) -> Color {
    match kind {
        ActivityKind::File => Color::Rgb(96, 165, 250),
        ActivityKind::Git => Color::Rgb(249, 115, 22),
        ActivityKind::Command => Color::Rgb(167, 139, 250),
        ActivityKind::Test => Color::Rgb(16, 185, 129),
        ActivityKind::Other(_) => MUTED,
    }
}
