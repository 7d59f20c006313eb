use crate::state::{App, FocusMode, CARD_HEIGHT};
use crate::theme::{self, icons};
use knyte_core::{diff_lines, relative_age, ActivityFilter, ApprovalRequest, Employee, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let cards_area = render_employees(f, app, body[0]);

    let (approval_area, activity_area) = if app.dashboard.approval.is_some() {
        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(body[1]);
        (Some(sidebar[0]), sidebar[1])
    } else {
        (None, body[1])
    };
    app.update_layout(cards_area, approval_area, activity_area);

    if let Some(area) = approval_area {
        render_approval(f, app, area);
    }
    render_activity(f, app, activity_area);
    render_footer(f, app, rows[2]);

    if app.show_help {
        render_help(f, centered_rect(area, 52, 21));
    }
}

fn focus_border(app: &App, focus: FocusMode) -> Style {
    if app.focus == focus {
        theme::SELECTED_BORDER
    } else {
        Style::default()
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut title = vec![Span::styled(
        " KNYTE",
        theme::HEADER_STYLE.add_modifier(Modifier::ITALIC),
    )];
    let pending = app.dashboard.pending_approvals();
    if pending > 0 {
        title.push(Span::styled(
            format!("  {} {pending} pending", icons::APPROVAL),
            Style::default().fg(theme::ALERT),
        ));
    }
    let logo = Paragraph::new(Line::from(title));
    f.render_widget(logo, inner);

    let hire = Paragraph::new(Line::from(vec![
        Span::styled("[n] ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "+ Hire New Employee ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(hire, inner);
}

/// Draws the employee panel and returns the area the cards occupy.
fn render_employees(f: &mut Frame, app: &mut App, area: Rect) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("My AI Employees")
        .border_style(focus_border(app, FocusMode::Employees));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.label()).collect::<Vec<_>>())
        .select(app.dashboard.active_tab.index())
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(" ");
    f.render_widget(tabs, parts[0]);

    let cards_area = parts[1];
    if app.dashboard.employees.is_empty() {
        let p = Paragraph::new(vec![
            Line::from(Span::styled("No employees yet.", theme::MUTED)),
            Line::from("Press n to hire one."),
        ])
        .wrap(Wrap { trim: true });
        f.render_widget(p, cards_area);
        return cards_area;
    }

    let visible = (cards_area.height / CARD_HEIGHT).max(1) as usize;
    app.selected_employee = app
        .selected_employee
        .min(app.dashboard.employees.len() - 1);
    app.sync_card_window(visible);

    let end = (app.card_offset + visible).min(app.dashboard.employees.len());
    for (slot, idx) in (app.card_offset..end).enumerate() {
        let y = cards_area.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(cards_area.y + cards_area.height - y);
        let card = Rect::new(cards_area.x, y, cards_area.width, height);
        let selected = idx == app.selected_employee;
        render_employee_card(f, app, &app.dashboard.employees[idx], selected, card);
    }

    cards_area
}

fn render_employee_card(
    f: &mut Frame,
    app: &App,
    employee: &Employee,
    selected: bool,
    area: Rect,
) {
    let border_style = if selected && app.focus == FocusMode::Employees {
        theme::SELECTED_BORDER.add_modifier(Modifier::BOLD)
    } else if selected {
        theme::SELECTED_BORDER
    } else {
        Style::default().fg(theme::MUTED)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label = Style::default().fg(theme::MUTED);
    let gpu = if employee.has_gpu {
        Span::styled(icons::GPU_ON, Style::default().fg(Color::Rgb(16, 185, 129)))
    } else {
        Span::styled(icons::GPU_OFF, label)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                employee.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(employee.role.clone(), label),
            Span::raw("  "),
            Span::styled(
                format!(" {} {} ", icons::STATUS_DOT, employee.status),
                theme::status_badge_style(&employee.status),
            ),
        ]),
        Line::from(vec![
            Span::styled("Current Task:  ", label),
            Span::raw(employee.current_task.clone()),
        ]),
        Line::from(vec![
            Span::styled("Task Duration: ", label),
            Span::raw(employee.task_duration.clone()),
        ]),
        Line::from(vec![
            Span::styled("Last Active:   ", label),
            Span::raw(relative_age(employee.last_active, app.now).activity_label()),
        ]),
        Line::from(vec![
            Span::styled("Created:       ", label),
            Span::raw(employee.created_at.format("%b %-d, %Y").to_string()),
        ]),
        Line::from(vec![
            Span::styled("VM Instance:   ", label),
            Span::raw(employee.vm_instance.clone()),
        ]),
        Line::from(vec![Span::styled("GPU:           ", label), gpu]),
    ];

    if employee.has_approval_pending {
        lines.push(Line::from(Span::styled(
            format!(" {} Approval Needed {} ", icons::APPROVAL, icons::ARROW),
            Style::default()
                .fg(Color::Black)
                .bg(theme::ALERT)
                .add_modifier(Modifier::BOLD),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_approval(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(approval) = app.dashboard.approval.clone() else {
        return;
    };

    let border_style = if app.focus == FocusMode::Approval {
        theme::SELECTED_BORDER
    } else {
        Style::default().fg(theme::ALERT)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Approval Required")
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let summary = approval_summary(app, &approval);
    let summary_height =
        wrapped_height(&summary, inner.width).min(inner.height.saturating_sub(1));
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(summary).wrap(Wrap { trim: true }),
        parts[0],
    );

    match approval.diff.as_ref().filter(|_| app.approval_view.expanded) {
        Some(diff) => {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    diff.file.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("+{}", diff.additions),
                    Style::default().fg(Color::Rgb(16, 185, 129)),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("-{}", diff.deletions),
                    Style::default().fg(Color::Rgb(239, 68, 68)),
                ),
            ])];
            for line in diff_lines(&diff.content) {
                lines.push(Line::from(Span::styled(
                    line.text.to_string(),
                    theme::diff_line_style(line.kind),
                )));
            }

            // Diff text is shown verbatim, so no wrapping here.
            let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
            app.approval_max_scroll = total.saturating_sub(parts[1].height);
            app.approval_scroll = app.approval_scroll.min(app.approval_max_scroll);
            f.render_widget(
                Paragraph::new(lines).scroll((app.approval_scroll, 0)),
                parts[1],
            );
        }
        None => {
            app.approval_max_scroll = 0;
            app.approval_scroll = 0;
        }
    }

    let actions = Paragraph::new(Line::from(vec![
        Span::styled("[d] ", Style::default().fg(Color::Cyan)),
        Span::styled("Decline", Style::default().fg(Color::Rgb(239, 68, 68))),
        Span::raw("   "),
        Span::styled("[a] ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "Approve",
            Style::default()
                .fg(Color::Rgb(16, 185, 129))
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(actions, parts[2]);
}

fn approval_summary(app: &App, approval: &ApprovalRequest) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme::MUTED);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                approval.kind.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", approval.employee),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(""),
        Line::from(approval.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Requested: ", label),
            Span::raw(approval.requested.clone()),
        ]),
        Line::from(vec![
            Span::styled("Impact:    ", label),
            Span::styled(
                approval.impact.to_string(),
                Style::default()
                    .fg(theme::impact_color(approval.impact))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if approval.diff.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                app.approval_view.toggle_label(),
                Style::default().fg(Color::Blue),
            ),
            Span::styled("  [v]", label),
        ]));
    }

    lines
}

fn render_activity(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Activity Log")
        .border_style(focus_border(app, FocusMode::Activity));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let selected = app.activity_filter.selected().to_string();
    let controls = Paragraph::new(Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(theme::MUTED)),
        Span::styled(
            format!("< {} >", ActivityFilter::label(&selected)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [e] cycle  [c] Clear", Style::default().fg(theme::MUTED)),
    ]));
    f.render_widget(controls, parts[0]);

    let visible = app.activity_filter.visible(&app.dashboard.logs);
    if visible.is_empty() {
        app.activity_max_scroll = 0;
        app.activity_scroll = 0;
        let p = Paragraph::new(Span::styled(
            format!("No activity for {}", ActivityFilter::label(&selected)),
            theme::MUTED,
        ))
        .wrap(Wrap { trim: true });
        f.render_widget(p, parts[1]);
        return;
    }

    let mut lines = Vec::new();
    for entry in visible {
        lines.push(Line::from(entry.message.clone()));
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", entry.kind),
                theme::activity_kind_color(&entry.kind),
            ),
            Span::styled(entry.employee.clone(), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(" {} ", icons::SEPARATOR),
                Style::default().fg(theme::MUTED),
            ),
            Span::styled(
                relative_age(entry.timestamp, app.now).to_string(),
                Style::default().fg(theme::MUTED),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let total_height = wrapped_height(&lines, parts[1].width);
    app.activity_max_scroll = total_height.saturating_sub(parts[1].height);
    app.activity_scroll = app.activity_scroll.min(app.activity_max_scroll);

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.activity_scroll, 0));
    f.render_widget(p, parts[1]);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.notice {
        Some(notice) => Line::from(vec![
            Span::styled(
                format!(" {notice} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(theme::ALERT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Esc to dismiss", Style::default().fg(theme::MUTED)),
        ]),
        None => Line::from(Span::styled(
            " q quit  ? help  Tab focus  j/k move  Enter open approval  a/d approve/decline",
            Style::default().fg(theme::MUTED),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_help(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bindings = [
        ("j / Down", "Next card / scroll"),
        ("k / Up", "Previous card / scroll"),
        ("Tab", "Switch focus"),
        ("1 2 3", "Tabs All / Mine / Team"),
        ("h / l", "Previous / next tab"),
        ("Enter", "Jump to pending approval"),
        ("a", "Approve request"),
        ("d", "Decline request"),
        ("v", "Toggle diff"),
        ("e / E", "Cycle activity filter"),
        ("c", "Clear activity logs"),
        ("n", "Hire new employee"),
        ("Esc", "Dismiss notice"),
        ("?", "Toggle help"),
        ("q", "Quit"),
    ];

    let mut text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (keys, action) in bindings {
        text.push(Line::from(vec![
            Span::styled(format!("{keys:<11}"), Color::Cyan),
            Span::raw(action),
        ]));
    }

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let mut total: usize = 0;
    for line in lines {
        let line_width = line.width();
        if line_width == 0 {
            total += 1;
        } else {
            total += (line_width + width - 1) / width;
        }
    }
    u16::try_from(total).unwrap_or(u16::MAX)
}
