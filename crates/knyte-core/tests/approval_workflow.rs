use chrono::{DateTime, Duration, TimeZone, Utc};
use knyte_core::seed::mock_state;
use knyte_core::{
    diff_lines, relative_age, ActivityFilter, ApprovalView, DashboardState, Decision,
    DiffLineKind, Tab,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
}

#[test]
fn reviewer_declines_pull_request_from_dev_agent() {
    let mut view = ApprovalView::default();
    let state = mock_state(now()).select_tab(Tab::Mine);

    let approval = state
        .request_approval_scroll("dev-ai-001")
        .expect("approval mounted");
    assert_eq!(approval.id, "apr-001");

    view.toggle_expanded();
    assert!(view.expanded);
    let diff = approval.diff.as_ref().expect("diff attached");
    let lines = diff_lines(&diff.content);
    assert_eq!(lines[0].kind, DiffLineKind::Location);
    let additions = lines
        .iter()
        .filter(|line| line.kind == DiffLineKind::Addition)
        .count();
    let deletions = lines
        .iter()
        .filter(|line| line.kind == DiffLineKind::Deletion)
        .count();
    assert_eq!((additions, deletions), (9, 3));

    let state = state.resolve_approval(Decision::Decline);
    assert!(!state.employees[0].has_approval_pending);
    assert!(state.approval.is_none());
    assert_eq!(state.active_tab, Tab::Mine);
    assert!(state.pending_invariant_holds());

    let unchanged = state.clone().resolve_approval(Decision::Approve);
    assert_eq!(unchanged, state);
}

#[test]
fn activity_feed_filters_and_ages_entries() {
    let state: DashboardState = mock_state(now());
    let mut filter = ActivityFilter::default();

    let options = ActivityFilter::employee_options(&state.logs);
    assert_eq!(options, vec!["all", "dev-ai-001"]);

    let ages: Vec<String> = filter
        .visible(&state.logs)
        .iter()
        .map(|entry| relative_age(entry.timestamp, now()).to_string())
        .collect();
    assert_eq!(ages, vec!["2m ago", "5m ago", "8m ago", "10m ago", "15m ago"]);

    filter.set_selected("dev-ai-001");
    assert_eq!(filter.visible(&state.logs).len(), state.logs.len());

    filter.set_selected("ops-ai-404");
    assert!(filter.visible(&state.logs).is_empty());

    let employee = &state.employees[0];
    assert_eq!(
        relative_age(employee.created_at, now()).to_string(),
        "7d ago"
    );
    assert_eq!(
        relative_age(employee.last_active, now() + Duration::hours(2)).activity_label(),
        "Active 2h ago"
    );
}
