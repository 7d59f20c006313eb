use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use knyte_core::services::UnconnectedBackend;
use knyte_core::{
    ActivityFilter, ApprovalView, DashboardState, Decision, LogService, ProvisioningService, Tab,
};
use ratatui::layout::Rect;
use tracing::debug;

/// Rows taken by one employee card, borders included.
pub const CARD_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusMode {
    #[default]
    Employees,
    Approval,
    Activity,
}

pub struct App {
    pub dashboard: DashboardState,
    pub activity_filter: ActivityFilter,
    pub approval_view: ApprovalView,
    pub now: DateTime<Utc>,
    pub selected_employee: usize,
    pub card_offset: usize,
    pub focus: FocusMode,
    pub show_help: bool,
    pub notice: Option<String>,
    pub cards_area: Option<Rect>,
    pub approval_area: Option<Rect>,
    pub activity_area: Option<Rect>,
    pub approval_scroll: u16,
    pub approval_max_scroll: u16,
    pub activity_scroll: u16,
    pub activity_max_scroll: u16,
    provisioning: Box<dyn ProvisioningService>,
    log_service: Box<dyn LogService>,
    should_quit: bool,
}

impl App {
    pub fn new(dashboard: DashboardState, now: DateTime<Utc>) -> Self {
        Self::with_backends(
            dashboard,
            now,
            Box::new(UnconnectedBackend),
            Box::new(UnconnectedBackend),
        )
    }

    pub fn with_backends(
        dashboard: DashboardState,
        now: DateTime<Utc>,
        provisioning: Box<dyn ProvisioningService>,
        log_service: Box<dyn LogService>,
    ) -> Self {
        Self {
            dashboard,
            activity_filter: ActivityFilter::default(),
            approval_view: ApprovalView::default(),
            now,
            selected_employee: 0,
            card_offset: 0,
            focus: FocusMode::Employees,
            show_help: false,
            notice: None,
            cards_area: None,
            approval_area: None,
            activity_area: None,
            approval_scroll: 0,
            approval_max_scroll: 0,
            activity_scroll: 0,
            activity_max_scroll: 0,
            provisioning,
            log_service,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter
            ) {
                self.show_help = false;
            } else if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Esc => {
                self.notice = None;
            }
            KeyCode::Tab => {
                self.cycle_focus(1);
            }
            KeyCode::BackTab => {
                self.cycle_focus(-1);
            }
            KeyCode::Char('1') => self.select_tab(Tab::All),
            KeyCode::Char('2') => self.select_tab(Tab::Mine),
            KeyCode::Char('3') => self.select_tab(Tab::Team),
            KeyCode::Right | KeyCode::Char('l') => {
                self.select_tab(self.dashboard.active_tab.next());
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_tab(self.dashboard.active_tab.prev());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_or_scroll(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_or_scroll(-1);
            }
            KeyCode::Enter => {
                self.activate_selected_card();
            }
            KeyCode::Char('a') => {
                self.resolve_approval(Decision::Approve);
            }
            KeyCode::Char('d') => {
                self.resolve_approval(Decision::Decline);
            }
            KeyCode::Char('v') => {
                self.toggle_diff();
            }
            KeyCode::Char('e') => {
                self.cycle_activity_filter(1);
            }
            KeyCode::Char('E') => {
                self.cycle_activity_filter(-1);
            }
            KeyCode::Char('n') => {
                self.hire_employee();
            }
            KeyCode::Char('c') => {
                self.clear_logs();
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_left_click(event.column, event.row);
            }
            MouseEventKind::ScrollUp => {
                self.handle_wheel(event.column, event.row, -1);
            }
            MouseEventKind::ScrollDown => {
                self.handle_wheel(event.column, event.row, 1);
            }
            _ => {}
        }
    }

    pub fn update_layout(
        &mut self,
        cards_area: Rect,
        approval_area: Option<Rect>,
        activity_area: Rect,
    ) {
        self.cards_area = Some(cards_area);
        self.approval_area = approval_area;
        self.activity_area = Some(activity_area);
        if approval_area.is_none() {
            self.approval_scroll = 0;
            self.approval_max_scroll = 0;
        }
    }

    /// Keeps the selected card inside a window of `visible` cards.
    pub fn sync_card_window(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.selected_employee < self.card_offset {
            self.card_offset = self.selected_employee;
        } else if self.selected_employee >= self.card_offset + visible {
            self.card_offset = self.selected_employee + 1 - visible;
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.dashboard = std::mem::take(&mut self.dashboard).select_tab(tab);
    }

    pub fn resolve_approval(&mut self, decision: Decision) {
        let Some(id) = self.dashboard.approval.as_ref().map(|a| a.id.clone()) else {
            return;
        };
        self.dashboard = std::mem::take(&mut self.dashboard).resolve_approval(decision);
        self.approval_view = ApprovalView::default();
        if self.focus == FocusMode::Approval {
            self.focus = FocusMode::Employees;
        }
        self.notice = Some(format!("{} {}", capitalize(decision.as_str()), id));
    }

    pub fn request_approval_scroll(&mut self, employee_name: &str) {
        if self
            .dashboard
            .request_approval_scroll(employee_name)
            .is_some()
        {
            self.focus = FocusMode::Approval;
            self.approval_scroll = 0;
        }
    }

    fn activate_selected_card(&mut self) {
        let Some(employee) = self.dashboard.employees.get(self.selected_employee) else {
            return;
        };
        if employee.has_approval_pending {
            let name = employee.name.clone();
            self.request_approval_scroll(&name);
        }
    }

    fn toggle_diff(&mut self) {
        let has_diff = self
            .dashboard
            .approval
            .as_ref()
            .is_some_and(|approval| approval.diff.is_some());
        if has_diff {
            self.approval_view.toggle_expanded();
            self.approval_scroll = 0;
        }
    }

    fn cycle_activity_filter(&mut self, step: isize) {
        self.activity_filter.cycle(&self.dashboard.logs, step);
        self.activity_scroll = 0;
    }

    fn hire_employee(&mut self) {
        let (dashboard, ack) =
            std::mem::take(&mut self.dashboard).hire_employee(self.provisioning.as_ref());
        self.dashboard = dashboard;
        self.notice = Some(ack.message());
    }

    fn clear_logs(&mut self) {
        let scope = if self.activity_filter.is_all() {
            None
        } else {
            Some(self.activity_filter.selected().to_string())
        };
        let (dashboard, ack) = std::mem::take(&mut self.dashboard)
            .clear_logs(self.log_service.as_ref(), scope.as_deref());
        self.dashboard = dashboard;
        self.activity_scroll = 0;
        self.notice = Some(ack.message());
    }

    fn cycle_focus(&mut self, step: isize) {
        let mut order = vec![FocusMode::Employees];
        if self.dashboard.approval.is_some() {
            order.push(FocusMode::Approval);
        }
        order.push(FocusMode::Activity);
        let len = order.len() as isize;
        let current = order
            .iter()
            .position(|mode| *mode == self.focus)
            .unwrap_or(0) as isize;
        self.focus = order[(current + step).rem_euclid(len) as usize];
        debug!(focus = ?self.focus, "focus changed");
    }

    fn move_or_scroll(&mut self, delta: i16) {
        match self.focus {
            FocusMode::Employees => self.move_selection(delta),
            FocusMode::Approval => {
                self.approval_scroll =
                    step_scroll(self.approval_scroll, delta, self.approval_max_scroll);
            }
            FocusMode::Activity => {
                self.activity_scroll =
                    step_scroll(self.activity_scroll, delta, self.activity_max_scroll);
            }
        }
    }

    fn move_selection(&mut self, delta: i16) {
        let len = self.dashboard.employees.len();
        if len == 0 {
            self.selected_employee = 0;
            return;
        }
        let next =
            (self.selected_employee as isize + delta as isize).clamp(0, len as isize - 1);
        self.selected_employee = next as usize;
    }

    fn handle_left_click(&mut self, column: u16, row: u16) {
        if let Some(area) = self.cards_area {
            if contains(area, column, row) {
                self.focus = FocusMode::Employees;
                let idx = self.card_offset + ((row - area.y) / CARD_HEIGHT) as usize;
                if idx < self.dashboard.employees.len() {
                    self.selected_employee = idx;
                    self.activate_selected_card();
                }
                return;
            }
        }

        if let Some(area) = self.approval_area {
            if contains(area, column, row) {
                self.focus = FocusMode::Approval;
                return;
            }
        }

        if let Some(area) = self.activity_area {
            if contains(area, column, row) {
                self.focus = FocusMode::Activity;
            }
        }
    }

    fn handle_wheel(&mut self, column: u16, row: u16, delta: i16) {
        if let Some(area) = self.approval_area {
            if contains(area, column, row) {
                self.approval_scroll =
                    step_scroll(self.approval_scroll, delta, self.approval_max_scroll);
                return;
            }
        }
        if let Some(area) = self.activity_area {
            if contains(area, column, row) {
                self.activity_scroll =
                    step_scroll(self.activity_scroll, delta, self.activity_max_scroll);
                return;
            }
        }
        if let Some(area) = self.cards_area {
            if contains(area, column, row) {
                self.move_selection(delta);
            }
        }
    }
}

fn step_scroll(current: u16, delta: i16, max: u16) -> u16 {
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as u16).min(max)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
