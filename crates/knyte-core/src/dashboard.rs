use crate::services::{Acknowledgment, LogService, ProvisioningService, ServiceError};
use crate::{ActivityLogEntry, ApprovalRequest, Employee};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Mine,
    Team,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::All, Tab::Mine, Tab::Team];

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Mine => "Mine",
            Tab::Team => "Team",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::All => 0,
            Tab::Mine => 1,
            Tab::Team => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::All => Tab::Mine,
            Tab::Mine => Tab::Team,
            Tab::Team => Tab::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::All => Tab::Team,
            Tab::Mine => Tab::All,
            Tab::Team => Tab::Mine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Decline,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Decline => "declined",
        }
    }
}

/// Everything the dashboard shows. Transitions consume the state and return
/// the next one; none of them can fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub logs: Vec<ActivityLogEntry>,
    #[serde(default)]
    pub approval: Option<ApprovalRequest>,
    #[serde(default, skip_serializing)]
    pub active_tab: Tab,
}

impl DashboardState {
    pub fn new(
        employees: Vec<Employee>,
        logs: Vec<ActivityLogEntry>,
        approval: Option<ApprovalRequest>,
    ) -> Self {
        Self {
            employees,
            logs,
            approval,
            active_tab: Tab::All,
        }
    }

    pub fn employee(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.name == name)
    }

    /// Clears the pending flag of the referenced employee and drops the
    /// approval. Approve and decline mutate the same way.
    pub fn resolve_approval(mut self, decision: Decision) -> Self {
        let Some(approval) = self.approval.take() else {
            debug!(decision = decision.as_str(), "no approval to resolve");
            return self;
        };

        info!(
            approval_id = %approval.id,
            employee = %approval.employee,
            decision = decision.as_str(),
            "approval resolved"
        );

        for employee in &mut self.employees {
            if employee.name == approval.employee {
                employee.has_approval_pending = false;
            }
        }
        self
    }

    /// Records the selected tab. The employee list is not filtered by it.
    pub fn select_tab(mut self, tab: Tab) -> Self {
        if self.active_tab != tab {
            info!(tab = tab.label(), "tab changed");
        }
        self.active_tab = tab;
        self
    }

    /// Returns the approval panel to scroll to, if one is mounted.
    pub fn request_approval_scroll(&self, employee_name: &str) -> Option<&ApprovalRequest> {
        debug!(employee = employee_name, "approval scroll requested");
        self.approval.as_ref()
    }

    pub fn pending_approvals(&self) -> usize {
        self.employees
            .iter()
            .filter(|employee| employee.has_approval_pending)
            .count()
    }

    /// True when exactly the employee referenced by the open approval (if
    /// any) carries the pending flag.
    pub fn pending_invariant_holds(&self) -> bool {
        self.employees.iter().all(|employee| {
            let referenced = self
                .approval
                .as_ref()
                .is_some_and(|approval| approval.employee == employee.name);
            employee.has_approval_pending == referenced
        })
    }

    /// Asks the provisioning collaborator for a new employee. Without a
    /// connected backend the intent is acknowledged with a placeholder.
    pub fn hire_employee(mut self, service: &dyn ProvisioningService) -> (Self, Acknowledgment) {
        info!("create employee requested");
        match service.create_employee() {
            Ok(employee) => {
                if self.employee(&employee.name).is_some() {
                    warn!(employee = %employee.name, "provisioned employee name already taken");
                    let ack = Acknowledgment::Duplicate(employee.name);
                    return (self, ack);
                }
                let mut employee = employee;
                let referenced = self
                    .approval
                    .as_ref()
                    .is_some_and(|approval| approval.employee == employee.name);
                if employee.has_approval_pending && !referenced {
                    warn!(employee = %employee.name, "provisioned employee has no open approval");
                }
                employee.has_approval_pending = referenced;
                let ack = Acknowledgment::Created(employee.name.clone());
                self.employees.push(employee);
                (self, ack)
            }
            Err(err) => (self, placeholder_ack(err, CREATE_PLACEHOLDER)),
        }
    }

    /// Asks the log collaborator to clear entries, scoped to one employee
    /// unless `employee_filter` is `None`. On success the local feed drops
    /// the same entries.
    pub fn clear_logs(
        mut self,
        service: &dyn LogService,
        employee_filter: Option<&str>,
    ) -> (Self, Acknowledgment) {
        info!(employee = employee_filter.unwrap_or("all"), "clear logs requested");
        match service.clear_logs(employee_filter) {
            Ok(()) => {
                let before = self.logs.len();
                match employee_filter {
                    Some(name) => self.logs.retain(|entry| entry.employee != name),
                    None => self.logs.clear(),
                }
                let removed = before - self.logs.len();
                (self, Acknowledgment::Cleared(removed))
            }
            Err(err) => (self, placeholder_ack(err, CLEAR_PLACEHOLDER)),
        }
    }
}

const CREATE_PLACEHOLDER: &str = "Create Employee - connect to your backend API here";
const CLEAR_PLACEHOLDER: &str = "Clear activity logs - connect to your backend API here";

fn placeholder_ack(err: ServiceError, message: &str) -> Acknowledgment {
    debug!(error = %err, "backend intent acknowledged without a backend");
    Acknowledgment::Placeholder(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::mock_state;
    use crate::services::UnconnectedBackend;
    use crate::{EmployeeStatus, Impact};
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::RefCell;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn employee(name: &str, pending: bool) -> Employee {
        Employee {
            name: name.to_string(),
            role: "Developer".to_string(),
            status: EmployeeStatus::Idle,
            current_task: String::new(),
            task_duration: String::new(),
            created_at: now() - Duration::days(1),
            last_active: now(),
            vm_instance: "vm-test".to_string(),
            has_gpu: false,
            has_approval_pending: pending,
        }
    }

    fn approval_for(name: &str) -> ApprovalRequest {
        ApprovalRequest {
            id: "apr-test".to_string(),
            kind: "Deploy".to_string(),
            employee: name.to_string(),
            description: "ship it".to_string(),
            requested: "Permission to deploy".to_string(),
            impact: Impact::High,
            diff: None,
        }
    }

    #[test]
    fn decline_clears_pending_flag_and_approval() {
        let state = mock_state(now());
        assert_eq!(state.employees[0].name, "dev-ai-001");
        assert!(state.employees[0].has_approval_pending);
        assert_eq!(state.approval.as_ref().map(|a| a.id.as_str()), Some("apr-001"));

        let state = state.resolve_approval(Decision::Decline);
        assert!(!state.employees[0].has_approval_pending);
        assert!(state.approval.is_none());
    }

    #[test]
    fn approve_and_decline_mutate_identically() {
        let approved = mock_state(now()).resolve_approval(Decision::Approve);
        let declined = mock_state(now()).resolve_approval(Decision::Decline);
        assert_eq!(approved, declined);
    }

    #[test]
    fn resolving_without_approval_is_a_no_op() {
        let state = DashboardState::new(
            vec![employee("a", false), employee("b", false)],
            Vec::new(),
            None,
        );
        let after = state.clone().resolve_approval(Decision::Approve);
        assert_eq!(after, state);
        let twice = mock_state(now())
            .resolve_approval(Decision::Approve)
            .resolve_approval(Decision::Decline);
        assert_eq!(twice, mock_state(now()).resolve_approval(Decision::Approve));
    }

    #[test]
    fn resolution_only_touches_referenced_employee() {
        let state = DashboardState::new(
            vec![employee("a", false), employee("b", true)],
            Vec::new(),
            Some(approval_for("b")),
        );
        assert!(state.pending_invariant_holds());
        let state = state.resolve_approval(Decision::Approve);
        assert_eq!(state.pending_approvals(), 0);
        assert!(state.pending_invariant_holds());
        assert_eq!(state.employees[0], employee("a", false));
    }

    #[test]
    fn tab_selection_does_not_filter_employees() {
        let state = mock_state(now());
        let employees = state.employees.clone();
        let state = state.select_tab(Tab::Team);
        assert_eq!(state.active_tab, Tab::Team);
        assert_eq!(state.employees, employees);
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(Tab::Team.next(), Tab::All);
        assert_eq!(Tab::All.prev(), Tab::Team);
        assert_eq!(Tab::Mine.index(), 1);
    }

    #[test]
    fn scroll_request_returns_mounted_approval() {
        let state = mock_state(now());
        assert!(state.request_approval_scroll("dev-ai-001").is_some());
        let state = state.resolve_approval(Decision::Approve);
        assert!(state.request_approval_scroll("dev-ai-001").is_none());
    }

    #[test]
    fn unconnected_backend_acknowledges_with_placeholder() {
        let state = mock_state(now());
        let (state, ack) = state.hire_employee(&UnconnectedBackend);
        assert!(matches!(ack, Acknowledgment::Placeholder(ref msg) if msg.starts_with("Create Employee")));
        assert_eq!(state.employees.len(), 1);

        let logs_before = state.logs.len();
        let (state, ack) = state.clear_logs(&UnconnectedBackend, None);
        assert!(matches!(ack, Acknowledgment::Placeholder(ref msg) if msg.starts_with("Clear activity logs")));
        assert_eq!(state.logs.len(), logs_before);
    }

    struct FakeBackend {
        next: RefCell<Option<Employee>>,
        cleared: RefCell<Vec<Option<String>>>,
    }

    impl ProvisioningService for FakeBackend {
        fn create_employee(&self) -> Result<Employee, ServiceError> {
            self.next.borrow_mut().take().ok_or(ServiceError::Rejected {
                service: "provisioning",
                reason: "exhausted".to_string(),
            })
        }
    }

    impl LogService for FakeBackend {
        fn clear_logs(&self, employee_filter: Option<&str>) -> Result<(), ServiceError> {
            self.cleared
                .borrow_mut()
                .push(employee_filter.map(str::to_string));
            Ok(())
        }
    }

    #[test]
    fn connected_backend_appends_new_employee_once() {
        let backend = FakeBackend {
            next: RefCell::new(Some(employee("qa-ai-002", false))),
            cleared: RefCell::new(Vec::new()),
        };
        let (state, ack) = mock_state(now()).hire_employee(&backend);
        assert_eq!(ack, Acknowledgment::Created("qa-ai-002".to_string()));
        assert_eq!(state.employees.len(), 2);

        backend.next.replace(Some(employee("qa-ai-002", false)));
        let (state, ack) = state.hire_employee(&backend);
        assert_eq!(ack, Acknowledgment::Duplicate("qa-ai-002".to_string()));
        assert_eq!(state.employees.len(), 2);
    }

    #[test]
    fn hired_employee_cannot_carry_stray_pending_flag() {
        let backend = FakeBackend {
            next: RefCell::new(Some(employee("qa-ai-002", true))),
            cleared: RefCell::new(Vec::new()),
        };
        let (state, ack) = mock_state(now()).hire_employee(&backend);
        assert_eq!(ack, Acknowledgment::Created("qa-ai-002".to_string()));
        assert!(!state.employee("qa-ai-002").unwrap().has_approval_pending);
        assert_eq!(state.pending_approvals(), 1);
        assert!(state.pending_invariant_holds());

        let state = state.resolve_approval(Decision::Approve);
        assert_eq!(state.pending_approvals(), 0);
        assert!(state.pending_invariant_holds());
    }

    #[test]
    fn connected_backend_clears_scoped_logs() {
        let backend = FakeBackend {
            next: RefCell::new(None),
            cleared: RefCell::new(Vec::new()),
        };
        let state = mock_state(now());
        let total = state.logs.len();
        let (state, ack) = state.clear_logs(&backend, Some("someone-else"));
        assert_eq!(ack, Acknowledgment::Cleared(0));
        assert_eq!(state.logs.len(), total);

        let (state, ack) = state.clear_logs(&backend, Some("dev-ai-001"));
        assert_eq!(ack, Acknowledgment::Cleared(total));
        assert!(state.logs.is_empty());
        assert_eq!(
            *backend.cleared.borrow(),
            vec![Some("someone-else".to_string()), Some("dev-ai-001".to_string())]
        );
    }
}
