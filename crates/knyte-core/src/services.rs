use crate::Employee;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{service} backend is not connected")]
    NotConnected { service: &'static str },
    #[error("{service} backend rejected the request: {reason}")]
    Rejected {
        service: &'static str,
        reason: String,
    },
}

/// Provisions new agent employees.
pub trait ProvisioningService {
    fn create_employee(&self) -> Result<Employee, ServiceError>;
}

/// Manages the activity log store.
pub trait LogService {
    fn clear_logs(&self, employee_filter: Option<&str>) -> Result<(), ServiceError>;
}

/// Stand-in used until a real backend is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconnectedBackend;

impl ProvisioningService for UnconnectedBackend {
    fn create_employee(&self) -> Result<Employee, ServiceError> {
        Err(ServiceError::NotConnected {
            service: "provisioning",
        })
    }
}

impl LogService for UnconnectedBackend {
    fn clear_logs(&self, _employee_filter: Option<&str>) -> Result<(), ServiceError> {
        Err(ServiceError::NotConnected { service: "log" })
    }
}

/// What the user is told after a backend intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgment {
    Placeholder(String),
    Created(String),
    Duplicate(String),
    Cleared(usize),
}

impl Acknowledgment {
    pub fn message(&self) -> String {
        match self {
            Acknowledgment::Placeholder(message) => message.clone(),
            Acknowledgment::Created(name) => format!("Hired {name}"),
            Acknowledgment::Duplicate(name) => format!("{name} is already on the team"),
            Acknowledgment::Cleared(count) => format!("Cleared {count} log entries"),
        }
    }
}
