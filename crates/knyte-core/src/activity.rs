use crate::ActivityLogEntry;

pub const ALL_EMPLOYEES: &str = "all";

/// Employee filter applied to the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFilter {
    selected: String,
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            selected: ALL_EMPLOYEES.to_string(),
        }
    }
}

impl ActivityFilter {
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_all(&self) -> bool {
        self.selected == ALL_EMPLOYEES
    }

    /// Accepts any value. Names that match no entry leave the view empty.
    pub fn set_selected(&mut self, name: impl Into<String>) {
        self.selected = name.into();
        tracing::info!(employee = %self.selected, "activity filter changed");
    }

    /// `"all"` followed by each employee name in the order it first appears.
    pub fn employee_options(logs: &[ActivityLogEntry]) -> Vec<String> {
        let mut options = vec![ALL_EMPLOYEES.to_string()];
        for entry in logs {
            if !options.iter().any(|seen| seen == &entry.employee) {
                options.push(entry.employee.clone());
            }
        }
        options
    }

    pub fn visible<'a>(&self, logs: &'a [ActivityLogEntry]) -> Vec<&'a ActivityLogEntry> {
        if self.is_all() {
            return logs.iter().collect();
        }
        logs.iter()
            .filter(|entry| entry.employee == self.selected)
            .collect()
    }

    /// Moves to the neighbouring option, wrapping at both ends. A selection
    /// that is no longer an option restarts from `"all"`.
    pub fn cycle(&mut self, logs: &[ActivityLogEntry], step: isize) {
        let options = Self::employee_options(logs);
        let len = options.len() as isize;
        let next = match options.iter().position(|option| option == &self.selected) {
            Some(idx) => (idx as isize + step).rem_euclid(len),
            None => 0,
        };
        self.set_selected(options[next as usize].clone());
    }

    pub fn label(option: &str) -> &str {
        if option == ALL_EMPLOYEES {
            "All Employees"
        } else {
            option
        }
    }
}
