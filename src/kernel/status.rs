//! Boot phase table.
//!
//! Each phase that has to succeed before the desktop can come up (PIC
//! masking, PS/2 bring-up, the framebuffer handoff) owns one row here. The
//! boot glue prints the table once the session is built, and a failed row
//! means the desktop runs degraded: no pointer, for instance, when the
//! auxiliary port never answered.

use alloc::vec::Vec;
use core::fmt;
use spin::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed(&'static str),
}

/// One row of the boot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStatus {
    pub name: &'static str,
    pub status: InitStatus,
}

// Rows stay in registration order, which is also boot order.
static BOOT_TABLE: Mutex<Vec<ComponentStatus>> = Mutex::new(Vec::new());

impl ComponentStatus {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            status: InitStatus::NotStarted,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, InitStatus::Failed(_))
    }
}

/// Add a row. Registering a name twice keeps the first row.
pub fn register_component(name: &'static str) {
    let mut table = BOOT_TABLE.lock();
    if table.iter().all(|c| c.name != name) {
        table.push(ComponentStatus::new(name));
    }
}

/// Unknown names are ignored.
pub fn update_component_status(name: &'static str, status: InitStatus) {
    if let Some(row) = BOOT_TABLE.lock().iter_mut().find(|c| c.name == name) {
        row.status = status;
    }
}

pub fn component_status(name: &str) -> Option<InitStatus> {
    BOOT_TABLE
        .lock()
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.status)
}

/// Snapshot of every row, in boot order.
pub fn boot_report() -> Vec<ComponentStatus> {
    BOOT_TABLE.lock().clone()
}

/// Names of the phases that failed, in boot order.
pub fn failed_components() -> Vec<&'static str> {
    BOOT_TABLE
        .lock()
        .iter()
        .filter(|c| c.is_failed())
        .map(|c| c.name)
        .collect()
}

impl fmt::Display for InitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStatus::NotStarted => f.write_str("pending"),
            InitStatus::InProgress => f.write_str("running"),
            InitStatus::Completed => f.write_str("ok"),
            InitStatus::Failed(err) => write!(f, "FAILED ({})", err),
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<24} {}", self.name, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    // The table is process-wide, so every test uses its own names.

    #[test]
    fn registering_twice_keeps_one_pending_row() {
        register_component("status-test-a");
        register_component("status-test-a");
        assert_eq!(component_status("status-test-a"), Some(InitStatus::NotStarted));
        let rows = boot_report()
            .iter()
            .filter(|c| c.name == "status-test-a")
            .count();
        assert_eq!(rows, 1);
    }

    #[test]
    fn failures_are_reported_by_name() {
        register_component("status-test-b");
        register_component("status-test-c");
        update_component_status("status-test-b", InitStatus::Failed("no aux port"));
        update_component_status("status-test-c", InitStatus::Completed);

        let status = component_status("status-test-b").unwrap();
        assert_eq!(status.to_string(), "FAILED (no aux port)");
        let failed = failed_components();
        assert!(failed.contains(&"status-test-b"));
        assert!(!failed.contains(&"status-test-c"));
        assert_eq!(component_status("status-test-missing"), None);
    }

    #[test]
    fn rows_are_padded_for_the_serial_table() {
        let line = format!("{}", ComponentStatus::new("Display"));
        assert_eq!(line.len(), 24 + 1 + "pending".len());
        assert!(line.starts_with("Display "));
        assert!(line.ends_with("pending"));
    }
}
