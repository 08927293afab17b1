//! Boot bring-up and phase tracking
pub mod init;
pub mod status;

pub use init::{init_phase, register_boot_components};
pub use status::{register_component, update_component_status, InitStatus};
