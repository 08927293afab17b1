//! Boot phases run before the display session starts.
//!
//! Every phase is registered in the status table, logged on entry and
//! marked completed or failed when it returns.

use crate::devices::drivers::{PacketFormat, Ps2Controller};
use crate::kernel::status::{register_component, update_component_status, InitStatus};
use pic8259::ChainedPics;

pub const INTERRUPT_CONTROLLER: &str = "Interrupt Controller";
pub const INPUT_DEVICES: &str = "Input Devices";
pub const DISPLAY: &str = "Display";

const PIC_1_OFFSET: u8 = 32;
const PIC_2_OFFSET: u8 = PIC_1_OFFSET + 8;

pub fn register_boot_components() {
    register_component(INTERRUPT_CONTROLLER);
    register_component(INPUT_DEVICES);
    register_component(DISPLAY);
}

/// Run one tracked phase.
pub fn init_phase<T>(
    name: &'static str,
    init_fn: impl FnOnce() -> Result<T, &'static str>,
) -> Result<T, &'static str> {
    update_component_status(name, InitStatus::InProgress);
    klog_info!("boot: initializing {}", name);

    match init_fn() {
        Ok(value) => {
            update_component_status(name, InitStatus::Completed);
            klog_info!("boot: {} ready", name);
            Ok(value)
        }
        Err(e) => {
            update_component_status(name, InitStatus::Failed(e));
            klog_warn!("boot: {} failed: {}", name, e);
            Err(e)
        }
    }
}

/// Remap the 8259 pair away from the CPU exception vectors and mask every
/// line. The desktop polls its devices.
///
/// # Safety
///
/// Port I/O on the PICs; ring 0 only.
pub unsafe fn mask_interrupt_controllers() -> Result<(), &'static str> {
    x86_64::instructions::interrupts::disable();
    let mut pics = ChainedPics::new(PIC_1_OFFSET, PIC_2_OFFSET);
    pics.initialize();
    pics.disable();
    Ok(())
}

/// Bring up the PS/2 controller for polling.
///
/// # Safety
///
/// Port I/O on the 8042; ring 0 only.
pub unsafe fn init_input(controller: &mut Ps2Controller) -> Result<PacketFormat, &'static str> {
    controller.init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::status::component_status;

    #[test]
    fn successful_phase_is_marked_completed() {
        register_component("init-test-ok");
        let value = init_phase("init-test-ok", || Ok(7));
        assert_eq!(value, Ok(7));
        assert_eq!(component_status("init-test-ok"), Some(InitStatus::Completed));
    }

    #[test]
    fn failing_phase_records_the_error() {
        register_component("init-test-err");
        let result: Result<(), _> = init_phase("init-test-err", || Err("timeout"));
        assert_eq!(result, Err("timeout"));
        assert_eq!(
            component_status("init-test-err"),
            Some(InitStatus::Failed("timeout"))
        );
    }
}
