#![no_std]
#![no_main]

extern crate alloc;
extern crate rlibc;

mod memory;

use bootloader_api::info::{FrameBufferInfo, PixelFormat as BootPixelFormat};
use bootloader_api::{entry_point, BootInfo};
use core::panic::PanicInfo;
use pollwm::devices::drivers::{PacketFormat, Ps2Controller};
use pollwm::devices::framebuffer::{FramebufferInfo, PixelFormat};
use pollwm::logging::LogLevel;
use pollwm::kernel::{init, status};
use pollwm::{klog_info, klog_warn, kprintln, GuiConfig, Session};

entry_point!(kernel_main);

fn kernel_main(boot_info: &'static mut BootInfo) -> ! {
    unsafe {
        pollwm::logging::init_serial();
        memory::init_heap();
    }
    if cfg!(debug_assertions) {
        pollwm::logging::set_max_level(LogLevel::Debug);
    }

    kprintln!("pollwm {}", env!("CARGO_PKG_VERSION"));
    init::register_boot_components();

    if init::init_phase(init::INTERRUPT_CONTROLLER, || unsafe {
        init::mask_interrupt_controllers()
    })
    .is_err()
    {
        halt();
    }

    let mut ps2 = Ps2Controller::new();
    let format = init::init_phase(init::INPUT_DEVICES, || unsafe { init::init_input(&mut ps2) })
        .unwrap_or(PacketFormat::Standard);

    let Some(fb) = boot_info.framebuffer.as_mut() else {
        status::update_component_status(init::DISPLAY, status::InitStatus::Failed("no framebuffer"));
        klog_warn!("boot: bootloader did not provide a framebuffer");
        halt();
    };
    let Some(info) = framebuffer_info(fb.info()) else {
        status::update_component_status(init::DISPLAY, status::InitStatus::Failed("pixel format"));
        klog_warn!("boot: unsupported pixel format {:?}", fb.info().pixel_format);
        halt();
    };
    let buffer = fb.buffer_mut();

    let session = init::init_phase(init::DISPLAY, move || {
        Session::init_with(info, Some(buffer), GuiConfig::DEFAULT).map_err(|e| e.as_str())
    });
    let Ok(mut session) = session else {
        halt();
    };

    session.set_packet_format(format);
    if let Err(e) = session.create_desktop() {
        klog_warn!("boot: desktop incomplete: {}", e);
    }

    for row in status::boot_report() {
        kprintln!("  {}", row);
    }
    for name in status::failed_components() {
        klog_warn!("boot: continuing without {}", name);
    }

    session.run(&mut ps2);
    let _framebuffer = session.shutdown();
    klog_info!("boot: desktop closed, halting");
    halt()
}

fn framebuffer_info(info: FrameBufferInfo) -> Option<FramebufferInfo> {
    let format = match info.pixel_format {
        BootPixelFormat::Rgb => PixelFormat::Rgb,
        BootPixelFormat::Bgr => PixelFormat::Bgr,
        _ => return None,
    };
    Some(FramebufferInfo {
        width: info.width,
        height: info.height,
        pitch: info.stride * info.bytes_per_pixel,
        bytes_per_pixel: info.bytes_per_pixel,
        format,
    })
}

fn halt() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    kprintln!("PANIC : {} | {:?}", info.message(), info.location());
    halt()
}
