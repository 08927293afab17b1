//! Kernel heap backing the window records.

use linked_list_allocator::LockedHeap;
use pollwm::klog_info;

const HEAP_SIZE: usize = 4 * 1024 * 1024;

// Static heap buffer embedded in the kernel binary
#[repr(align(4096))]
struct HeapBuffer([u8; HEAP_SIZE]);
static mut HEAP_BUFFER: HeapBuffer = HeapBuffer([0; HEAP_SIZE]);

#[global_allocator]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

/// Hand the static buffer to the allocator.
///
/// # Safety
///
/// Must be called once, before the first allocation.
pub unsafe fn init_heap() {
    let start = core::ptr::addr_of_mut!(HEAP_BUFFER) as *mut u8;
    ALLOCATOR.lock().init(start, HEAP_SIZE);
    klog_info!(
        "heap: {:#x} - {:#x} ({} KB)",
        start as usize,
        start as usize + HEAP_SIZE,
        HEAP_SIZE / 1024
    );
}
