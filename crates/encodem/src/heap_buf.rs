//! An owned, growable byte allocation with exact capacity.

use alloc::alloc::{alloc_zeroed, dealloc, handle_alloc_error};
use core::{alloc::Layout, fmt, ptr::NonNull, slice};

/// An owned byte region with explicit, exact capacity.
///
/// Unlike `Vec<u8>`, the capacity is under the caller's control:
/// [`grow_to`](HeapBuf::grow_to) doubles from 1 until the target fits and
/// never over-allocates beyond that. Memory is zero-initialized. Ownership is
/// move-only; copying is explicit via [`copy`](HeapBuf::copy), and
/// [`take`](HeapBuf::take) transfers the allocation while leaving the source
/// empty.
pub struct HeapBuf {
    ptr: NonNull<u8>,
    cap: usize,
}

fn layout_for(cap: usize) -> Layout {
    match Layout::from_size_align(cap, 1) {
        Ok(layout) => layout,
        Err(_) => panic!("capacity overflow"),
    }
}

impl HeapBuf {
    /// An empty buffer; allocates nothing.
    #[must_use]
    pub const fn new() -> Self {
        HeapBuf {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    /// A zero-filled buffer of exactly `cap` bytes.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts on allocation failure.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        if cap == 0 {
            return HeapBuf::new();
        }
        let layout = layout_for(cap);
        let raw = unsafe { alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            handle_alloc_error(layout);
        };
        HeapBuf { ptr, cap }
    }

    /// Current capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// True when nothing is allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cap == 0
    }

    /// The whole region as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        // A dangling, well-aligned pointer is fine for a zero-length slice.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    /// The whole region as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }

    /// Grows until at least `target` bytes fit, doubling from 1.
    ///
    /// Contents are preserved; the old allocation is released only after the
    /// copy into the new one has completed. No-op when `target` already fits.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts on allocation failure.
    pub fn grow_to(&mut self, target: usize) {
        if target <= self.cap {
            return;
        }
        let mut cap = if self.cap == 0 { 1 } else { self.cap };
        while cap < target {
            cap = match cap.checked_mul(2) {
                Some(next) => next,
                None => panic!("capacity overflow"),
            };
        }
        let mut next = HeapBuf::with_capacity(cap);
        next.as_mut_slice()[..self.cap].copy_from_slice(self.as_slice());
        *self = next;
    }

    /// An independent deep copy with the same capacity.
    #[must_use]
    pub fn copy(&self) -> Self {
        let mut out = HeapBuf::with_capacity(self.cap);
        out.as_mut_slice().copy_from_slice(self.as_slice());
        out
    }

    /// Transfers the allocation to the caller, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> HeapBuf {
        core::mem::take(self)
    }
}

impl Default for HeapBuf {
    fn default() -> Self {
        HeapBuf::new()
    }
}

impl Drop for HeapBuf {
    fn drop(&mut self) {
        if self.cap > 0 {
            unsafe { dealloc(self.ptr.as_ptr(), layout_for(self.cap)) };
        }
    }
}

// The allocation is uniquely owned and only reachable through &self/&mut self.
unsafe impl Send for HeapBuf {}
unsafe impl Sync for HeapBuf {}

impl fmt::Debug for HeapBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBuf").field("cap", &self.cap).finish()
    }
}
