// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::{alloc::Layout, fmt, ptr::NonNull};

use alloc::alloc::{alloc_zeroed, dealloc};

const PAGE_SIZE: usize = 0x1000;

#[derive(Debug)]
pub enum PageAlignErr {
    Alloc,
    Layout,
}

impl fmt::Display for PageAlignErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Alloc => write!(f, "failed to allocate page aligned memory"),
            Self::Layout => write!(f, "size was not suitable for a page aligned allocation"),
        }
    }
}

/// Zeroed, page aligned scratch memory handed over to a service for the lifetime of its session.
#[derive(Debug)]
pub struct PageAlignedBuffer {
    buffer: NonNull<u8>,
    layout: Layout,
}

impl PageAlignedBuffer {
    pub fn allocate(size: usize) -> Result<Self, PageAlignErr> {
        let layout = Self::layout_for_size(size)?;
        // SAFETY: layout has a non-zero size, checked in layout_for_size.
        let buffer = NonNull::new(unsafe { alloc_zeroed(layout) }).ok_or(PageAlignErr::Alloc)?;

        Ok(Self { buffer, layout })
    }

    pub const fn as_ptr(&self) -> *const u8 {
        self.buffer.as_ptr()
    }

    pub fn is_page_aligned(&self) -> bool {
        self.as_ptr() as usize % PAGE_SIZE == 0
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn layout_for_size(size: usize) -> Result<Layout, PageAlignErr> {
        if size == 0 || size % PAGE_SIZE != 0 {
            return Err(PageAlignErr::Layout);
        }

        Layout::from_size_align(size, PAGE_SIZE).map_err(|_| PageAlignErr::Layout)
    }
}

impl Drop for PageAlignedBuffer {
    fn drop(&mut self) {
        // SAFETY: buffer was allocated with exactly this layout.
        unsafe { dealloc(self.buffer.as_ptr(), self.layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;

    #[test]
    fn buffer_is_page_aligned() {
        let buffer = PageAlignedBuffer::allocate(0x10000).unwrap();

        assert!(buffer.is_page_aligned());
        assert_eq!(buffer.size(), 0x10000);
    }

    #[test]
    fn odd_sizes_are_rejected() {
        assert_matches!(PageAlignedBuffer::allocate(0), Err(PageAlignErr::Layout));
        assert_matches!(PageAlignedBuffer::allocate(0x1234), Err(PageAlignErr::Layout));
    }
}
