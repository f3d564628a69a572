// Copyright 2016 Martin Grabmueller. See the LICENSE file at the
// top-level directory of this distribution for license information.

//! Index arithmetic for a ring buffer of compile-time size `WINDOW_SIZE`.
//!
//! A `Ring` never owns bytes itself: it is a pair of monotonically
//! increasing indices `(tl, hd)` into a buffer twice `WINDOW_SIZE` bytes
//! long, so that two rings can sit back-to-back (see `window.rs`) and share
//! a single doubled modulus.

/// Window size. Must be a power of two; the write-index wrap in the decoder
/// (`codec.rs`) relies on it being exactly 256 so that a `Wrapping<u8>`
/// counter does the masking for free.
pub const WINDOW_SIZE: usize = 256;

/// Twice the window size: the length of the physical backing buffer shared
/// by a dictionary ring and a lookahead ring.
pub const BUFFER_SIZE: usize = WINDOW_SIZE * 2;

/// Mask an index into the doubled backing buffer.
#[inline(always)]
pub fn mask(index: usize) -> usize {
    index & (BUFFER_SIZE - 1)
}

/// A ring buffer's extent, expressed as a head/tail pair of unbounded
/// indices. `size = hd - tl`, always `<= WINDOW_SIZE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ring {
    pub hd: usize,
    pub tl: usize,
}

impl Ring {
    /// A ring with no elements, positioned at the origin.
    pub fn new() -> Ring {
        Ring { hd: 0, tl: 0 }
    }

    /// Number of live elements.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.hd - self.tl
    }

    /// Number of elements that can still be appended before the ring
    /// reaches `WINDOW_SIZE`.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        WINDOW_SIZE - self.size()
    }

    /// Number of contiguous bytes writable at `mask(self.hd)` before the
    /// physical write wraps past the end of the doubled backing buffer.
    #[inline(always)]
    pub fn run(&self) -> usize {
        BUFFER_SIZE - mask(self.hd)
    }
}
