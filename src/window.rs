// Copyright 2016 Martin Grabmueller. See the LICENSE file at the
// top-level directory of this distribution for license information.

//! The LZ77 sliding window: two ring buffers, dictionary and lookahead,
//! sitting back-to-back inside a single buffer twice the window size:
//!
//! +----------------+----------------+
//! |dictionary......|lookahead.......|
//! +----------------+----------------+
//!  tl            hd=tl            hd
//!
//! `dictionary.hd` and `lookahead.tl` are always equal — the two rings
//! share a boundary, which moves forward by `shift()`. Indices grow without
//! bound and are only ever used through `ringbuf::mask`, so the window
//! never copies data: advancing the boundary is pure index arithmetic.

use std::io::Read;

use crate::ringbuf::{mask, Ring, BUFFER_SIZE, WINDOW_SIZE};

/// Result of filling the lookahead buffer from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// The lookahead buffer is full (`size() == WINDOW_SIZE`).
    Full,
    /// The source signalled end-of-stream; the lookahead may be partially
    /// filled and callers must still drain it.
    Eof,
}

pub struct Window {
    pub dictionary: Ring,
    pub lookahead: Ring,
    buffer: [u8; BUFFER_SIZE],
}

impl Window {
    /// A fresh window: both rings empty, positioned at the origin.
    pub fn new() -> Window {
        Window {
            dictionary: Ring::new(),
            lookahead: Ring::new(),
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Byte at unbounded index `idx`, taken modulo the doubled buffer size.
    #[inline(always)]
    pub fn byte(&self, idx: usize) -> u8 {
        self.buffer[mask(idx)]
    }

    /// Fill the lookahead buffer from `source` until it is full or `source`
    /// reaches end-of-stream. Each physical write is bounded so it never
    /// wraps past the end of the backing buffer within a single call.
    pub fn read<R: Read>(&mut self, source: &mut R) -> std::io::Result<Fill> {
        loop {
            let run = self.lookahead.run();
            let capacity = self.lookahead.capacity();
            let want = std::cmp::min(run, capacity);
            if want == 0 {
                return Ok(Fill::Full);
            }
            let start = mask(self.lookahead.hd);
            let n = source.read(&mut self.buffer[start..start + want])?;
            self.lookahead.hd += n;
            if n == 0 {
                return Ok(Fill::Eof);
            }
            if n < want {
                // Short read that wasn't EOF: retry for the rest.
                continue;
            }
            if want == capacity {
                return Ok(Fill::Full);
            }
            // `run` was the limiting factor (we hit the buffer wrap point);
            // loop again to fill the remaining capacity from the start.
        }
    }

    /// Advance the dictionary/lookahead boundary by `n` bytes, dropping the
    /// oldest dictionary bytes as needed to keep `dictionary.size() <=
    /// WINDOW_SIZE`. No bytes are copied; only the ring indices move.
    ///
    /// # Panics
    /// Panics (in debug builds) if `n` exceeds the current lookahead size.
    pub fn shift(&mut self, n: usize) {
        debug_assert!(n <= self.lookahead.size());
        let capacity = self.dictionary.capacity();
        self.dictionary.hd += n;
        if n > capacity {
            self.dictionary.tl += n - capacity;
        }
        self.lookahead.tl += n;
    }
}

impl Default for Window {
    fn default() -> Window {
        Window::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn new_window_is_empty() {
        let w = Window::new();
        assert_eq!(0, w.dictionary.size());
        assert_eq!(0, w.lookahead.size());
        assert_eq!(w.dictionary.hd, w.lookahead.tl);
    }

    #[test]
    fn read_fills_lookahead_up_to_window_size() {
        let data = vec![7u8; WINDOW_SIZE * 3];
        let mut src = Cursor::new(data);
        let mut w = Window::new();
        let fill = w.read(&mut src).unwrap();
        assert_eq!(Fill::Full, fill);
        assert_eq!(WINDOW_SIZE, w.lookahead.size());
    }

    #[test]
    fn read_reports_eof_on_short_source() {
        let mut src = Cursor::new(vec![1u8, 2, 3]);
        let mut w = Window::new();
        let fill = w.read(&mut src).unwrap();
        assert_eq!(Fill::Eof, fill);
        assert_eq!(3, w.lookahead.size());
    }

    #[test]
    fn shift_moves_boundary_without_copying() {
        let mut src = Cursor::new(vec![b'a', b'b', b'c', b'd']);
        let mut w = Window::new();
        w.read(&mut src).unwrap();
        assert_eq!(b'a', w.byte(w.lookahead.tl));

        w.shift(2);
        assert_eq!(2, w.dictionary.size());
        assert_eq!(2, w.lookahead.size());
        assert_eq!(w.dictionary.hd, w.lookahead.tl);
        assert_eq!(b'a', w.byte(w.dictionary.tl));
        assert_eq!(b'c', w.byte(w.lookahead.tl));
    }

    #[test]
    fn shift_drops_oldest_dictionary_bytes_past_window_size() {
        let data = vec![42u8; WINDOW_SIZE + 10];
        let mut src = Cursor::new(data);
        let mut w = Window::new();
        w.read(&mut src).unwrap();
        w.shift(WINDOW_SIZE);
        assert_eq!(WINDOW_SIZE, w.dictionary.size());

        w.read(&mut src).unwrap();
        w.shift(10);
        assert_eq!(WINDOW_SIZE, w.dictionary.size());
        assert_eq!(w.dictionary.hd, w.lookahead.tl);
    }
}
