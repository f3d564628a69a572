// Copyright 2016 Martin Grabmueller. See the LICENSE file at the
// top-level directory of this distribution for license information.

//! Streaming LZ77-style compressor and decompressor. A group of up to
//! eight tokens is preceded by one control byte; bit `k` of that byte
//! (counting from the least significant bit) tells the decoder whether
//! token `k` of the group is a literal or a back-reference. There is no
//! stream header: an empty source produces an empty compressed stream.

use std::io::{self, Read, Write};
use std::num::Wrapping;

use crate::error::Error;
use crate::ringbuf::WINDOW_SIZE;
use crate::select::{self, Token};
use crate::window::{Fill, Window};

const GROUP_SIZE: usize = 8;

/// Buffers up to eight tokens and their control byte, flushing the group
/// to the sink once full (or on request, at end of stream).
struct Group {
    control: u8,
    count: usize,
    payload: [u8; GROUP_SIZE * 2],
    len: usize,
}

impl Group {
    fn new() -> Group {
        Group { control: 0, count: 0, payload: [0; GROUP_SIZE * 2], len: 0 }
    }

    fn push<W: Write>(&mut self, sink: &mut W, token: Token) -> io::Result<()> {
        match token {
            Token::Literal(v) => {
                self.payload[self.len] = v;
                self.len += 1;
            }
            Token::BackRef { off, len } => {
                self.control |= 1 << self.count;
                self.payload[self.len] = off;
                self.payload[self.len + 1] = len;
                self.len += 2;
            }
        }
        self.count += 1;
        if self.count == GROUP_SIZE {
            self.flush(sink)?;
        }
        Ok(())
    }

    fn flush<W: Write>(&mut self, sink: &mut W) -> io::Result<()> {
        if self.count > 0 {
            sink.write_all(&[self.control])?;
            sink.write_all(&self.payload[..self.len])?;
            self.control = 0;
            self.count = 0;
            self.len = 0;
        }
        Ok(())
    }
}

/// Compress the whole of `source`, writing the result to `sink`. Returns
/// `sink` so callers can keep using it (matching `io::copy`'s style).
pub fn compress<R: Read, W: Write>(mut source: R, mut sink: W) -> Result<W, Error> {
    let mut window = Window::new();
    let mut group = Group::new();

    loop {
        match window.read(&mut source)? {
            Fill::Full => emit_one(&mut window, &mut group, &mut sink)?,
            Fill::Eof => {
                while window.lookahead.size() > 0 {
                    emit_one(&mut window, &mut group, &mut sink)?;
                }
                break;
            }
        }
    }
    group.flush(&mut sink)?;
    sink.flush()?;
    Ok(sink)
}

fn emit_one<W: Write>(window: &mut Window, group: &mut Group, sink: &mut W) -> io::Result<()> {
    let (token, consumed) = select::select(window);
    group.push(sink, token)?;
    window.shift(consumed);
    Ok(())
}

/// Read one byte from `source`. `Ok(None)` means a clean end-of-stream.
fn read_byte<R: Read>(source: &mut R) -> io::Result<Option<u8>> {
    let mut b = [0u8; 1];
    let n = source.read(&mut b)?;
    Ok(if n == 0 { None } else { Some(b[0]) })
}

/// Decompress the whole of `source`, writing the result to `sink`.
pub fn decompress<R: Read, W: Write>(mut source: R, mut sink: W) -> Result<W, Error> {
    let mut buf = [0u8; WINDOW_SIZE];
    let mut w = Wrapping(0u8);
    let mut control = 0u8;
    let mut count = 0usize;

    loop {
        let first = match read_byte(&mut source)? {
            Some(b) => b,
            None => break,
        };
        let data = if count == 0 {
            control = first;
            match read_byte(&mut source)? {
                Some(b) => b,
                None => return Err(Error::TruncatedInput),
            }
        } else {
            first
        };

        if (control >> count) & 1 == 1 {
            let off = data;
            let len = match read_byte(&mut source)? {
                Some(b) => b,
                None => return Err(Error::TruncatedInput),
            };
            let distance = Wrapping(off) + Wrapping(1u8);
            for _ in 0..=len {
                let read_idx = (w - distance).0 as usize;
                let byte = buf[read_idx];
                buf[w.0 as usize] = byte;
                sink.write_all(&[byte])?;
                w += Wrapping(1);
            }
        } else {
            buf[w.0 as usize] = data;
            sink.write_all(&[data])?;
            w += Wrapping(1);
        }

        count = (count + 1) % GROUP_SIZE;
    }
    sink.flush()?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(data: &[u8]) -> Vec<u8> {
        let compressed = compress(Cursor::new(data.to_vec()), Vec::new()).unwrap();
        decompress(Cursor::new(compressed), Vec::new()).unwrap()
    }

    #[test]
    fn empty_input_round_trips_to_empty_output() {
        let compressed = compress(Cursor::new(Vec::new()), Vec::new()).unwrap();
        assert!(compressed.is_empty());
        assert_eq!(Vec::<u8>::new(), roundtrip(b""));
    }

    #[test]
    fn single_byte_is_one_literal_group() {
        let compressed = compress(Cursor::new(vec![b'x']), Vec::new()).unwrap();
        assert_eq!(vec![0x00, b'x'], compressed);
        assert_eq!(vec![b'x'], roundtrip(b"x"));
    }

    #[test]
    fn eight_distinct_bytes_make_one_all_literal_group() {
        let data = b"abcdefgh".to_vec();
        let compressed = compress(Cursor::new(data.clone()), Vec::new()).unwrap();
        let mut expected = vec![0x00];
        expected.extend_from_slice(&data);
        assert_eq!(expected, compressed);
        assert_eq!(data, roundtrip(&data));
    }

    #[test]
    fn a_short_final_group_is_flushed_without_padding() {
        let data = b"XYZ".to_vec();
        let compressed = compress(Cursor::new(data.clone()), Vec::new()).unwrap();
        assert_eq!(vec![0x00, b'X', b'Y', b'Z'], compressed);
        assert_eq!(data, roundtrip(&data));
    }

    #[test]
    fn a_run_of_one_byte_compresses_and_round_trips() {
        let data = vec![0u8; 10];
        let compressed = compress(Cursor::new(data.clone()), Vec::new()).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(data, roundtrip(&data));
    }

    #[test]
    fn a_short_repeating_pattern_round_trips() {
        let data = b"ABABABAB".to_vec();
        assert_eq!(data, roundtrip(&data));
    }

    #[test]
    fn matches_may_span_more_than_one_group_of_eight_tokens() {
        let mut data = Vec::new();
        for i in 0..500u32 {
            data.push((i % 7) as u8);
        }
        assert_eq!(data, roundtrip(&data));
    }

    #[test]
    fn a_run_longer_than_the_window_still_round_trips() {
        let data = vec![b'q'; WINDOW_SIZE * 3 + 17];
        assert_eq!(data, roundtrip(&data));
    }

    #[test]
    fn truncated_control_byte_with_no_token_is_an_error() {
        // A lone control byte claiming a literal follows, but nothing does.
        let err = decompress(Cursor::new(vec![0x00]), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput));
    }

    #[test]
    fn truncated_back_reference_is_an_error() {
        // Control byte marks token 0 as a back-reference, offset byte
        // present, length byte missing.
        let err = decompress(Cursor::new(vec![0x01, 0x00]), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput));
    }
}
