// Copyright 2016 Martin Grabmueller. See the LICENSE file at the
// top-level directory of this distribution for license information.

//! Match selection: decide, for the current lookahead, whether to emit a
//! literal byte or a back-reference, and how many bytes that decision
//! consumes from the window.

use crate::kmp;
use crate::window::Window;

/// One encoded unit: a literal byte, or a back-reference expressed as the
/// already-truncated, wire-ready `(off, len)` byte pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    BackRef { off: u8, len: u8 },
}

/// Run the KMP search and apply the literal/back-reference heuristic.
/// Returns the token to emit and the number of window bytes it consumes;
/// callers are responsible for calling `window.shift(consumed)` afterwards.
pub fn select(window: &Window) -> (Token, usize) {
    let m = kmp::search(window);
    let tl = window.lookahead.tl;

    // A length-2 match immediately followed by bytes that would begin a
    // better match isn't worth spending two bytes on.
    let weak_length_two = m.length == 2
        && window.lookahead.size() > 3
        && window.byte(tl + 2) == window.byte(tl)
        && (window.byte(tl + 3) == window.byte(tl)
            || window.byte(tl + 3) == window.byte(window.dictionary.tl + m.length));

    if m.length < 2 || weak_length_two {
        (Token::Literal(window.byte(tl)), 1)
    } else {
        let off = (window.dictionary.size() - m.offset - 1) as u8;
        let len = (m.length - 1) as u8;
        (Token::BackRef { off, len }, m.length)
    }
}
