// Copyright 2016 Martin Grabmueller. See the LICENSE file at the
// top-level directory of this distribution for license information.

pub mod error;
pub mod ringbuf;
pub mod window;
pub mod kmp;
pub mod select;
pub mod codec;
pub mod count;

pub use codec::{compress, decompress};
