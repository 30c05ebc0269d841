//! Growable, NUL-terminator-compatible byte strings.
//!
//! [`ZString`] is a byte container that always keeps a trailing zero byte
//! after its content, so a view of the buffer can be handed to
//! NUL-terminated text APIs at any time. The price of that guarantee is
//! that content can never contain an embedded zero byte; every input path
//! reads external text at its *natural length*, up to the first zero.
//!
//! On top of the core type sit three small facilities:
//!
//! - a format-interpolation mini-language ([`ZString::append_format`])
//!   with a fixed six-verb set,
//! - a delimiter-collapsing tokenizer ([`next_token`], [`tokens`]),
//! - a buffered line reader ([`SharedStream`], `std` feature) that holds a
//!   stream lock for the duration of one line.
//!
//! # Examples
//!
//! ```rust
//! use zstring::{Arg, ZString};
//!
//! let mut s = ZString::from_text(b"game ");
//! s.append_format(b"%i of %u", &[Arg::Int(-3), Arg::Uint(7)]);
//! assert_eq!(s, "game -3 of 7");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod fmt;
#[cfg(feature = "std")]
mod line_reader;
mod string;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use fmt::Arg;
#[cfg(feature = "std")]
pub use line_reader::{LineRead, ReadError, SharedStream};
pub use string::ZString;
pub use tokenizer::{Tokens, next_token, tokens};
