//! The core string type and its growth primitive.

use alloc::vec::Vec;
use core::fmt;

use bstr::ByteSlice;

/// Minimum allocation: two machine words.
const BASELINE: usize = 2 * size_of::<usize>();

/// Rounds `n` up to the next power of two, at least [`BASELINE`].
fn round_up(n: usize) -> usize {
    n.next_power_of_two().max(BASELINE)
}

/// Length of NUL-terminated text: everything before the first zero byte,
/// or the whole slice if it has none.
pub(crate) fn natural_len(text: &[u8]) -> usize {
    text.find_byte(0).unwrap_or(text.len())
}

/// A growable byte string that always carries a zero terminator after its
/// content.
///
/// The allocation is a power of two, at least [`round_up`]`(len + 1)`,
/// and never shrinks while the value lives; growth is amortized the usual
/// doubling way. `buf[len]` is always zero and no content byte is zero,
/// so `buf[..=len]` is valid NUL-terminated text at all times.
///
/// External text arguments (`&[u8]`) are read at their natural length:
/// bytes past an embedded zero are invisible, exactly as they would be to
/// a NUL-terminated text API. Consequently the byte 0 cannot enter the
/// content through any operation.
///
/// A `ZString` has single-owner semantics; dropping it releases the
/// buffer. Mutation requires `&mut` access, so concurrent use needs
/// external synchronization, which the borrow checker enforces.
pub struct ZString {
    /// Storage. `buf.len()` is the allocation size; `Vec::capacity` is
    /// never relied upon.
    buf: Vec<u8>,
    /// Content bytes, excluding the terminator at `buf[len]`.
    len: usize,
}

impl ZString {
    /// Creates an empty string with the baseline allocation.
    #[must_use]
    pub fn new() -> Self {
        let s = Self {
            buf: alloc::vec![0; BASELINE],
            len: 0,
        };
        debug_assert!(s.is_valid());
        s
    }

    /// Creates a string holding a copy of `text`, read at its natural
    /// length.
    #[must_use]
    pub fn from_text(text: &[u8]) -> Self {
        let mut s = Self::new();
        s.assign(text);
        s
    }

    /// Content length in bytes, excluding the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no content bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocation size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The content bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The content bytes plus the trailing zero, for handing to
    /// NUL-terminated text APIs.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// Structural invariant, exercised by debug assertions and the test
    /// suite.
    pub(crate) fn is_valid(&self) -> bool {
        self.buf.len().is_power_of_two()
            && self.buf.len() >= round_up(self.len + 1)
            && self.buf[self.len] == 0
            && self.buf[..self.len].find_byte(0).is_none()
    }

    /// The only place where `len` and the allocation change.
    ///
    /// Grows lazily: the allocation is extended (zero-filled) only when
    /// too small for `len + 1`, and never shrinks. Between setting `len`
    /// and the caller rewriting `buf[..len]`, stale bytes (possibly
    /// zeros) may sit inside the content range, so the value can be
    /// invalid here; every caller re-establishes the invariant before
    /// returning.
    fn resize(&mut self, len: usize) {
        self.len = len;

        let want = round_up(len + 1);
        if self.buf.len() < want {
            self.buf.resize(want, 0);
        }

        self.buf[len] = 0;
    }

    fn copy_in(&mut self, src: &[u8], n: usize) {
        self.resize(n);
        self.buf[..n].copy_from_slice(&src[..n]);
        debug_assert!(self.is_valid());
    }

    fn extend_from(&mut self, src: &[u8], n: usize) {
        let old = self.len;
        self.resize(old + n);
        self.buf[old..old + n].copy_from_slice(&src[..n]);
        debug_assert!(self.is_valid());
    }

    /// Replaces the content with a copy of `text`, read at its natural
    /// length.
    pub fn assign(&mut self, text: &[u8]) {
        self.copy_in(text, natural_len(text));
    }

    /// Replaces the content with a binary copy of `other`'s content.
    pub fn assign_from(&mut self, other: &ZString) {
        debug_assert!(other.is_valid());
        self.copy_in(other.as_bytes(), other.len);
    }

    /// Replaces the content with at most `max` bytes of `text`.
    ///
    /// Copies `min(max, natural length)` bytes; a bound wider than the
    /// text truncates to the text.
    pub fn assign_bounded(&mut self, text: &[u8], max: usize) {
        self.copy_in(text, natural_len(text).min(max));
    }

    /// Appends `text`, read at its natural length.
    pub fn append(&mut self, text: &[u8]) {
        self.extend_from(text, natural_len(text));
    }

    /// Appends at most `n` bytes of `text`.
    pub fn append_bounded(&mut self, text: &[u8], n: usize) {
        self.extend_from(text, natural_len(text).min(n));
    }

    /// Appends a binary copy of `other`'s content.
    pub fn append_from(&mut self, other: &ZString) {
        debug_assert!(other.is_valid());
        self.extend_from(other.as_bytes(), other.len);
    }

    /// Appends every part in order, each read at its natural length.
    pub fn append_all(&mut self, parts: &[&[u8]]) {
        for part in parts {
            self.append(part);
        }
    }

    /// Appends the content of every part in order.
    pub fn append_all_from(&mut self, parts: &[&ZString]) {
        for part in parts {
            self.append_from(part);
        }
    }

    /// Appends one byte. `push(0)` appends nothing: in the
    /// character-append protocol the value 0 doubles as the end-of-list
    /// sentinel, so the byte 0 is unappendable, and the content can
    /// never hold a terminator byte anyway.
    pub fn push(&mut self, c: u8) {
        if c == 0 {
            return;
        }
        self.resize(self.len + 1);
        self.buf[self.len - 1] = c;
        debug_assert!(self.is_valid());
    }

    /// Appends a character sequence, stopping at the first 0 in `chars`.
    ///
    /// Bytes at and past the 0 are never appended: 0 marks the end of
    /// the list, it is not data.
    pub fn append_chars(&mut self, chars: &[u8]) {
        for &c in chars {
            if c == 0 {
                break;
            }
            self.push(c);
        }
    }
}

impl Default for ZString {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ZString {
    fn clone(&self) -> Self {
        Self::from_text(self.as_bytes())
    }
}

impl From<&[u8]> for ZString {
    fn from(text: &[u8]) -> Self {
        Self::from_text(text)
    }
}

impl From<&str> for ZString {
    fn from(text: &str) -> Self {
        Self::from_text(text.as_bytes())
    }
}

impl PartialEq for ZString {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(self.is_valid() && other.is_valid());
        self.len == other.len && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ZString {}

impl PartialEq<[u8]> for ZString {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for ZString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for ZString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for ZString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for ZString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bytes().as_bstr(), f)
    }
}

impl fmt::Display for ZString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bytes().as_bstr(), f)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use alloc::vec::Vec;
    use core::fmt;

    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use super::ZString;

    impl Serialize for ZString {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(self.as_bytes())
        }
    }

    struct BytesVisitor;

    impl<'de> de::Visitor<'de> for BytesVisitor {
        type Value = ZString;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("bytes")
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<ZString, E> {
            Ok(ZString::from_text(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<ZString, E> {
            Ok(ZString::from_text(v.as_bytes()))
        }

        // Formats without a native bytes type emit sequences.
        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<ZString, A::Error> {
            let mut bytes = Vec::new();
            while let Some(b) = seq.next_element::<u8>()? {
                bytes.push(b);
            }
            Ok(ZString::from_text(&bytes))
        }
    }

    impl<'de> Deserialize<'de> for ZString {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_bytes(BytesVisitor)
        }
    }
}
