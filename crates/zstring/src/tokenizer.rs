//! Delimiter-collapsing field splitting.

use bstr::ByteSlice;

use crate::ZString;
use crate::string::natural_len;

/// Splits `text` into a leading token and the tail just past it, after
/// skipping a maximal run of delimiter bytes. The token is empty only
/// when nothing but delimiters remained.
fn split_leading<'a>(text: &'a [u8], delims: &[u8]) -> (&'a [u8], &'a [u8]) {
    let start = text
        .iter()
        .position(|&b| delims.find_byte(b).is_none())
        .unwrap_or(text.len());
    let tail = &text[start..];
    let end = tail
        .iter()
        .position(|&b| delims.find_byte(b).is_some())
        .unwrap_or(tail.len());
    (&tail[..end], &tail[end..])
}

/// Advances a cursor to the next delimiter-separated token.
///
/// `cursor` is a live position inside some larger text, or `None` once
/// exhausted. If exhausted this is a no-op: `token` is emptied and `None`
/// comes back. Otherwise a maximal run of bytes from `delims` is skipped,
/// the maximal following run of non-delimiter bytes replaces `token`'s
/// content, and the returned cursor points just past that run, or the
/// call returns `None` if the run was empty (nothing but delimiters
/// remained). Consecutive delimiters collapse; no empty tokens are ever
/// produced.
///
/// Both `text` behind the cursor and `delims` are read at their natural
/// length.
///
/// # Panics
///
/// If `delims` has no bytes before its natural end.
///
/// # Examples
///
/// ```rust
/// use zstring::{ZString, next_token};
///
/// let mut token = ZString::new();
/// let cursor = next_token(Some(b",,a,,b,,"), &mut token, b",");
/// assert_eq!(token, "a");
/// let cursor = next_token(cursor, &mut token, b",");
/// assert_eq!(token, "b");
/// assert!(next_token(cursor, &mut token, b",").is_none());
/// ```
pub fn next_token<'a>(
    cursor: Option<&'a [u8]>,
    token: &mut ZString,
    delims: &[u8],
) -> Option<&'a [u8]> {
    let delims = &delims[..natural_len(delims)];
    assert!(!delims.is_empty(), "empty delimiter set");

    token.assign(b"");
    let text = cursor?;
    let text = &text[..natural_len(text)];

    let (tok, tail) = split_leading(text, delims);
    token.append(tok);

    if tok.is_empty() { None } else { Some(tail) }
}

/// Borrowing iterator over the tokens of `text`, for callers that do not
/// need the cursor protocol. Same splitting rules as [`next_token`],
/// without the copy into an owned token.
///
/// # Panics
///
/// If `delims` has no bytes before its natural end.
#[must_use]
pub fn tokens<'a>(text: &'a [u8], delims: &'a [u8]) -> Tokens<'a> {
    let delims = &delims[..natural_len(delims)];
    assert!(!delims.is_empty(), "empty delimiter set");

    Tokens {
        rest: &text[..natural_len(text)],
        delims,
    }
}

/// Iterator returned by [`tokens`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a [u8],
    delims: &'a [u8],
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let (tok, tail) = split_leading(self.rest, self.delims);
        self.rest = tail;
        if tok.is_empty() { None } else { Some(tok) }
    }
}
