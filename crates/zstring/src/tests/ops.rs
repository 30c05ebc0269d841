use rstest::rstest;

use crate::{Arg, ZString, next_token};

#[test]
fn new_is_empty_and_terminated() {
    let s = ZString::new();
    assert!(s.is_empty());
    assert_eq!(s.as_bytes_with_nul(), b"\0");
    assert_eq!(s.capacity(), 2 * size_of::<usize>());
}

#[test]
fn from_text_copies_content() {
    let s = ZString::from_text(b"hello");
    assert_eq!(s, "hello");
    assert_eq!(s.as_bytes_with_nul(), b"hello\0");
}

#[test]
fn text_is_read_at_natural_length() {
    // Bytes past an embedded NUL are invisible, as they would be to any
    // NUL-terminated text API.
    assert_eq!(ZString::from_text(b"ab\0c"), "ab");

    let mut s = ZString::from_text(b"x");
    s.append(b"y\0z");
    assert_eq!(s, "xy");
}

#[rstest]
#[case(b"hello".as_slice(), 3, b"hel".as_slice())]
#[case(b"hi".as_slice(), 10, b"hi".as_slice())]
#[case(b"hi".as_slice(), 0, b"".as_slice())]
#[case(b"ab\0cd".as_slice(), 4, b"ab".as_slice())]
fn append_bounded_truncates(#[case] text: &[u8], #[case] n: usize, #[case] want: &[u8]) {
    let mut s = ZString::new();
    s.append_bounded(text, n);
    assert_eq!(s, want);
}

#[rstest]
#[case(b"hello".as_slice(), 3, b"hel".as_slice())]
#[case(b"hi".as_slice(), 10, b"hi".as_slice())]
fn assign_bounded_truncates(#[case] text: &[u8], #[case] max: usize, #[case] want: &[u8]) {
    let mut s = ZString::from_text(b"previous");
    s.assign_bounded(text, max);
    assert_eq!(s, want);
}

#[test]
fn assign_overwrites_in_full() {
    let mut s = ZString::from_text(b"a long previous value");
    s.assign(b"short");
    assert_eq!(s, "short");
}

#[test]
fn assign_from_binary_copies() {
    let src = ZString::from_text(b"payload");
    let mut dest = ZString::from_text(b"x");
    dest.assign_from(&src);
    assert_eq!(dest, src);
}

#[test]
fn append_all_in_order() {
    let mut s = ZString::new();
    s.append_all(&[b"a", b"bc", b"", b"d"]);
    assert_eq!(s, "abcd");
}

#[test]
fn append_all_from_in_order() {
    let one = ZString::from_text(b"one");
    let two = ZString::from_text(b"two");
    let mut s = ZString::from_text(b"-");
    s.append_all_from(&[&one, &two]);
    assert_eq!(s, "-onetwo");
}

#[test]
fn append_chars_stops_at_sentinel() {
    let mut s = ZString::new();
    s.append_chars(&[b'a', b'b', 0, b'c']);
    assert_eq!(s, "ab");
}

#[test]
fn push_zero_is_a_no_op() {
    let mut s = ZString::from_text(b"a");
    s.push(0);
    assert_eq!(s, "a");
    s.push(b'b');
    assert_eq!(s, "ab");
}

#[test]
fn equals_is_content_equality() {
    assert_eq!(ZString::from_text(b"abc"), ZString::from_text(b"abc"));
    assert_ne!(ZString::from_text(b"abc"), ZString::from_text(b"abd"));
    assert_ne!(ZString::from_text(b"abc"), ZString::from_text(b"ab"));

    // Equality ignores allocation history.
    let mut grown = ZString::from_text(&[b'x'; 100]);
    grown.assign(b"abc");
    assert_eq!(grown, ZString::from_text(b"abc"));
}

#[test]
fn capacity_rounds_to_power_of_two() {
    let s = ZString::from_text(&[b'x'; 20]);
    assert_eq!(s.capacity(), 32);
    assert_eq!(ZString::from_text(&[b'x'; 31]).capacity(), 32);
    assert_eq!(ZString::from_text(&[b'x'; 32]).capacity(), 64);
}

#[test]
fn capacity_never_shrinks() {
    let mut s = ZString::from_text(&[b'x'; 100]);
    let cap = s.capacity();
    s.assign(b"");
    assert!(s.is_empty());
    assert_eq!(s.capacity(), cap);
}

#[test]
fn format_signed_and_unsigned() {
    let mut s = ZString::new();
    s.append_format(b"%i-%u", &[Arg::Int(-123), Arg::Uint(7)]);
    assert_eq!(s, "-123-7");
}

#[test]
fn format_most_negative_converts_without_overflow() {
    let mut s = ZString::new();
    s.append_format(b"%I", &[Arg::Wide(i64::MIN)]);
    assert_eq!(s, "-9223372036854775808");

    let mut s = ZString::new();
    s.append_format(b"%i", &[Arg::Int(i32::MIN)]);
    assert_eq!(s, "-2147483648");
}

#[test]
fn format_text_verbs() {
    let name = ZString::from_text(b"queen");
    let mut s = ZString::from_text(b">");
    s.append_format(
        b" %s %S %U",
        &[Arg::Text(b"take"), Arg::Str(&name), Arg::Uwide(u64::MAX)],
    );
    assert_eq!(s, "> take queen 18446744073709551615");
}

#[test]
fn format_without_verbs_appends_verbatim() {
    let mut s = ZString::new();
    s.append_format(b"plain text", &[]);
    assert_eq!(s, "plain text");
}

#[test]
#[should_panic(expected = "unsupported format verb")]
fn format_rejects_unknown_verb() {
    ZString::new().append_format(b"%d", &[Arg::Int(1)]);
}

#[test]
#[should_panic(expected = "unsupported format verb")]
fn format_rejects_percent_escape() {
    ZString::new().append_format(b"100%%", &[]);
}

#[test]
#[should_panic(expected = "mismatched argument")]
fn format_rejects_wrong_argument() {
    ZString::new().append_format(b"%i", &[Arg::Uint(1)]);
}

#[test]
#[should_panic(expected = "more verbs than arguments")]
fn format_rejects_missing_argument() {
    ZString::new().append_format(b"%i %i", &[Arg::Int(1)]);
}

#[test]
#[should_panic(expected = "bare '%'")]
fn format_rejects_trailing_percent() {
    ZString::new().append_format(b"abc%", &[]);
}

#[test]
fn next_token_walks_and_exhausts() {
    let mut token = ZString::new();

    let cursor = next_token(Some(b",,a,,b,,"), &mut token, b",");
    assert_eq!(token, "a");
    let cursor = next_token(cursor, &mut token, b",");
    assert_eq!(token, "b");
    let cursor = next_token(cursor, &mut token, b",");
    assert!(cursor.is_none());
    assert!(token.is_empty());
}

#[test]
fn next_token_on_exhausted_cursor_clears_token() {
    let mut token = ZString::from_text(b"stale");
    assert!(next_token(None, &mut token, b",").is_none());
    assert!(token.is_empty());
}

#[test]
fn next_token_on_delimiters_only_is_exhausted() {
    let mut token = ZString::new();
    assert!(next_token(Some(b",;,"), &mut token, b",;").is_none());
    assert!(token.is_empty());
}

#[test]
#[should_panic(expected = "empty delimiter set")]
fn next_token_rejects_empty_delimiters() {
    next_token(Some(b"a"), &mut ZString::new(), b"");
}
