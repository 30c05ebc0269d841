//! Template interpolation over a fixed six-verb set.

use bstr::ByteSlice;

use crate::ZString;
use crate::string::natural_len;

/// One operand for [`ZString::append_format`].
///
/// Each variant pairs with exactly one verb; handing a verb the wrong
/// variant is a contract violation.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    /// `%s`: NUL-terminated text, appended at its natural length.
    Text(&'a [u8]),
    /// `%S`: another string, appended in full.
    Str(&'a ZString),
    /// `%i`: signed decimal.
    Int(i32),
    /// `%I`: signed decimal, maximum width.
    Wide(i64),
    /// `%u`: unsigned decimal.
    Uint(u32),
    /// `%U`: unsigned decimal, maximum width.
    Uwide(u64),
}

/// Decimal digits of `n`, built least-significant-first from the back of
/// `scratch`, returned in correct order. 20 bytes fit `u64::MAX`.
fn decimal(mut n: u64, scratch: &mut [u8; 20]) -> &[u8] {
    let mut i = scratch.len();

    loop {
        i -= 1;
        scratch[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    &scratch[i..]
}

impl ZString {
    fn append_signed(&mut self, n: i64) {
        // The magnitude is computed in the unsigned domain so i64::MIN
        // converts without overflow.
        if n < 0 {
            self.push(b'-');
        }
        self.append(decimal(n.unsigned_abs(), &mut [0; 20]));
    }

    /// Appends `template` with each `%` verb replaced by the matching
    /// argument, in order.
    ///
    /// Literal spans between verbs are appended verbatim. The verb set is
    /// fixed: `%s` `%S` `%i` `%I` `%u` `%U` (see [`Arg`]). There is no
    /// `%%` escape and no width/precision/flag syntax. Surplus arguments
    /// are ignored.
    ///
    /// # Panics
    ///
    /// On any other verb, on a template ending in a bare `%`, on a
    /// verb/argument type mismatch, and when `args` runs out before the
    /// verbs do.
    pub fn append_format(&mut self, template: &[u8], args: &[Arg<'_>]) {
        let mut rest = &template[..natural_len(template)];
        let mut args = args.iter();

        while !rest.is_empty() {
            let Some(pct) = rest.find_byte(b'%') else {
                // No '%' left: append the tail and we're done.
                self.append(rest);
                break;
            };

            if pct > 0 {
                self.append_bounded(rest, pct);
            }
            assert!(pct + 1 < rest.len(), "format template ends with a bare '%'");
            let verb = rest[pct + 1];
            rest = &rest[pct + 2..];

            match (verb, args.next()) {
                (b's', Some(Arg::Text(text))) => self.append(text),
                (b'S', Some(Arg::Str(s))) => self.append_from(s),
                (b'i', Some(Arg::Int(n))) => self.append_signed(i64::from(*n)),
                (b'I', Some(Arg::Wide(n))) => self.append_signed(*n),
                (b'u', Some(Arg::Uint(n))) => self.append(decimal(u64::from(*n), &mut [0; 20])),
                (b'U', Some(Arg::Uwide(n))) => self.append(decimal(*n, &mut [0; 20])),
                (b's' | b'S' | b'i' | b'I' | b'u' | b'U', None) => {
                    panic!("format template has more verbs than arguments")
                }
                (v @ (b's' | b'S' | b'i' | b'I' | b'u' | b'U'), Some(arg)) => {
                    panic!("format verb '%{}' given mismatched argument {arg:?}", char::from(v))
                }
                (v, _) => panic!("unsupported format verb '%{}'", char::from(v)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::decimal;

    #[test]
    fn single_digit() {
        assert_eq!(decimal(0, &mut [0; 20]), b"0");
        assert_eq!(decimal(7, &mut [0; 20]), b"7");
    }

    #[test]
    fn scratch_fits_u64_max() {
        assert_eq!(decimal(u64::MAX, &mut [0; 20]), b"18446744073709551615");
    }
}
