//! Lenient integer parsing.
//!
//! Tokens are read as a leading integer: an optional sign, then decimal digits
//! (single underscores between digits are skipped), stopping at the first
//! other byte. A token without leading digits is 0, so `"3x"` is 3 and `"x3"`
//! is 0. Values beyond `i64` saturate.

/// Parses the leading integer of `token`, or 0 if there is none.
pub fn parse_leading_int(token: impl AsRef<[u8]>) -> i64 {
    let bytes = token.as_ref();
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for (pos, &byte) in digits.iter().enumerate() {
        match byte {
            b'0'..=b'9' => {
                let digit = i64::from(byte - b'0');
                // Accumulate towards the sign so i64::MIN is reachable.
                value = if negative {
                    value.saturating_mul(10).saturating_sub(digit)
                } else {
                    value.saturating_mul(10).saturating_add(digit)
                };
                seen_digit = true;
            }
            b'_' if seen_digit && digits.get(pos + 1).is_some_and(u8::is_ascii_digit) => {}
            _ => break,
        }
    }
    value
}

/// Separators between tokens: ASCII whitespace plus vertical tab.
fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

/// Splits `line` on whitespace and parses every token leniently.
pub fn parse_line(line: &[u8]) -> Vec<i64> {
    line.split(|&b| is_separator(b))
        .filter(|token| !token.is_empty())
        .map(parse_leading_int)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_leading_int("0"), 0);
        assert_eq!(parse_leading_int("42"), 42);
        assert_eq!(parse_leading_int("-17"), -17);
        assert_eq!(parse_leading_int("+8"), 8);
        assert_eq!(parse_leading_int("007"), 7);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_leading_int("3x"), 3);
        assert_eq!(parse_leading_int("12.5"), 12);
        assert_eq!(parse_leading_int("-4abc"), -4);
    }

    #[test]
    fn no_leading_digits_is_zero() {
        assert_eq!(parse_leading_int("x3"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("--1"), 0);
        assert_eq!(parse_leading_int("+-1"), 0);
    }

    #[test]
    fn underscores_between_digits() {
        assert_eq!(parse_leading_int("1_000"), 1000);
        assert_eq!(parse_leading_int("1__0"), 1);
        assert_eq!(parse_leading_int("_1"), 0);
        assert_eq!(parse_leading_int("7_"), 7);
    }

    #[test]
    fn saturates_at_the_bounds() {
        assert_eq!(parse_leading_int("9223372036854775807"), i64::MAX);
        assert_eq!(parse_leading_int("99999999999999999999"), i64::MAX);
        assert_eq!(parse_leading_int("-9223372036854775808"), i64::MIN);
        assert_eq!(parse_leading_int("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn numeric_line() {
        assert_eq!(parse_line(b"5 3 1 4 2\n"), vec![5, 3, 1, 4, 2]);
        assert_eq!(parse_line(b"  7\t-2  \r\n"), vec![7, -2]);
        assert_eq!(parse_line(b""), Vec::<i64>::new());
    }

    #[test]
    fn line_with_one_malformed_token() {
        assert_eq!(parse_line(b"5 3x 1 oops 2\n"), vec![5, 3, 1, 0, 2]);
    }
}
