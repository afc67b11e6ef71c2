//! Positional numeral conversion between `u64` and strings of alphabet digits.

use crate::alphabet::Alphabet;

/// Number of digits of `u64::MAX` in the smallest radix (2).
const MAX_DIGITS: usize = u64::BITS as usize;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid char {0:?}")]
    InvalidChar(char),
    #[error("decoded value overflows a 64-bit integer")]
    Overflow,
}

/// Returns how many digits `x` takes in the radix of `alphabet`.
pub fn encoded_len(mut x: u64, alphabet: &Alphabet) -> usize {
    let radix = alphabet.radix();

    let mut n = 1;
    while x >= radix {
        x /= radix;
        n += 1;
    }

    n
}

/// Appends the digits of `x` to `output`, most significant first.
///
/// Zero is written as the alphabet's first character, never as an empty string.
pub fn encode_into(mut x: u64, alphabet: &Alphabet, output: &mut String) {
    let radix = alphabet.radix();

    // Digits come out least significant first, so the buffer is filled from the back.
    let mut buf: [u8; MAX_DIGITS] = [0; MAX_DIGITS];
    let mut pos = MAX_DIGITS;
    loop {
        pos -= 1;
        buf[pos] = (x % radix) as u8;
        x /= radix;

        if x == 0 {
            break;
        }
    }

    output.reserve(MAX_DIGITS - pos);
    for &digit in &buf[pos..] {
        output.push(alphabet.char_at(digit as usize));
    }
}

pub fn encode(x: u64, alphabet: &Alphabet) -> String {
    let mut output = String::with_capacity(encoded_len(x, alphabet));
    encode_into(x, alphabet, &mut output);
    output
}

/// Parses `input` as a number written with the digits of `alphabet`.
///
/// Every character is checked before an overflow is reported, so an input with a foreign
/// character always yields [`DecodeError::InvalidChar`]. The empty string decodes to zero.
pub fn decode(input: &str, alphabet: &Alphabet) -> Result<u64, DecodeError> {
    let radix = alphabet.radix();

    let mut value: Option<u64> = Some(0);
    for c in input.chars() {
        let digit = alphabet.digit(c).ok_or(DecodeError::InvalidChar(c))?;

        value = value
            .and_then(|v| v.checked_mul(radix))
            .and_then(|v| v.checked_add(u64::from(digit)));
    }

    value.ok_or(DecodeError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coder::{DEFAULT_ALPHABET, DEFAULT_REVERSE_ALPHABET};
    use claim::{assert_ok, assert_ok_eq};
    use proptest::prelude::*;

    fn default_alphabet() -> Alphabet {
        Alphabet::from_static(DEFAULT_ALPHABET, DEFAULT_REVERSE_ALPHABET)
    }

    #[test]
    fn encode_should_work() {
        let alphabet = default_alphabet();

        let test_cases = vec![(0, "m"), (1, "n"), (30, "q"), (31, "nm"), (169, "cw"), (22154543, "eqshd")];

        for tc in test_cases {
            assert_eq!(tc.1, encode(tc.0, &alphabet));
            assert_eq!(tc.1.len(), encoded_len(tc.0, &alphabet));
        }
    }

    #[test]
    fn encode_binary_should_work() {
        let alphabet = assert_ok!(Alphabet::new("01"));

        assert_eq!("0", encode(0, &alphabet));
        assert_eq!("101", encode(5, &alphabet));

        let max = encode(u64::MAX, &alphabet);
        assert_eq!(64, max.len());
        assert!(max.chars().all(|c| c == '1'));
    }

    #[test]
    fn encode_into_should_append() {
        let alphabet = assert_ok!(Alphabet::new("0123456789"));

        let mut output = String::from("id-");
        encode_into(1234, &alphabet, &mut output);
        assert_eq!("id-1234", output);
    }

    #[test]
    fn decode_should_work() {
        let alphabet = default_alphabet();

        assert_ok_eq!(decode("eqshd", &alphabet), 22154543);
        assert_ok_eq!(decode("mmmcw", &alphabet), 169);
        assert_ok_eq!(decode("m", &alphabet), 0);
        assert_ok_eq!(decode("", &alphabet), 0);
    }

    #[test]
    fn decode_of_chars_outside_alphabet_should_fail() {
        let alphabet = default_alphabet();

        // 'o' was removed from the default alphabet.
        let result = decode("toshd", &alphabet);
        assert_eq!(result.unwrap_err(), DecodeError::InvalidChar('o'));

        let result = decode("pjz2P", &alphabet);
        assert_eq!(result.unwrap_err(), DecodeError::InvalidChar('P'));

        let result = decode("pjzé", &alphabet);
        assert_eq!(result.unwrap_err(), DecodeError::InvalidChar('é'));
    }

    #[test]
    fn decode_of_too_large_value_should_fail() {
        let alphabet = assert_ok!(Alphabet::new("0123456789"));

        assert_ok_eq!(decode("18446744073709551615", &alphabet), u64::MAX);

        let result = decode("18446744073709551616", &alphabet);
        assert_eq!(result.unwrap_err(), DecodeError::Overflow);
    }

    #[test]
    fn decode_should_report_invalid_char_after_overflow() {
        let alphabet = assert_ok!(Alphabet::new("0123456789"));

        let result = decode("99999999999999999999999x", &alphabet);
        assert_eq!(result.unwrap_err(), DecodeError::InvalidChar('x'));
    }

    #[test]
    fn leading_padding_should_not_overflow() {
        let alphabet = assert_ok!(Alphabet::new("01"));

        let input = format!("{}1", "0".repeat(200));
        assert_ok_eq!(decode(&input, &alphabet), 1);
    }

    proptest! {
        #[test]
        fn default_alphabet_roundtrip(x in any::<u64>()) {
            let alphabet = default_alphabet();
            prop_assert_eq!(decode(&encode(x, &alphabet), &alphabet), Ok(x));
        }

        #[test]
        fn any_radix_roundtrip(radix in 2_usize..=64, x in any::<u64>()) {
            let chars: String = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-_"
                .chars()
                .take(radix)
                .collect();
            let alphabet = Alphabet::new(&chars).unwrap();

            let encoded = encode(x, &alphabet);
            prop_assert_eq!(encoded.len(), encoded_len(x, &alphabet));
            prop_assert_eq!(decode(&encoded, &alphabet), Ok(x));
        }
    }
}
