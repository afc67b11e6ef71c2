use crate::coder::ConfigError;

/// Marks a byte that is not part of the alphabet in a reverse table.
pub(crate) const INVALID: u8 = 0xff;

pub(crate) const MIN_ALPHABET_LEN: usize = 2;

pub(crate) const fn compute_reverse(alphabet: &[u8]) -> [u8; 256] {
    let mut table: [u8; 256] = [INVALID; 256];

    let mut i = 0;
    while i < alphabet.len() {
        let index = alphabet[i] as usize;
        table[index] = i as u8;
        i += 1;
    }

    table
}

/// The digit set of a [`Coder`](crate::Coder).
///
/// Digit `i` is the `i`-th character; the first one doubles as the padding character.
/// Only ASCII characters are accepted, so an alphabet has at most 128 digits and every
/// digit fits in a single byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Box<str>,
    reverse: [u8; 256],
}

impl Alphabet {
    pub fn new(alphabet: &str) -> Result<Self, ConfigError> {
        if let Some(c) = alphabet.chars().find(|c| !c.is_ascii()) {
            return Err(ConfigError::NonAsciiAlphabet(c));
        }

        let bytes = alphabet.as_bytes();
        if bytes.len() < MIN_ALPHABET_LEN {
            return Err(ConfigError::AlphabetTooShort(bytes.len()));
        }

        let mut reverse: [u8; 256] = [INVALID; 256];
        for (i, &b) in bytes.iter().enumerate() {
            if reverse[b as usize] != INVALID {
                return Err(ConfigError::DuplicateChar(b as char));
            }
            reverse[b as usize] = i as u8;
        }

        Ok(Self {
            chars: alphabet.into(),
            reverse,
        })
    }

    /// Builds an alphabet whose reverse table was computed at compile time.
    pub(crate) fn from_static(chars: &'static str, reverse: [u8; 256]) -> Self {
        Self {
            chars: chars.into(),
            reverse,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn radix(&self) -> u64 {
        self.chars.len() as u64
    }

    pub fn padding(&self) -> char {
        self.chars.as_bytes()[0] as char
    }

    pub(crate) fn char_at(&self, digit: usize) -> char {
        self.chars.as_bytes()[digit] as char
    }

    /// Returns the digit value of `c`, or `None` if `c` is not in the alphabet.
    pub fn digit(&self, c: char) -> Option<u8> {
        if !c.is_ascii() {
            return None;
        }

        match self.reverse[c as usize] {
            INVALID => None,
            digit => Some(digit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_none, assert_ok, assert_some_eq};

    #[test]
    fn compute_reverse_should_map_every_char() {
        let table = compute_reverse(b"ba9");

        assert_eq!(1, table[b'a' as usize]);
        assert_eq!(0, table[b'b' as usize]);
        assert_eq!(2, table[b'9' as usize]);
        assert_eq!(INVALID, table[b'c' as usize]);
    }

    #[test]
    fn digit_should_work() {
        let alphabet = assert_ok!(Alphabet::new("xyz"));

        assert_some_eq!(alphabet.digit('x'), 0);
        assert_some_eq!(alphabet.digit('z'), 2);
        assert_none!(alphabet.digit('a'));
        assert_none!(alphabet.digit('é'));
        assert_eq!('x', alphabet.padding());
        assert_eq!(3, alphabet.radix());
    }

    #[test]
    fn too_short_alphabet_should_fail() {
        assert_eq!(Alphabet::new("").unwrap_err(), ConfigError::AlphabetTooShort(0));
        assert_eq!(Alphabet::new("a").unwrap_err(), ConfigError::AlphabetTooShort(1));
    }

    #[test]
    fn duplicate_char_should_fail() {
        let result = Alphabet::new("abcb");
        assert_eq!(result.unwrap_err(), ConfigError::DuplicateChar('b'));
    }

    #[test]
    fn non_ascii_alphabet_should_fail() {
        let result = Alphabet::new("abçd");
        assert_eq!(result.unwrap_err(), ConfigError::NonAsciiAlphabet('ç'));
    }

    #[test]
    fn full_ascii_alphabet_should_work() {
        let chars: String = (0u8..128).map(char::from).collect();
        let alphabet = assert_ok!(Alphabet::new(&chars));

        assert_eq!(128, alphabet.len());
        assert_some_eq!(alphabet.digit('\u{7f}'), 127);
    }
}
