use crate::alphabet::{compute_reverse, Alphabet};
use crate::base::{self, DecodeError};
use crate::permutation::Permutation;

/// Digits and lowercase letters, minus look-alikes such as `0`, `o`, `1`, `l` and `i`.
///
/// It has 31 characters: a prime radix spreads the shuffled bits better across digits.
pub const DEFAULT_ALPHABET: &str = "mn6j2c4rv8bpygw95z7hsdaetxuk3fq";
pub const DEFAULT_BLOCK_SIZE: u32 = 24;
pub const DEFAULT_MIN_LENGTH: usize = 5;

pub(crate) const DEFAULT_REVERSE_ALPHABET: [u8; 256] = compute_reverse(DEFAULT_ALPHABET.as_bytes());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("alphabet must have at least 2 characters, got {0}")]
    AlphabetTooShort(usize),
    #[error("alphabet contains the non-ASCII char {0:?}")]
    NonAsciiAlphabet(char),
    #[error("alphabet contains the char {0:?} more than once")]
    DuplicateChar(char),
    #[error("block size {0} is larger than 64 bits")]
    BlockSizeTooLarge(u32),
    #[error("permutation table is not a bijection")]
    NotABijection,
}

enum PermutationConfig {
    Reversal(u32),
    Table(Vec<u8>),
}

struct CoderConfig {
    alphabet: Option<String>,
    permutation: PermutationConfig,
    min_length: usize,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            alphabet: None,
            permutation: PermutationConfig::Reversal(DEFAULT_BLOCK_SIZE),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

pub struct CoderBuilder {
    config: CoderConfig,
}

impl CoderBuilder {
    pub fn alphabet(mut self, alphabet: &str) -> Self {
        self.config.alphabet = Some(alphabet.to_owned());
        self
    }

    /// Reverses the low `block_size` bits. Replaces any table set with
    /// [`permutation_table`](Self::permutation_table).
    pub fn block_size(mut self, block_size: u32) -> Self {
        self.config.permutation = PermutationConfig::Reversal(block_size);
        self
    }

    /// Sends bit `i` to bit `table[i]`; the block size becomes the table length.
    pub fn permutation_table(mut self, table: Vec<u8>) -> Self {
        self.config.permutation = PermutationConfig::Table(table);
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    pub fn build(self) -> Result<Coder, ConfigError> {
        let alphabet = match self.config.alphabet {
            None => default_alphabet(),
            Some(alphabet) => Alphabet::new(&alphabet)?,
        };

        let permutation = match self.config.permutation {
            PermutationConfig::Reversal(block_size) => Permutation::reversal(block_size)?,
            PermutationConfig::Table(table) => Permutation::from_table(table)?,
        };

        log::debug!(
            "built coder with {} char alphabet, block size {}, min length {}",
            alphabet.len(),
            permutation.block_size(),
            self.config.min_length
        );

        Ok(Coder {
            alphabet,
            permutation,
            min_length: self.config.min_length,
        })
    }
}

fn default_alphabet() -> Alphabet {
    Alphabet::from_static(DEFAULT_ALPHABET, DEFAULT_REVERSE_ALPHABET)
}

/// Encodes integers into short codes and back.
///
/// The low bits of a value are shuffled by a bit permutation, then the result is written in the
/// radix of the alphabet and left-padded with the alphabet's first character. Every `u64` maps
/// to exactly one code for a given configuration and minimum length.
///
/// A `Coder` is immutable and can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coder {
    alphabet: Alphabet,
    permutation: Permutation,
    min_length: usize,
}

impl Default for Coder {
    fn default() -> Self {
        Self::new()
    }
}

impl Coder {
    /// Creates a coder with the default alphabet, block size and minimum length.
    pub fn new() -> Self {
        Self {
            alphabet: default_alphabet(),
            permutation: Permutation::reversed(DEFAULT_BLOCK_SIZE),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }

    pub fn with_config(alphabet: &str, block_size: u32, min_length: usize) -> Result<Self, ConfigError> {
        Self::builder()
            .alphabet(alphabet)
            .block_size(block_size)
            .min_length(min_length)
            .build()
    }

    pub fn builder() -> CoderBuilder {
        CoderBuilder {
            config: CoderConfig::default(),
        }
    }

    pub fn alphabet(&self) -> &str {
        self.alphabet.as_str()
    }

    pub fn block_size(&self) -> u32 {
        self.permutation.block_size()
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn mask(&self) -> u64 {
        self.permutation.mask()
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Encodes `value` into a code of at least `max(min_length, self.min_length())` characters.
    pub fn encode(&self, value: u64, min_length: usize) -> String {
        let mut output = String::new();
        self.encode_into(value, min_length, &mut output);
        output
    }

    /// Encodes `value` padded to the configured minimum length only.
    pub fn encode_default(&self, value: u64) -> String {
        self.encode(value, 0)
    }

    /// Same as [`encode`](Self::encode) but appends the code to `output`.
    pub fn encode_into(&self, value: u64, min_length: usize, output: &mut String) {
        let min_length = min_length.max(self.min_length);

        let permuted = self.permutation.forward(value);
        let len = base::encoded_len(permuted, &self.alphabet);
        let padding = min_length.saturating_sub(len);

        output.reserve(padding + len);
        output.extend(std::iter::repeat(self.alphabet.padding()).take(padding));
        base::encode_into(permuted, &self.alphabet, output);

        log::trace!("encoded {} (permuted {}) with {} padding chars", value, permuted, padding);
    }

    /// Decodes a code produced by [`encode`](Self::encode) with the same configuration.
    ///
    /// Leading padding characters are zero digits and do not change the result.
    pub fn decode(&self, code: &str) -> Result<u64, DecodeError> {
        let permuted = base::decode(code, &self.alphabet)?;
        let value = self.permutation.inverse(permuted);

        log::trace!("decoded {:?} (permuted {}) to {}", code, permuted, value);

        Ok(value)
    }
}
