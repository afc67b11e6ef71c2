//! Short, non-sequential codes for integers.
//!
//! A [`Coder`] turns database-style identifiers into short strings such as `pjz2p` and back.
//! Consecutive integers do not produce consecutive codes, but this is obfuscation only: anyone
//! who knows the configuration can decode a code.
//!
//! ```
//! use tinycode::Coder;
//!
//! let coder = Coder::new();
//!
//! let code = coder.encode(1337, 5);
//! assert_eq!("pjz2p", code);
//! assert_eq!(Ok(1337), coder.decode(&code));
//! ```
//!
//! Custom configurations go through [`Coder::builder`]:
//!
//! ```
//! use tinycode::Coder;
//!
//! let coder = Coder::builder()
//!     .alphabet("0123456789abcdef")
//!     .block_size(16)
//!     .min_length(8)
//!     .build()
//!     .unwrap();
//!
//! let code = coder.encode(42, 0);
//! assert_eq!(8, code.len());
//! assert_eq!(Ok(42), coder.decode(&code));
//! ```

mod alphabet;
pub mod base;
mod coder;
pub mod permutation;

pub use alphabet::Alphabet;
pub use base::DecodeError;
pub use coder::{Coder, CoderBuilder, ConfigError, DEFAULT_ALPHABET, DEFAULT_BLOCK_SIZE, DEFAULT_MIN_LENGTH};
pub use permutation::Permutation;
