use crate::coder::ConfigError;

/// Largest number of bits a permutation can shuffle.
pub const MAX_BLOCK_SIZE: u32 = u64::BITS;

/// Returns a mask with the low `block_size` bits set.
///
/// Block sizes above [`MAX_BLOCK_SIZE`] saturate to a full mask.
pub fn mask(block_size: u32) -> u64 {
    let block_size = block_size.min(MAX_BLOCK_SIZE);
    u64::MAX.checked_shr(u64::BITS - block_size).unwrap_or(0)
}

/// A reversible shuffle of the low-order bits of an integer.
///
/// Entry `i` of the table is the destination of bit `i`. The table is always a bijection over
/// `0..block_size`, bits at or above `block_size` are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    table: Vec<u8>,
    mask: u64,
}

impl Permutation {
    /// Full bit reversal of the low `block_size` bits: bit `i` moves to `block_size - 1 - i`.
    pub fn reversal(block_size: u32) -> Result<Self, ConfigError> {
        if block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockSizeTooLarge(block_size));
        }

        Ok(Self::reversed(block_size))
    }

    pub(crate) fn reversed(block_size: u32) -> Self {
        let table = (0..block_size.min(MAX_BLOCK_SIZE) as u8).rev().collect();

        Self {
            table,
            mask: mask(block_size),
        }
    }

    /// Uses an arbitrary table; the block size is the table length.
    pub fn from_table(table: Vec<u8>) -> Result<Self, ConfigError> {
        if table.len() > MAX_BLOCK_SIZE as usize {
            return Err(ConfigError::BlockSizeTooLarge(table.len() as u32));
        }

        let mut seen: u64 = 0;
        for &target in &table {
            if target as usize >= table.len() {
                return Err(ConfigError::NotABijection);
            }

            let bit = 1_u64 << target;
            if seen & bit != 0 {
                return Err(ConfigError::NotABijection);
            }
            seen |= bit;
        }

        let mask = mask(table.len() as u32);
        Ok(Self { table, mask })
    }

    pub fn block_size(&self) -> u32 {
        self.table.len() as u32
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn table(&self) -> &[u8] {
        &self.table
    }

    pub fn forward(&self, n: u64) -> u64 {
        let low = n & self.mask;

        let mut result: u64 = 0;
        for (i, &m) in self.table.iter().enumerate() {
            if low & (1_u64 << i) != 0 {
                result |= 1_u64 << m;
            }
        }

        (n & !self.mask) | result
    }

    pub fn inverse(&self, n: u64) -> u64 {
        let low = n & self.mask;

        let mut result: u64 = 0;
        for (i, &m) in self.table.iter().enumerate() {
            if low & (1_u64 << m) != 0 {
                result |= 1_u64 << i;
            }
        }

        (n & !self.mask) | result
    }
}
