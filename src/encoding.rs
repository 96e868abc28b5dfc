//! 3-bit base encoding
//!
//! Each base is mapped to a 3-bit code through a 256-entry lookup table and
//! up to [`WINDOW`] bases are packed into the low 63 bits of a `u64`.
//!
//! | base        | code |
//! |-------------|------|
//! | (no base)   | 0    |
//! | `A` / `a`   | 1    |
//! | `T` / `t`   | 2    |
//! | `C` / `c`   | 3    |
//! | `G` / `g`   | 4    |
//! | anything    | 5    |
//! | `N` / `n`   | 7    |

/// Number of bases packed into one 64-bit word (21 * 3 = 63 bits)
pub const WINDOW: usize = 21;

/// Width of one encoded base in bits
pub const BITS_PER_BASE: u32 = 3;

/// Code for any byte outside the A/C/G/T/N alphabet
pub const OTHER_CODE: u8 = 0x5;

const CODE_MASK: u64 = 0x7;

/// Lookup table from byte value to 3-bit code.
///
/// Built once and handed to whoever needs to encode; every byte maps to a
/// non-zero code so `0` always means "no base".
#[derive(Debug, Clone)]
pub struct BaseTable {
    codes: [u8; 256],
}

impl BaseTable {
    pub const fn new() -> Self {
        let mut codes = [OTHER_CODE; 256];
        codes[b'A' as usize] = 0x1;
        codes[b'a' as usize] = 0x1;
        codes[b'T' as usize] = 0x2;
        codes[b't' as usize] = 0x2;
        codes[b'C' as usize] = 0x3;
        codes[b'c' as usize] = 0x3;
        codes[b'G' as usize] = 0x4;
        codes[b'g' as usize] = 0x4;
        codes[b'N' as usize] = 0x7;
        codes[b'n' as usize] = 0x7;
        Self { codes }
    }

    #[inline]
    pub fn encode(&self, base: u8) -> u8 {
        self.codes[base as usize]
    }

    /// Pack the first (up to) [`WINDOW`] bytes of `bases`, first base in the
    /// most significant position. Bytes past the window are ignored.
    #[inline]
    pub fn pack(&self, bases: &[u8]) -> u64 {
        bases
            .iter()
            .take(WINDOW)
            .fold(0u64, |acc, &b| (acc << BITS_PER_BASE) | u64::from(self.encode(b)))
    }
}

impl Default for BaseTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a packed word back into bases.
///
/// Zero groups emit nothing, code 5 renders as lowercase `n` and any code
/// that `pack` can never produce renders as `[v]`.
pub fn unpack(mut enc: u64) -> String {
    let mut rev = String::with_capacity(WINDOW);
    for _ in 0..WINDOW {
        match enc & CODE_MASK {
            0 => {}
            0x1 => rev.push('A'),
            0x2 => rev.push('T'),
            0x3 => rev.push('C'),
            0x4 => rev.push('G'),
            0x5 => rev.push('n'),
            0x7 => rev.push('N'),
            // pushed reversed, so "]v[" reads "[v]" once flipped
            v => {
                rev.push(']');
                rev.push_str(&v.to_string());
                rev.push('[');
            }
        }
        enc >>= BITS_PER_BASE;
    }
    rev.chars().rev().collect()
}
