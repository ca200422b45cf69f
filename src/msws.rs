use alloc::vec::Vec;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::provider::{Provider32, Source32};
use super::seed::{extend_seed64, SeedBytes, SeedableCore};

/// Widynski's middle square Weyl sequence: the square of the state plus a Weyl sequence,
/// with the halves swapped. The Weyl increment is always odd.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct MswsCore {
    x: u64,
    w: u64,
    s: u64,
}

pub type MiddleSquareWeylSequence = Provider32<MswsCore>;

impl MswsCore {
    pub fn new(x: u64, w: u64, s: u64) -> Self {
        MswsCore { x, w, s: s | 1 }
    }
}

impl Source32 for MswsCore {
    const NAME: &'static str = "MiddleSquareWeylSequence";

    #[wrappit]
    #[inline]
    fn next(&mut self) -> u32 {
        self.w += self.s;
        self.x = (self.x * self.x + self.w).rotate_left(32);
        self.x as u32
    }
}

impl SeedableCore for MswsCore {
    type Word = u64;
    type Seed = SeedBytes<24>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, 3);
        Self::new(s[0], s[1], s[2])
    }
}

impl StateCodec for MswsCore {
    const STATE_SIZE: usize = 24;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.x, self.w, self.s]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [x, w, s] = read_words::<u64, 3>(bytes)?;
        *self = Self::new(x, w, s);
        Ok(())
    }
}
