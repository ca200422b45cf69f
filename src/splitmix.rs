use alloc::vec::Vec;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::mix::stafford13;
use super::provider::{Provider64, Source64};
use super::seed::{extend_seed64, SeedBytes, SeedableCore};
use super::GOLDEN_RATIO_64;

/// SplitMix64: a Weyl sequence with the golden ratio increment passed through
/// Stafford's variant 13 mixer. 64-bit state, period 2^64.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct SplitMix64Core {
    state: u64,
}

/// SplitMix64 generator.
pub type SplitMix64 = Provider64<SplitMix64Core>;

impl SplitMix64Core {
    pub fn new(state: u64) -> Self {
        SplitMix64Core { state }
    }
}

impl Source64 for SplitMix64Core {
    const NAME: &'static str = "SplitMix64";

    #[wrappit]
    #[inline]
    fn next(&mut self) -> u64 {
        self.state += GOLDEN_RATIO_64;
        stafford13(self.state)
    }
}

impl SeedableCore for SplitMix64Core {
    type Word = u64;
    type Seed = SeedBytes<8>;

    fn from_seed_words(seed: &[u64]) -> Self {
        Self::new(extend_seed64(seed, 1)[0])
    }
}

impl StateCodec for SplitMix64Core {
    const STATE_SIZE: usize = 8;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.state]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [state] = read_words::<u64, 1>(bytes)?;
        self.state = state;
        Ok(())
    }
}
