use alloc::vec::Vec;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::provider::{Provider32, Provider64, Source32, Source64};
use super::seed::{extend_seed32, extend_seed64, SeedBytes, SeedableCore};

// Chris Doty-Humphrey's small fast counting generators. The counter guarantees a
// minimum period of 2^32 (2^64) for every seed.

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Sfc32Core {
    a: u32,
    b: u32,
    c: u32,
    counter: u32,
}

pub type Sfc32 = Provider32<Sfc32Core>;

impl Sfc32Core {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        let mut core = Sfc32Core { a, b, c, counter: 1 };
        for _ in 0 .. 15 {
            core.next();
        }
        core
    }
}

impl Source32 for Sfc32Core {
    const NAME: &'static str = "Sfc32";

    #[wrappit]
    #[inline]
    fn next(&mut self) -> u32 {
        let tmp = self.a + self.b + self.counter;
        self.counter += 1;
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c + (self.c << 3);
        self.c = self.c.rotate_left(21) + tmp;
        tmp
    }
}

impl SeedableCore for Sfc32Core {
    type Word = u32;
    type Seed = SeedBytes<12>;

    fn from_seed_words(seed: &[u32]) -> Self {
        let s = extend_seed32(seed, 3);
        Self::new(s[0], s[1], s[2])
    }
}

impl StateCodec for Sfc32Core {
    const STATE_SIZE: usize = 16;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.a, self.b, self.c, self.counter]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [a, b, c, counter] = read_words::<u32, 4>(bytes)?;
        *self = Sfc32Core { a, b, c, counter };
        Ok(())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Sfc64Core {
    a: u64,
    b: u64,
    c: u64,
    counter: u64,
}

pub type Sfc64 = Provider64<Sfc64Core>;

impl Sfc64Core {
    pub fn new(a: u64, b: u64, c: u64) -> Self {
        let mut core = Sfc64Core { a, b, c, counter: 1 };
        for _ in 0 .. 18 {
            core.next();
        }
        core
    }
}

impl Source64 for Sfc64Core {
    const NAME: &'static str = "Sfc64";

    #[wrappit]
    #[inline]
    fn next(&mut self) -> u64 {
        let tmp = self.a + self.b + self.counter;
        self.counter += 1;
        self.a = self.b ^ (self.b >> 11);
        self.b = self.c + (self.c << 3);
        self.c = self.c.rotate_left(24) + tmp;
        tmp
    }
}

impl SeedableCore for Sfc64Core {
    type Word = u64;
    type Seed = SeedBytes<24>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, 3);
        Self::new(s[0], s[1], s[2])
    }
}

impl StateCodec for Sfc64Core {
    const STATE_SIZE: usize = 32;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.a, self.b, self.c, self.counter]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [a, b, c, counter] = read_words::<u64, 4>(bytes)?;
        *self = Sfc64Core { a, b, c, counter };
        Ok(())
    }
}
