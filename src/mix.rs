use wrapping_arithmetic::wrappit;

// Avalanche functions. None of these carry state; they turn a weakly mixed word
// into one where every output bit depends on every input bit.

/// 64-bit mixer of Doug Lea used by the LXM family.
#[wrappit]
#[inline]
pub fn lea64(x: u64) -> u64 {
    let x = (x ^ (x >> 32)) * 0xdaba0b6eb09322e3;
    let x = (x ^ (x >> 32)) * 0xdaba0b6eb09322e3;
    x ^ (x >> 32)
}

/// 32-bit mixer of Doug Lea used by the 32-bit LXM generator.
#[wrappit]
#[inline]
pub fn lea32(x: u32) -> u32 {
    let x = (x ^ (x >> 16)) * 0xd36d884b;
    let x = (x ^ (x >> 16)) * 0xd36d884b;
    x ^ (x >> 16)
}

/// Variant 13 of David Stafford's 64-bit mixers, the SplitMix64 finalizer.
#[wrappit]
#[inline]
pub fn stafford13(x: u64) -> u64 {
    let x = (x ^ (x >> 30)) * 0xbf58476d1ce4e5b9;
    let x = (x ^ (x >> 27)) * 0x94d049bb133111eb;
    x ^ (x >> 31)
}

/// MurmurHash3 32-bit finalizer.
#[wrappit]
#[inline]
pub fn murmur3(x: u32) -> u32 {
    let x = (x ^ (x >> 16)) * 0x85ebca6b;
    let x = (x ^ (x >> 13)) * 0xc2b2ae35;
    x ^ (x >> 16)
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn lea64_reference_values() {
        let expected: [u64; 8] = [
            0x45b8512f9ff46f10, 0xd6ce3db0dd63efc3, 0x47bf6058710f2a88, 0x85b8c74e40981596,
            0xd77442e45944235e, 0x3ea4255636bfb1c3, 0x296ec3c9d3e0addc, 0x6c285eb9694f6eb2,
        ];
        let mut state: u64 = 0x012de1babb3c4104;
        for &e in expected.iter() {
            state = state.wrapping_add(0xc8161b4202294965);
            assert_eq!(e, lea64(state));
        }
    }

    #[test] pub fn finalizers() {
        assert_eq!(0, stafford13(0));
        assert_eq!(0, murmur3(0));
        assert_eq!(0xe220a8397b1dcdaf, stafford13(0x9e3779b97f4a7c15));
        assert_eq!(0x5692161d100b05e5, stafford13(1));
        assert_eq!(0x514e28b7, murmur3(1));
        assert_eq!(0x92ca2f0e, murmur3(0x9e3779b9));

        let mut x: u32 = 0x012de1ba;
        let expected = [0x0b8e0036, 0x90fc1edb, 0xc3314cee, 0x57780de6];
        for &e in expected.iter() {
            x = x.wrapping_add(0x9e3779b9);
            assert_eq!(e, lea32(x));
        }
    }
}
