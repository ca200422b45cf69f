use super::word::Word;

// Jumps of linear generators over GF(2).
//
// The state update of a xor/shift/rotate generator is a linear map T on the state bits.
// A jump by d steps applies T^d, and T^d = p(T) where p is x^d reduced modulo the
// characteristic polynomial of T. The jump coefficients are the bits of p, lowest degree
// first, so T^d s = sum over set bits j of T^j s: accumulate the state at every step
// whose coefficient bit is set, while stepping through as many states as p has bits.

/// Linear state of a xor-based generator as seen by the jump engine.
pub trait XorJump {
    type Word: Word;

    /// Number of words in the linear state, at most 16.
    const WORDS: usize;

    /// Applies the linear state update once.
    fn cycle(&mut self);

    /// Returns state word `i`, counted from the ring buffer cursor where there is one.
    fn word(&self, i: usize) -> Self::Word;

    /// Replaces the state, `words[i]` becoming word `i` relative to the current cursor.
    fn set_words(&mut self, words: &[Self::Word]);
}

/// Advances `generator` by the distance whose jump polynomial is `coefficients`.
pub fn xor_jump<G: XorJump>(generator: &mut G, coefficients: &[G::Word]) {
    let mut acc = [G::Word::default(); 16];
    let acc = &mut acc[.. G::WORDS];
    for &c in coefficients {
        for b in 0 .. G::Word::BITS {
            if c.bit(b) {
                for (i, a) in acc.iter_mut().enumerate() {
                    *a ^= generator.word(i);
                }
            }
            generator.cycle();
        }
    }
    // The cycles moved the cursor; the accumulated words are relative to where it is now.
    generator.set_words(acc);
}
