//! The word-length die.
//!
//! A roll decides how many letters the turn's word must have. The die
//! runs 3 through 6 rather than 1 through 6 so no round asks for a
//! one- or two-letter word.

use rand::Rng;

/// Smallest rollable word length.
pub const MIN_DIE: u8 = 3;

/// Largest rollable word length.
pub const MAX_DIE: u8 = 6;

/// Roll the die, uniformly over `[MIN_DIE, MAX_DIE]`.
///
/// The generator is injected so that games seeded for determinism
/// reproduce the same roll sequence.
pub fn roll_die<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(MIN_DIE..=MAX_DIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn rolls_stay_in_range_and_cover_it() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let die = roll_die(&mut rng);
            assert!((MIN_DIE..=MAX_DIE).contains(&die));
            seen.insert(die);
        }
        assert_eq!(seen.len(), (MAX_DIE - MIN_DIE + 1) as usize);
    }

    #[test]
    fn same_seed_rolls_the_same_sequence() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<u8> = (0..32).map(|_| roll_die(&mut a)).collect();
        let second: Vec<u8> = (0..32).map(|_| roll_die(&mut b)).collect();
        assert_eq!(first, second);
    }
}
