use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG factory for a given (seed, game_id) pair.
///
/// Implementation detail:
/// - Derives a per-game 64-bit seed as `seed ^ game_id`.
/// - Uses PCG 64-bit generator (rand_pcg::Pcg64) for reproducible sequences.
/// - Returned RNG is deterministic and reproducible across runs when inputs
///   are equal. All shuffling (draw pile init, pile reconstruction on load)
///   goes through an RNG handed in explicitly; there is no hidden global
///   random source.
#[inline]
pub fn rng_for_game(seed: u64, game_id: u64) -> impl Rng {
    let derived: u64 = seed ^ game_id;
    Pcg64::seed_from_u64(derived)
}
