//======================================================================
// src/consts.rs
// Construction parameters.
//======================================================================

/// Size of the S-box permutation. Spritz is defined for N = 256, which
/// also makes every index computation a natural u8 wraparound.
pub const N: usize = 256;

/// Half the S-box; the nibble-absorb window and the forced-shuffle
/// threshold for the `a` register.
pub const N_HALF: usize = N / 2;

/// Largest digest length representable in the construction. The output
/// length is bound into the state as a single byte before squeezing.
pub const MAX_DIGEST_LEN: usize = 255;
