#![no_std]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

//======================================================================
// src/lib.rs
// Crate entry point: module layout, re-exports, type aliases.
//======================================================================

// --- Module declarations ---
pub mod consts;
pub mod ct;
pub mod sponge;
pub mod state;
pub mod stream;

// --- Test module ---
#[cfg(test)]
extern crate std;


// --- Re-exports ---
pub use crate::sponge::{hash, mac, SpritzHash, SpritzMac};
pub use crate::state::SpritzState;
pub use crate::stream::{Spritz, SpritzStream, SpritzStreamCore};

pub use cipher;
pub use digest;
pub use rand_core;
pub use zeroize;

// --- Convenience type aliases ---

/// Spritz stream cipher with a 16-byte key and 16-byte nonce.
pub type SpritzStream128 = SpritzStream<cipher::consts::U16, cipher::consts::U16>;

/// Spritz stream cipher with a 32-byte key and 32-byte nonce.
pub type SpritzStream256 = SpritzStream<cipher::consts::U32, cipher::consts::U32>;
