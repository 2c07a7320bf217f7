//======================================================================
// src/stream.rs
// Keyed keystream engine: stream cipher, CSPRNG, uniform sampler.
//======================================================================

use cipher::{
    consts::U1, ArrayLength, Block, BlockSizeUser, Iv, IvSizeUser, Key, KeyIvInit, KeySizeUser,
    ParBlocksSizeUser, StreamBackend, StreamCipherCore, StreamCipherCoreWrapper,
};
use core::marker::PhantomData;
use rand_core::{CryptoRng, RngCore};

use crate::state::SpritzState;

#[cfg(feature = "wipe-paranoid")]
use zeroize::Zeroizing;

/// A keyed Spritz context producing keystream.
///
/// Keys and nonces are arbitrary-length byte slices; the nonce is
/// separated from the key by an absorb-stop marker, so `key ∥ nonce`
/// splits that concatenate to the same bytes still produce unrelated
/// keystreams.
#[derive(Clone, zeroize::Zeroize)]
#[cfg_attr(feature = "wipe", derive(zeroize::ZeroizeOnDrop))]
pub struct Spritz {
    state: SpritzState,
}

impl Spritz {
    /// Keyed setup without a nonce.
    pub fn new(key: &[u8]) -> Self {
        let mut state = SpritzState::new();
        state.absorb(key);
        Self { state }
    }

    /// Keyed setup with a nonce (salt).
    pub fn new_with_nonce(key: &[u8], nonce: &[u8]) -> Self {
        let mut spritz = Self::new(key);
        spritz.state.absorb_stop();
        spritz.state.absorb(nonce);
        spritz
    }

    /// Absorb fresh entropy into a running context without resetting it.
    pub fn add_entropy(&mut self, entropy: &[u8]) {
        self.state.absorb(entropy);
    }

    /// One keystream byte.
    pub fn random_byte(&mut self) -> u8 {
        self.state.drip()
    }

    /// Four keystream bytes assembled big-endian.
    pub fn random_u32(&mut self) -> u32 {
        u32::from_be_bytes([
            self.state.drip(),
            self.state.drip(),
            self.state.drip(),
            self.state.drip(),
        ])
    }

    /// Uniform value in `[0, upper)` by rejection sampling, avoiding the
    /// modulo bias of a raw `random_u32() % upper`.
    ///
    /// `upper < 2` returns 0 without consuming keystream. The expected
    /// number of draws is below 2 for every bound.
    pub fn random_uniform(&mut self, upper: u32) -> u32 {
        if upper < 2 {
            return 0;
        }
        // Smallest 32-bit value congruent to 0 mod upper, i.e.
        // (2^32 - upper) % upper without widening.
        let min = upper.wrapping_neg() % upper;
        loop {
            let r = self.random_u32();
            if r >= min {
                return r % upper;
            }
        }
    }

    /// XOR the keystream into `data` in place. Calling this twice with
    /// identically set-up contexts round-trips, so the same function
    /// encrypts and decrypts.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for b in data.iter_mut() {
            #[cfg(feature = "wipe-paranoid")]
            {
                let ks = Zeroizing::new(self.state.drip());
                *b ^= *ks;
            }
            #[cfg(not(feature = "wipe-paranoid"))]
            {
                *b ^= self.state.drip();
            }
        }
    }

    /// Buffer-to-buffer variant of [`Spritz::apply_keystream`].
    ///
    /// # Panics
    ///
    /// Panics if `src` and `dst` have different lengths.
    pub fn apply_keystream_b2b(&mut self, src: &[u8], dst: &mut [u8]) {
        assert_eq!(src.len(), dst.len(), "keystream buffers must match in length");
        for (d, &s) in dst.iter_mut().zip(src) {
            #[cfg(feature = "wipe-paranoid")]
            {
                let ks = Zeroizing::new(self.state.drip());
                *d = s ^ *ks;
            }
            #[cfg(not(feature = "wipe-paranoid"))]
            {
                *d = s ^ self.state.drip();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &SpritzState {
        &self.state
    }
}

impl RngCore for Spritz {
    fn next_u32(&mut self) -> u32 {
        self.random_u32()
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.random_u32()) << 32) | u64::from(self.random_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for b in dest.iter_mut() {
            *b = self.state.drip();
        }
    }
}

impl CryptoRng for Spritz {}

//======================================================================
// RustCrypto `cipher` integration
//======================================================================

/// Core for the [`cipher`] trait stack, generic over the key and nonce
/// sizes a protocol fixes at compile time. Spritz emits keystream one
/// byte at a time, so the block size is `U1` and the keystream is not
/// seekable.
pub struct SpritzStreamCore<K: ArrayLength<u8>, I: ArrayLength<u8>> {
    engine: Spritz,
    _sizes: PhantomData<(K, I)>,
}

impl<K: ArrayLength<u8>, I: ArrayLength<u8>> KeySizeUser for SpritzStreamCore<K, I> {
    type KeySize = K;
}

impl<K: ArrayLength<u8>, I: ArrayLength<u8>> IvSizeUser for SpritzStreamCore<K, I> {
    type IvSize = I;
}

impl<K: ArrayLength<u8>, I: ArrayLength<u8>> BlockSizeUser for SpritzStreamCore<K, I> {
    type BlockSize = U1;
}

impl<K: ArrayLength<u8>, I: ArrayLength<u8>> KeyIvInit for SpritzStreamCore<K, I> {
    fn new(key: &Key<Self>, iv: &Iv<Self>) -> Self {
        Self {
            engine: Spritz::new_with_nonce(key, iv),
            _sizes: PhantomData,
        }
    }
}

impl<K: ArrayLength<u8>, I: ArrayLength<u8>> StreamCipherCore for SpritzStreamCore<K, I> {
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl cipher::StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut Backend(self));
    }
}

struct Backend<'a, K: ArrayLength<u8>, I: ArrayLength<u8>>(&'a mut SpritzStreamCore<K, I>);

impl<'a, K: ArrayLength<u8>, I: ArrayLength<u8>> BlockSizeUser for Backend<'a, K, I> {
    type BlockSize = U1;
}

impl<'a, K: ArrayLength<u8>, I: ArrayLength<u8>> ParBlocksSizeUser for Backend<'a, K, I> {
    type ParBlocksSize = U1;
}

impl<'a, K: ArrayLength<u8>, I: ArrayLength<u8>> StreamBackend for Backend<'a, K, I> {
    #[inline]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        block[0] = self.0.engine.random_byte();
    }
}

/// High-level stream cipher over a compile-time key/nonce size pair.
pub type SpritzStream<K, I> = StreamCipherCoreWrapper<SpritzStreamCore<K, I>>;
