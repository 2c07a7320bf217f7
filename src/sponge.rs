//======================================================================
// src/sponge.rs
// Hash and MAC modes built on the absorb/squeeze drivers.
//======================================================================

use digest::{InvalidBufferSize, InvalidOutputSize, Update, VariableOutput};

use crate::consts::MAX_DIGEST_LEN;
use crate::ct;
use crate::state::SpritzState;

#[cfg(feature = "wipe")]
use zeroize::Zeroize;

/// Streaming variable-length hash (1–255 bytes of digest).
///
/// The digest length is absorbed into the state before squeezing, so
/// digests of different lengths over the same data are unrelated; a
/// short digest is not a prefix of a longer one.
#[derive(Clone, zeroize::Zeroize)]
#[cfg_attr(feature = "wipe", derive(zeroize::ZeroizeOnDrop))]
pub struct SpritzHash {
    state: SpritzState,
    digest_len: u8,
}

impl SpritzHash {
    /// Begin hashing toward a digest of `digest_len` bytes.
    pub fn new(digest_len: u8) -> Self {
        Self {
            state: SpritzState::new(),
            digest_len,
        }
    }

    /// Absorb a chunk of input. Chunk boundaries do not affect the
    /// digest.
    pub fn update(&mut self, data: &[u8]) {
        self.state.absorb(data);
    }

    /// Write the digest into `digest` and consume the context.
    ///
    /// # Panics
    ///
    /// Panics if `digest.len()` differs from the length chosen at
    /// construction.
    pub fn finalize_into(mut self, digest: &mut [u8]) {
        assert_eq!(
            digest.len(),
            usize::from(self.digest_len),
            "digest buffer length must match the configured digest length"
        );
        self.state.absorb_stop();
        self.state.absorb_byte(self.digest_len);
        self.state.squeeze(digest);
    }
}

impl Update for SpritzHash {
    fn update(&mut self, data: &[u8]) {
        self.state.absorb(data);
    }
}

impl VariableOutput for SpritzHash {
    const MAX_OUTPUT_SIZE: usize = MAX_DIGEST_LEN;

    fn new(output_size: usize) -> Result<Self, InvalidOutputSize> {
        if output_size == 0 || output_size > Self::MAX_OUTPUT_SIZE {
            return Err(InvalidOutputSize);
        }
        Ok(Self::new(output_size as u8))
    }

    fn output_size(&self) -> usize {
        usize::from(self.digest_len)
    }

    fn finalize_variable(self, out: &mut [u8]) -> Result<(), InvalidBufferSize> {
        if out.len() != usize::from(self.digest_len) {
            return Err(InvalidBufferSize);
        }
        self.finalize_into(out);
        Ok(())
    }
}

/// Streaming MAC with a variable-length tag.
///
/// The key is absorbed and sealed off with an absorb-stop marker before
/// any message data, keeping key and message domains separate.
#[derive(Clone, zeroize::Zeroize)]
#[cfg_attr(feature = "wipe", derive(zeroize::ZeroizeOnDrop))]
pub struct SpritzMac {
    state: SpritzState,
    tag_len: u8,
}

impl SpritzMac {
    /// Begin authenticating under `key` toward a tag of `tag_len` bytes.
    /// Keys of any length are absorbed whole, never truncated.
    pub fn new(key: &[u8], tag_len: u8) -> Self {
        let mut state = SpritzState::new();
        state.absorb(key);
        state.absorb_stop();
        Self { state, tag_len }
    }

    /// Absorb a chunk of the message.
    pub fn update(&mut self, msg: &[u8]) {
        self.state.absorb(msg);
    }

    /// Write the tag into `tag` and consume the context.
    ///
    /// # Panics
    ///
    /// Panics if `tag.len()` differs from the length chosen at
    /// construction.
    pub fn finalize_into(mut self, tag: &mut [u8]) {
        assert_eq!(
            tag.len(),
            usize::from(self.tag_len),
            "tag buffer length must match the configured tag length"
        );
        self.state.absorb_stop();
        self.state.absorb_byte(self.tag_len);
        self.state.squeeze(tag);
    }

    /// Finalize and compare against `expected` in constant time.
    pub fn verify(self, expected: &[u8]) -> bool {
        let len = usize::from(self.tag_len);
        if expected.len() != len {
            return false;
        }
        let mut computed = [0u8; MAX_DIGEST_LEN];
        self.finalize_into(&mut computed[..len]);
        let ok = ct::ct_eq(&computed[..len], expected);
        #[cfg(feature = "wipe")]
        computed.zeroize();
        ok
    }
}

impl Update for SpritzMac {
    fn update(&mut self, data: &[u8]) {
        self.state.absorb(data);
    }
}

/// One-shot hash: `digest.len()` selects the digest length (at most 255).
pub fn hash(digest: &mut [u8], data: &[u8]) {
    assert!(digest.len() <= MAX_DIGEST_LEN, "digest longer than 255 bytes");
    let mut h = SpritzHash::new(digest.len() as u8);
    h.update(data);
    h.finalize_into(digest);
}

/// One-shot MAC: `tag.len()` selects the tag length (at most 255).
pub fn mac(tag: &mut [u8], msg: &[u8], key: &[u8]) {
    assert!(tag.len() <= MAX_DIGEST_LEN, "tag longer than 255 bytes");
    let mut m = SpritzMac::new(key, tag.len() as u8);
    m.update(msg);
    m.finalize_into(tag);
}
