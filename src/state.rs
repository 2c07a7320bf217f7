//======================================================================
// src/state.rs
// The Spritz permutation state and its sponge drivers.
//======================================================================

use cfg_if::cfg_if;

use crate::consts::{N, N_HALF};

#[cfg(feature = "wipe-paranoid")]
use zeroize::{Zeroize, Zeroizing};

/// The Spritz state: a byte permutation plus six registers.
///
/// `s` stays a bijection on `0..=255` for the whole lifetime of the
/// state (it is only ever swapped), `w` stays odd, and `a` counts the
/// nibbles absorbed since the last shuffle. All index arithmetic is the
/// natural wraparound of a `u8`, which is why N is fixed at 256.
#[derive(Clone, zeroize::Zeroize)]
#[cfg_attr(feature = "wipe", derive(zeroize::ZeroizeOnDrop))]
pub struct SpritzState {
    pub(crate) s: [u8; N],
    pub(crate) i: u8,
    pub(crate) j: u8,
    pub(crate) k: u8,
    pub(crate) z: u8,
    pub(crate) a: u8,
    pub(crate) w: u8,
}

impl Default for SpritzState {
    fn default() -> Self {
        Self::new()
    }
}

cfg_if! {
    if #[cfg(feature = "safe-timing-crush")] {
        fn crush_pair(state: &mut SpritzState, p: usize, q: usize) {
            use subtle::{ConditionallySelectable, ConstantTimeGreater};

            let mut x = state.s[p];
            let mut y = state.s[q];
            let out_of_order = x.ct_gt(&y);
            u8::conditional_swap(&mut x, &mut y, out_of_order);
            state.s[p] = x;
            state.s[q] = y;
            #[cfg(feature = "wipe-paranoid")]
            {
                x.zeroize();
                y.zeroize();
            }
        }
    } else {
        fn crush_pair(state: &mut SpritzState, p: usize, q: usize) {
            if state.s[p] > state.s[q] {
                state.swap(p, q);
            }
        }
    }
}

impl SpritzState {
    /// Fresh state: identity S-box, cleared registers, stride 1.
    pub fn new() -> Self {
        Self {
            s: core::array::from_fn(|v| v as u8),
            i: 0,
            j: 0,
            k: 0,
            z: 0,
            a: 0,
            w: 1,
        }
    }

    fn swap(&mut self, x: usize, y: usize) {
        #[cfg(feature = "wipe-paranoid")]
        {
            let t = Zeroizing::new(self.s[x]);
            self.s[x] = self.s[y];
            self.s[y] = *t;
        }
        #[cfg(not(feature = "wipe-paranoid"))]
        {
            self.s.swap(x, y);
        }
    }

    fn update(&mut self) {
        self.i = self.i.wrapping_add(self.w);
        let t = self.j.wrapping_add(self.s[self.i as usize]);
        self.j = self.k.wrapping_add(self.s[t as usize]);
        self.k = self.i.wrapping_add(self.k).wrapping_add(self.s[self.j as usize]);
        self.swap(self.i as usize, self.j as usize);
    }

    fn whip(&mut self, r: usize) {
        for _ in 0..r {
            self.update();
        }
        // w stays odd, hence coprime to N (N is a power of two), so the
        // i register walks the whole S-box every N updates.
        self.w = self.w.wrapping_add(2);
    }

    fn crush(&mut self) {
        for p in 0..N_HALF {
            crush_pair(self, p, N - 1 - p);
        }
    }

    pub(crate) fn shuffle(&mut self) {
        self.whip(2 * N);
        self.crush();
        self.whip(2 * N);
        self.crush();
        self.whip(2 * N);
        self.a = 0;
    }

    fn absorb_nibble(&mut self, x: u8) {
        if self.a as usize == N_HALF {
            self.shuffle();
        }
        self.swap(self.a as usize, (N_HALF as u8).wrapping_add(x) as usize);
        self.a = self.a.wrapping_add(1);
    }

    pub(crate) fn absorb_byte(&mut self, b: u8) {
        self.absorb_nibble(b & 0x0F);
        self.absorb_nibble(b >> 4);
    }

    /// Mix input into the state, a nibble at a time.
    pub fn absorb(&mut self, data: &[u8]) {
        for &b in data {
            self.absorb_byte(b);
        }
    }

    /// Domain separator between two adjacent absorbed inputs.
    pub fn absorb_stop(&mut self) {
        if self.a as usize == N_HALF {
            self.shuffle();
        }
        self.a = self.a.wrapping_add(1);
    }

    fn output(&mut self) -> u8 {
        #[cfg(feature = "wipe-paranoid")]
        {
            let t0 = Zeroizing::new(self.s[self.z.wrapping_add(self.k) as usize]);
            let t1 = Zeroizing::new(self.s[self.i.wrapping_add(*t0) as usize]);
            self.z = self.s[self.j.wrapping_add(*t1) as usize];
        }
        #[cfg(not(feature = "wipe-paranoid"))]
        {
            let t0 = self.s[self.z.wrapping_add(self.k) as usize];
            let t1 = self.s[self.i.wrapping_add(t0) as usize];
            self.z = self.s[self.j.wrapping_add(t1) as usize];
        }
        self.z
    }

    /// One keystream byte. Forces a shuffle first if any input has been
    /// absorbed since the last one, so squeezing always happens with
    /// `a == 0`.
    pub fn drip(&mut self) -> u8 {
        if self.a > 0 {
            self.shuffle();
        }
        self.update();
        self.output()
    }

    /// Fill `out` with keystream bytes.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        if self.a > 0 {
            self.shuffle();
        }
        for b in out.iter_mut() {
            *b = self.drip();
        }
    }
}
