//! ISAAC deterministic random generator.
//!
//! Bit-compatible with Bob Jenkins' reference `rand.c` as seeded by the classic
//! string-keyed variant: each seed character is loaded into one result word
//! before `randinit(TRUE)`.

use rand::RngCore;
use shared_types::Hash;

const RANDSIZ: usize = 256;
const GOLDEN_RATIO: u32 = 0x9e37_79b9;

/// Restartable ISAAC stream. The same seed always yields the same sequence.
#[derive(Clone)]
pub struct IsaacRandom {
    rsl: [u32; RANDSIZ],
    cnt: usize,
    mm: [u32; RANDSIZ],
    aa: u32,
    bb: u32,
    cc: u32,
}

impl IsaacRandom {
    /// Seed with up to 256 characters of `seed`.
    pub fn from_seed(seed: &str) -> Self {
        let mut rng = Self {
            rsl: [0; RANDSIZ],
            cnt: 0,
            mm: [0; RANDSIZ],
            aa: 0,
            bb: 0,
            cc: 0,
        };
        for (word, unit) in rng.rsl.iter_mut().zip(seed.encode_utf16()) {
            *word = u32::from(unit);
        }
        rng.init();
        rng
    }

    pub fn next_int(&mut self) -> u32 {
        let result = self.rsl[self.cnt];
        self.cnt += 1;
        if self.cnt >= RANDSIZ {
            self.isaac();
            self.cnt = 0;
        }
        result
    }

    /// A printable ASCII byte (32..=126).
    pub fn next_printable_byte(&mut self) -> u8 {
        (self.next_int() % 95 + 32) as u8
    }

    fn init(&mut self) {
        self.aa = 0;
        self.bb = 0;
        self.cc = 0;

        let mut state = [GOLDEN_RATIO; 8];
        for _ in 0..4 {
            mix(&mut state);
        }

        for i in (0..RANDSIZ).step_by(8) {
            for (word, seed) in state.iter_mut().zip(&self.rsl[i..i + 8]) {
                *word = word.wrapping_add(*seed);
            }
            mix(&mut state);
            self.mm[i..i + 8].copy_from_slice(&state);
        }

        for i in (0..RANDSIZ).step_by(8) {
            for (word, memory) in state.iter_mut().zip(&self.mm[i..i + 8]) {
                *word = word.wrapping_add(*memory);
            }
            mix(&mut state);
            self.mm[i..i + 8].copy_from_slice(&state);
        }

        self.isaac();
        self.cnt = 0;
    }

    fn isaac(&mut self) {
        self.cc = self.cc.wrapping_add(1);
        self.bb = self.bb.wrapping_add(self.cc);

        for i in 0..RANDSIZ {
            let x = self.mm[i];
            self.aa ^= match i & 3 {
                0 => self.aa << 13,
                1 => self.aa >> 6,
                2 => self.aa << 2,
                _ => self.aa >> 16,
            };
            self.aa = self.mm[(i + 128) & 255].wrapping_add(self.aa);
            let y = self.mm[((x >> 2) & 255) as usize]
                .wrapping_add(self.aa)
                .wrapping_add(self.bb);
            self.mm[i] = y;
            self.bb = self.mm[((y >> 10) & 255) as usize].wrapping_add(x);
            self.rsl[i] = self.bb;
        }
    }
}

fn mix(s: &mut [u32; 8]) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *s;
    a ^= b << 11;
    d = d.wrapping_add(a);
    b = b.wrapping_add(c);
    b ^= c >> 2;
    e = e.wrapping_add(b);
    c = c.wrapping_add(d);
    c ^= d << 8;
    f = f.wrapping_add(c);
    d = d.wrapping_add(e);
    d ^= e >> 16;
    g = g.wrapping_add(d);
    e = e.wrapping_add(f);
    e ^= f << 10;
    h = h.wrapping_add(e);
    f = f.wrapping_add(g);
    f ^= g >> 4;
    a = a.wrapping_add(f);
    g = g.wrapping_add(h);
    g ^= h << 8;
    b = b.wrapping_add(g);
    h = h.wrapping_add(a);
    h ^= a >> 9;
    c = c.wrapping_add(h);
    a = a.wrapping_add(b);
    *s = [a, b, c, d, e, f, g, h];
}

impl RngCore for IsaacRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_int()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_int());
        let high = u64::from(self.next_int());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_int().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Generator for a round, seeded with the lowercase hex of `seed`.
pub fn deterministic_random_from_seed(seed: &[u8]) -> IsaacRandom {
    IsaacRandom::from_seed(&hex::encode(seed))
}

/// Per-round salt: the first ISAAC word for `previous_delta_hash`, little-endian.
pub fn salt_from_previous_delta(previous_delta_hash: &Hash) -> [u8; 4] {
    deterministic_random_from_seed(previous_delta_hash)
        .next_int()
        .to_le_bytes()
}
