//! Content addressing and unique-id assignment
//!
//! A token id packs the token's ordinal into the low [`ORDINAL_BITS`] bits and
//! the top bits of its content hash above that, then scrambles the word with a
//! bijective 64-bit mixer. Because the mixer is a bijection and the ordinal
//! field alone differs between any two tokens of a stream, ids never collide
//! inside a stream. No table is consulted, so chunks can be addressed
//! independently once their global ordinals are known.

use crate::domain::strategy::Strategy;

/// Bits reserved for the ordinal inside an unmixed id
pub const ORDINAL_BITS: u32 = 40;

/// Largest ordinal that keeps ids collision free
pub const MAX_ORDINAL: u64 = (1 << ORDINAL_BITS) - 1;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Incremental 64-bit FNV-1a hasher
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a(u64);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(FNV_OFFSET)
    }
}

impl Fnv1a {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    pub fn finish(&self) -> u64 {
        self.0
    }
}

/// Single-round murmur-style avalanche
#[inline]
pub fn avalanche(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h
}

/// The splitmix64 finalizer, a bijection on `u64`
#[inline]
pub fn mix64(mut z: u64) -> u64 {
    z ^= z >> 30;
    z = z.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z ^= z >> 27;
    z = z.wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    z
}

/// Inverse of [`mix64`]
#[inline]
pub fn unmix64(mut z: u64) -> u64 {
    z = undo_xorshift(z, 31);
    z = z.wrapping_mul(0x3196_42b2_d24d_8ec3);
    z = undo_xorshift(z, 27);
    z = z.wrapping_mul(0x96de_1b17_3f11_9089);
    undo_xorshift(z, 30)
}

fn undo_xorshift(value: u64, shift: u32) -> u64 {
    let mut result = value;
    let mut term = value >> shift;
    while term != 0 {
        result ^= term;
        term >>= shift;
    }
    result
}

/// Deterministic hash of a token's content under a strategy and seed
pub fn content_hash(text: &[u8], strategy: Strategy, seed: u64) -> u64 {
    let mut hasher = Fnv1a::new();
    hasher.write(&seed.to_le_bytes());
    hasher.write(&[strategy.tag()]);
    hasher.write(text);
    mix64(hasher.finish())
}

/// Strategy- and seed-independent content code in `13..150_013`
pub fn content_code(text: &[u8]) -> u64 {
    let mut hasher = Fnv1a::new();
    hasher.write(text);
    avalanche(hasher.finish()) % 150_000 + 13
}

/// Decoded form of a token id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAddress {
    /// Position of the token in its stream
    pub ordinal: u64,
    /// Top bits of the token's content hash
    pub hash_tag: u64,
}

impl ContentAddress {
    /// Builds the address of the token at `ordinal` with the given content hash
    pub fn new(hash: u64, ordinal: u64) -> Self {
        debug_assert!(ordinal <= MAX_ORDINAL, "ordinal {ordinal} exceeds id space");
        Self {
            ordinal: ordinal & MAX_ORDINAL,
            hash_tag: hash >> ORDINAL_BITS,
        }
    }

    /// Packs and mixes the address into an id
    pub fn encode(self) -> u64 {
        mix64((self.hash_tag << ORDINAL_BITS) | self.ordinal)
    }

    /// Recovers the address from an id
    pub fn decode(id: u64) -> Self {
        let packed = unmix64(id);
        Self {
            ordinal: packed & MAX_ORDINAL,
            hash_tag: packed >> ORDINAL_BITS,
        }
    }

    /// Whether this address carries the tag of `hash`
    pub fn matches_hash(&self, hash: u64) -> bool {
        self.hash_tag == hash >> ORDINAL_BITS
    }
}

/// Id of the token at `ordinal` whose text is `text`
pub fn content_id(text: &[u8], strategy: Strategy, seed: u64, ordinal: u64) -> u64 {
    ContentAddress::new(content_hash(text, strategy, seed), ordinal).encode()
}
