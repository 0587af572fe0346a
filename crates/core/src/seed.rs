//! Seed hashing and stream mixing.
//!
//! A seed string is reduced to a [`SeedHash`] by taking the SHA-256 digest of
//! its UTF-8 bytes and reading the first four digest bytes as a big-endian
//! signed 32-bit integer. Big-endian is fixed regardless of host byte order,
//! so `seed_hash("abc")` is `-1166534977` on every platform.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

pub type SeedHash = i32;

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn seed_hash(seed: &str) -> SeedHash {
    let digest = Sha256::digest(seed.as_bytes());
    i32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Draws a fresh seed string for callers that supplied an empty seed.
///
/// This is the only entropy source in the crate. The returned string is an
/// ordinary seed afterwards: feeding it back reproduces the same content.
pub fn runtime_seed() -> String {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);

    (mix_seed(entropy) as u32 as i32).to_string()
}

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
