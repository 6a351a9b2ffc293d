use std::hash::Hasher;

const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// FNV-1a, 64-bit. XOR the byte in first, then wrapping-multiply by the
/// prime, carrying the accumulator across the whole input.
///
/// No per-process seed, so the same bytes hash to the same value in every
/// table instance and every run.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut h = FnvHasher::default();
    h.write(bytes);
    h.finish()
}

/// Maps a key to a slot index in `0..capacity`.
///
/// `capacity` must be non-zero; [`Table`](crate::Table) guarantees this
/// through its minimum-capacity invariant. Modulo rather than bit-masking,
/// since explicit resizes may pick capacities that are not powers of two.
pub fn hash_index(key: &str, capacity: usize) -> usize {
    (fnv1a(key.as_bytes()) % capacity as u64) as usize
}

/// FNV-1a behind the standard [`Hasher`] seam.
#[derive(Debug, Copy, Clone)]
pub struct FnvHasher {
    hash: u64,
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self {
            hash: FNV_OFFSET_BASIS,
        }
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.hash ^= *b as u64;
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }
}

/// DJB2, the classic `h * 33 + byte` string hash, widened to `u64`.
///
/// Kept as a second hasher behind the same [`Hasher`] contract for
/// comparison; the table itself always hashes with FNV-1a.
#[derive(Debug, Copy, Clone)]
pub struct Djb2Hasher {
    hash: u64,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self { hash: 5381 }
    }
}

impl Hasher for Djb2Hasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.hash = self.hash.wrapping_mul(33).wrapping_add(*b as u64);
        }
    }
}
