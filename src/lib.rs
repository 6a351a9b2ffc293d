mod chain;
mod hash;
mod macros;
mod table;

pub use chain::{Chain, Entry};
pub use hash::{Djb2Hasher, FnvHasher, fnv1a, hash_index};
pub use table::{CapacityError, DEFAULT_MAX_LOAD_FACTOR, MIN_CAPACITY, Table};
