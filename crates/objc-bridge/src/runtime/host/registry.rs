//! Selector interning for the host runtime.
//!
//! Each distinct name is copied once into leaked, NUL-terminated storage and
//! never freed. The address of that storage *is* the selector handle, so
//! looking up a selector's name is the identity map and two selectors are
//! equal exactly when their handles are.
//!
//! # Sharding
//!
//! The registry is split into `NUM_SHARDS` independent shards, each with its
//! own `RwLock` and `BUCKETS_PER_SHARD` chained buckets. The low bits of the
//! name's FxHash pick the shard and the next bits pick the bucket:
//!
//! - registration hit: read lock on one shard
//! - registration miss: write lock on one shard, double-checked
//!
//! A separate set of known handle addresses lets name lookup reject handles
//! this registry never issued instead of reading arbitrary memory.

// Shard and bucket masks are below 256, so the truncating casts are exact.
#![allow(clippy::cast_possible_truncation)]

use fxhash::{FxHashSet, FxHasher};
use objc_bridge_log::{debug, trace};
use std::ffi::CStr;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

const NUM_SHARDS: usize = 16;
const BUCKETS_PER_SHARD: usize = 256;
const SHARD_MASK: usize = NUM_SHARDS - 1;
const BUCKET_MASK: usize = BUCKETS_PER_SHARD - 1;
const SHARD_BITS: u32 = NUM_SHARDS.trailing_zeros();

/// One registered name.
#[derive(Clone, Copy)]
struct Interned {
    hash: u64,
    name: &'static CStr,
}

struct SelectorShard {
    buckets: RwLock<Vec<Vec<Interned>>>,
}

struct SelectorRegistry {
    shards: [SelectorShard; NUM_SHARDS],
    known: RwLock<FxHashSet<usize>>,
    count: AtomicUsize,
}

static REGISTRY: OnceLock<SelectorRegistry> = OnceLock::new();

fn registry() -> &'static SelectorRegistry {
    REGISTRY.get_or_init(|| SelectorRegistry {
        shards: std::array::from_fn(|_| SelectorShard {
            buckets: RwLock::new(vec![Vec::new(); BUCKETS_PER_SHARD]),
        }),
        known: RwLock::new(FxHashSet::default()),
        count: AtomicUsize::new(0),
    })
}

fn hash_name(name: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

fn find(bucket: &[Interned], hash: u64, name: &[u8]) -> Option<&'static CStr> {
    bucket
        .iter()
        .find(|entry| entry.hash == hash && entry.name.to_bytes() == name)
        .map(|entry| entry.name)
}

/// Interns `name` and returns its process-lifetime storage.
///
/// Registering the same bytes again, from any thread, returns the same
/// address.
pub fn register(name: &CStr) -> &'static CStr {
    let registry = registry();
    let bytes = name.to_bytes();
    let hash = hash_name(bytes);

    let shard_idx = (hash as usize) & SHARD_MASK;
    let bucket_idx = ((hash >> SHARD_BITS) as usize) & BUCKET_MASK;
    let shard = &registry.shards[shard_idx];

    // Entries are only ever appended, so a poisoned lock still guards a
    // consistent table.
    {
        let buckets = shard
            .buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = find(&buckets[bucket_idx], hash, bytes) {
            trace!("selector {name:?} already registered");
            return existing;
        }
    }

    let mut buckets = shard
        .buckets
        .write()
        .unwrap_or_else(PoisonError::into_inner);

    // Another thread may have inserted while we waited for the write lock.
    if let Some(existing) = find(&buckets[bucket_idx], hash, bytes) {
        return existing;
    }

    let stored: &'static CStr = Box::leak(Box::<CStr>::from(name));
    buckets[bucket_idx].push(Interned { hash, name: stored });

    registry
        .known
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(stored.as_ptr().addr());
    registry.count.fetch_add(1, Ordering::Relaxed);

    debug!(
        "registered selector {stored:?} in shard {shard_idx}, bucket {bucket_idx}"
    );
    stored
}

/// Returns the name stored at `ptr`, or `None` if this registry never
/// issued that address.
pub fn lookup(ptr: *const std::ffi::c_char) -> Option<&'static CStr> {
    if ptr.is_null() {
        return None;
    }

    let known = registry()
        .known
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&ptr.addr());
    if !known {
        return None;
    }

    // SAFETY: the address was produced by `register` from leaked,
    // NUL-terminated storage that is never freed.
    Some(unsafe { CStr::from_ptr(ptr) })
}

/// Number of distinct names interned so far.
#[must_use]
pub fn registered_count() -> usize {
    registry().count.load(Ordering::Relaxed)
}
