use nestling_core::{ComputeOptions, LayoutInput, Limits, Tuning};
use rustc_hash::FxHasher;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// Content hash over everything a `compute` call depends on. Equal keys imply equal snapshots
/// modulo the version token; callers own any cache built on it.
pub fn cache_key(
    input: &LayoutInput,
    options: &ComputeOptions,
    tuning: &Tuning,
    limits: &Limits,
) -> u64 {
    let mut hasher = FxHasher::default();
    hash_json(&mut hasher, input);
    hash_json(&mut hasher, options);
    hash_json(&mut hasher, tuning);
    hash_json(&mut hasher, limits);
    hasher.finish()
}

fn hash_json<T: Serialize>(hasher: &mut FxHasher, value: &T) {
    // Plain data; serialization does not fail.
    serde_json::to_string(value)
        .unwrap_or_default()
        .hash(hasher);
}
