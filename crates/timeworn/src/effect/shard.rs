//! Sharded execution across scoped worker threads.
//!
//! The boundary, grid and clusters are built once; each shard then places its slice of
//! the spot requests with an independent [`StdRng`]. Output depends on `base_seed` and the
//! shard count, not on thread scheduling.
use std::ops::Range;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::effect::config::EffectConfig;
use crate::effect::runner::{finish, PreparedEffect, RunResult};
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, PathShape};

/// Derive a deterministic RNG seed for a shard from a base seed.
pub fn seed_for_shard(base_seed: u64, shard: usize) -> u64 {
    let s = shard as u64;
    let mixed = base_seed ^ s.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15);
    mix_u64(mixed)
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Split `count` requests into `shards` contiguous ranges whose sizes differ by at most one.
pub(crate) fn shard_ranges(count: usize, shards: usize) -> Vec<Range<usize>> {
    let shards = shards.max(1);
    let base = count / shards;
    let extra = count % shards;
    let mut start = 0;
    (0..shards)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Run the effect on `shards` threads. A shard count of zero is treated as one.
pub fn run_sharded(
    shape: &PathShape,
    bounds: Option<BoundingBox>,
    config: &EffectConfig,
    base_seed: u64,
    shards: usize,
) -> Result<RunResult> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(base_seed);
    let prepared = PreparedEffect::prepare(shape, bounds, config, &mut rng, &mut ())?;
    let ranges = shard_ranges(prepared.config.spot_count, shards);
    debug!("Placing spots on {} shards: {:?}.", ranges.len(), ranges);

    let partials = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .enumerate()
            .map(|(shard, range)| {
                let prepared = &prepared;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed_for_shard(base_seed, shard));
                    prepared.place_spots(range, &mut rng, &mut ())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| Error::Other("effect shard panicked".into()))
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let mut result = RunResult::new();
    for partial in partials {
        result.extend(partial);
    }
    finish(&result, &mut ());
    Ok(result)
}
