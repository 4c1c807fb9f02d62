//! Parallel fingerprinting of many icons.
//!
//! Every fingerprint call is independent, so batches fan out over the rayon
//! global pool. Output order matches input order.

use crate::discretize::Params;
use crate::error::Result;
use crate::features::extract_features;
use crate::fingerprint::{central_fingerprint, fingerprint_set};
use crate::icon::LumaGrid;
use log::info;
use rayon::prelude::*;
use std::time::Instant;

/// Central hash of every icon
pub fn central_hashes<I>(icons: &[I], params: &Params) -> Result<Vec<u64>>
where
    I: LumaGrid + Sync,
{
    params.validate()?;
    let start_time = Instant::now();

    let hashes = icons
        .par_iter()
        .map(|icon| central_fingerprint(&extract_features(icon), params))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Computed {} central hashes in {:.2?}",
        hashes.len(),
        start_time.elapsed()
    );
    Ok(hashes)
}

/// Hash set of every icon
pub fn hash_sets<I>(icons: &[I], params: &Params) -> Result<Vec<Vec<u64>>>
where
    I: LumaGrid + Sync,
{
    params.validate()?;
    let start_time = Instant::now();

    let sets = icons
        .par_iter()
        .map(|icon| fingerprint_set(&extract_features(icon), params))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Computed {} hash sets ({} hashes) in {:.2?}",
        sets.len(),
        sets.iter().map(Vec::len).sum::<usize>(),
        start_time.elapsed()
    );
    Ok(sets)
}

/// Whether a record's central hash appears in a query's hash set
pub fn is_match(record: u64, query: &[u64]) -> bool {
    query.contains(&record)
}
