//! Sample Cache Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in sample_cache_operations.rs

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// One lazily allocated block of grid samples
///
/// `values` has PAGE_SIZE * PAGE_SIZE entries, row-major in z.
/// NaN marks a cell that has not been computed yet.
pub struct SamplePage {
    pub values: Box<[f64]>,
}

/// Grow-only memo of a scalar field sampled on a regular grid
///
/// Pages are keyed by packed page coordinates. Readers share the lock;
/// a miss computes outside the lock and inserts under the write lock,
/// so every cell is written at most once per page lifetime.
pub struct SampleCacheData {
    /// World meters between grid points
    pub grid_size: f64,

    pub pages: RwLock<FxHashMap<u64, SamplePage>>,
}
