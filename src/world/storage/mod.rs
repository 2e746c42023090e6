//! Paged sample cache
//!
//! Memoizes expensive scalar fields on a coarse grid. Used for the
//! approximate base height and approximate slope queries.

pub mod sample_cache_data;
pub mod sample_cache_operations;

pub use sample_cache_data::{SampleCacheData, SamplePage};
pub use sample_cache_operations::{
    cached_bilinear, cached_grid_value, cached_page_count, clear_sample_cache, create_empty_page,
    create_sample_cache, invalidate_pages_in_aabb, split_grid_coord,
};
