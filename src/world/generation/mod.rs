//! Procedural heightfield generation
//!
//! - heightfield_data.rs: noise streams and the Sample value
//! - heightfield_operations.rs: the layered elevation stack and vegetation hints
//! - noise_operations.rs: fBm, ridge and easing primitives

pub mod heightfield_data;
pub mod heightfield_operations;
pub mod noise_operations;

pub use heightfield_data::{HeightfieldGenerator, Sample};
pub use heightfield_operations::{
    create_heightfield_generator, procedural_height, vegetation_sample,
};
