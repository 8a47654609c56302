//! World building and persistence on top of the region-file container.
//!
//! Blocks are placed through the [`World`] facade at world coordinates,
//! stored in nibble-packed 16x16x16 sections grouped into chunks and
//! 32x32-chunk regions, and persisted as NBT inside `r.<x>.<z>.mca` files.
//! A bounded LRU cache keeps recently touched regions in memory and writes
//! evicted ones back to disk.

pub mod blocks;
pub mod cache;
pub mod chunk;
pub mod error;
pub mod files;
pub mod layers;
pub mod level;
pub mod nibble;
pub mod region;
pub mod section;
pub mod world;

mod tags;

pub use blocks::Block;
pub use error::WorldError;
pub use layers::DefaultLayers;
pub use level::Level;
pub use world::World;
