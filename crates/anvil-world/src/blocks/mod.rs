//! The block catalog: the material id table and the block types that can
//! be placed into a world.

pub mod custom;
pub mod door;
pub mod material;
pub mod rail;
pub mod simple;
pub mod stained;
pub mod states;

pub use custom::CustomBlock;
pub use door::{DoorBlock, DoorMaterial};
pub use material::Material;
pub use rail::RailBlock;
pub use simple::SimpleBlock;
pub use stained::{StainedBlock, StainedMaterial};
pub use states::{Facing2, Facing4, Half, HingeSide, RailCurve, StainedColor};

/// A placeable block.
pub trait Block {
    /// The base material id, without additional data.
    fn id(&self) -> u8;

    /// Additional block data; only the low 4 bits are significant.
    fn data(&self) -> u8;

    /// The transparency level: 0 is fully opaque, 1 fully transparent, and
    /// values above 1 reduce passing sky light by that amount.
    fn transparency(&self) -> u8;
}
