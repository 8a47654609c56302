use crate::blocks::{Block, Facing2, Facing4, Material, RailCurve};

/// A basic rail block; straight, sloped or curved, encoded in block data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RailBlock {
    data: u8,
}

impl RailBlock {
    /// Straight, flat rails running north/south or east/west.
    pub fn straight(facing: Facing2) -> RailBlock {
        let data = match facing {
            Facing2::NorthSouth => 0,
            Facing2::EastWest => 1,
        };
        RailBlock { data }
    }

    /// Straight rails ascending in the given direction.
    pub fn sloped(facing: Facing4) -> RailBlock {
        let data = match facing {
            Facing4::East => 2,
            Facing4::West => 3,
            Facing4::North => 4,
            Facing4::South => 5,
        };
        RailBlock { data }
    }

    /// Curved, flat rails.
    pub fn curved(curve: RailCurve) -> RailBlock {
        RailBlock {
            data: curve.value(),
        }
    }
}

impl Block for RailBlock {
    fn id(&self) -> u8 {
        Material::Rail.id()
    }

    fn data(&self) -> u8 {
        self.data
    }

    fn transparency(&self) -> u8 {
        Material::Rail.transparency()
    }
}
