use crate::blocks::{Block, Facing4, Half, HingeSide, Material};

/// The material of which a door consists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorMaterial {
    Oak,
    Iron,
    Spruce,
    Birch,
    Jungle,
    Acacia,
    DarkOak,
}

impl DoorMaterial {
    fn material(self) -> Material {
        match self {
            DoorMaterial::Oak => Material::WoodenDoor,
            DoorMaterial::Iron => Material::IronDoor,
            DoorMaterial::Spruce => Material::SpruceDoor,
            DoorMaterial::Birch => Material::BirchDoor,
            DoorMaterial::Jungle => Material::JungleDoor,
            DoorMaterial::Acacia => Material::AcaciaDoor,
            DoorMaterial::DarkOak => Material::DarkOakDoor,
        }
    }
}

/// One half of a door. A whole door is an upper block stacked on a lower
/// block; the hinge side lives in the upper half's data, the facing and
/// open state in the lower half's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoorBlock {
    material: DoorMaterial,
    half: Half,
    hinge: HingeSide,
    facing: Facing4,
    open: bool,
}

impl DoorBlock {
    /// Creates the upper part of a door.
    pub fn upper(material: DoorMaterial, hinge: HingeSide) -> DoorBlock {
        DoorBlock {
            material,
            half: Half::Upper,
            hinge,
            facing: Facing4::West,
            open: false,
        }
    }

    /// Creates the lower part of a door.
    pub fn lower(material: DoorMaterial, facing: Facing4, open: bool) -> DoorBlock {
        DoorBlock {
            material,
            half: Half::Lower,
            hinge: HingeSide::Left,
            facing,
            open,
        }
    }
}

impl Block for DoorBlock {
    fn id(&self) -> u8 {
        self.material.material().id()
    }

    fn data(&self) -> u8 {
        match self.half {
            Half::Upper => {
                let mut data = 1 << 3;
                if self.hinge == HingeSide::Right {
                    data |= 1;
                }
                data
            }
            Half::Lower => {
                let mut data = match self.facing {
                    Facing4::West => 0,
                    Facing4::North => 1,
                    Facing4::East => 2,
                    Facing4::South => 3,
                };
                if self.open {
                    data |= 1 << 2;
                }
                data
            }
        }
    }

    fn transparency(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_half_encodes_hinge() {
        let left = DoorBlock::upper(DoorMaterial::Oak, HingeSide::Left);
        let right = DoorBlock::upper(DoorMaterial::Oak, HingeSide::Right);
        assert_eq!(left.data(), 0b1000);
        assert_eq!(right.data(), 0b1001);
        assert_eq!(left.id(), Material::WoodenDoor.id());
    }

    #[test]
    fn test_lower_half_encodes_facing_and_open() {
        let closed = DoorBlock::lower(DoorMaterial::Iron, Facing4::East, false);
        let open = DoorBlock::lower(DoorMaterial::Iron, Facing4::South, true);
        assert_eq!(closed.data(), 2);
        assert_eq!(open.data(), 0b0111);
        assert_eq!(open.id(), Material::IronDoor.id());
    }
}
