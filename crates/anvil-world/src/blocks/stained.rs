use crate::blocks::{Block, Material, StainedColor};

/// The materials that come in a stained variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StainedMaterial {
    Wool,
    Glass,
    Clay,
    GlassPane,
    Carpet,
}

impl StainedMaterial {
    fn material(self) -> Material {
        match self {
            StainedMaterial::Wool => Material::Wool,
            StainedMaterial::Glass => Material::StainedGlass,
            StainedMaterial::Clay => Material::StainedHardenedClay,
            StainedMaterial::GlassPane => Material::StainedGlassPane,
            StainedMaterial::Carpet => Material::Carpet,
        }
    }
}

/// A stained block: one of the dyeable materials in one of 16 colors. The
/// color is encoded in the block data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StainedBlock {
    material: StainedMaterial,
    color: StainedColor,
}

impl StainedBlock {
    pub fn new(material: StainedMaterial, color: StainedColor) -> StainedBlock {
        StainedBlock { material, color }
    }
}

impl Block for StainedBlock {
    fn id(&self) -> u8 {
        self.material.material().id()
    }

    fn data(&self) -> u8 {
        self.color.value()
    }

    fn transparency(&self) -> u8 {
        self.material.material().transparency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_encoded_in_data() {
        let block = StainedBlock::new(StainedMaterial::Wool, StainedColor::Red);
        assert_eq!(block.id(), Material::Wool.id());
        assert_eq!(block.data(), 14);
        assert_eq!(block.transparency(), 0);

        let glass = StainedBlock::new(StainedMaterial::Glass, StainedColor::Blue);
        assert_eq!(glass.id(), Material::StainedGlass.id());
        assert_eq!(glass.data(), 11);
        assert_eq!(glass.transparency(), 1);
    }
}
