use std::collections::HashMap;
use std::io;

use anvil_nbt::Tag;

use crate::blocks::{Block, Material};
use crate::nibble::NibbleArray;
use crate::tags;
use crate::world::DEFAULT_TRANSPARENCY;

/// The height in blocks of a section.
pub const SECTION_HEIGHT: usize = 16;

const BLOCKS_PER_SECTION: usize = 16 * 16 * SECTION_HEIGHT;

/// A 16x16x16 cube of blocks within a chunk. Block ids are stored flat
/// (index `y*256 + z*16 + x`); block data and sky light are nibble-packed.
/// The transparency array is derived from the blocks at placement time and
/// is not persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    block_ids: Vec<u8>,
    block_data: NibbleArray,
    sky_light: NibbleArray,
    transparency: Vec<u8>,
    block_count: u32,
    y: u8,
}

impl Section {
    /// Creates an empty section at the given Y slot (0-15) of its chunk.
    pub fn new(y: u8) -> Section {
        Section {
            block_ids: vec![0; BLOCKS_PER_SECTION],
            block_data: NibbleArray::new(BLOCKS_PER_SECTION),
            sky_light: NibbleArray::new(BLOCKS_PER_SECTION),
            transparency: vec![DEFAULT_TRANSPARENCY; BLOCKS_PER_SECTION],
            block_count: 0,
            y,
        }
    }

    /// The Y slot of this section within its chunk.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// The number of non-air blocks.
    pub fn block_count(&self) -> u32 {
        self.block_count
    }

    /// Places a block at section-local coordinates. Id 0 counts as air and
    /// clears the cell.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: &dyn Block) {
        let index = block_index(x, y, z);
        let air = block.id() == 0;

        if self.block_ids[index] == 0 && !air {
            self.block_count += 1;
        } else if self.block_ids[index] != 0 && air {
            self.block_count -= 1;
        }

        if air {
            self.block_ids[index] = 0;
            self.block_data.set(index, 0);
            self.transparency[index] = DEFAULT_TRANSPARENCY;
        } else {
            self.block_ids[index] = block.id();
            self.block_data.set(index, block.data() & 0xF);
            self.transparency[index] = block.transparency();
        }
    }

    pub fn set_sky_light(&mut self, x: usize, y: usize, z: usize, light: u8) {
        self.sky_light.set(block_index(x, y, z), light);
    }

    pub fn sky_light(&self, x: usize, y: usize, z: usize) -> u8 {
        self.sky_light.get(block_index(x, y, z))
    }

    /// Propagates sky light down the (x, z) column starting with `light`.
    /// Opaque blocks kill the light, absorbing blocks reduce it by their
    /// transparency value plus one. Returns the light left below the
    /// section, zero or negative once the column went dark.
    pub fn add_sky_light(&mut self, x: usize, z: usize, mut light: i8) -> i8 {
        for y in (0..SECTION_HEIGHT).rev() {
            let index = block_index(x, y, z);
            let t = self.transparency[index];
            if t > 1 {
                light -= t as i8;
                light -= 1;
            } else if t == 0 {
                light = 0;
            }

            if light > 0 {
                self.sky_light.set(index, light as u8);
            } else {
                break;
            }
        }

        light
    }

    /// The section-local Y of the highest block in the column that is
    /// neither air nor fully transparent.
    pub fn highest_block(&self, x: usize, z: usize) -> Option<usize> {
        (0..SECTION_HEIGHT).rev().find(|&y| {
            let index = block_index(x, y, z);
            self.block_ids[index] != 0 && self.transparency[index] != 1
        })
    }

    pub fn to_tag(&self) -> Tag {
        let mut compound = HashMap::new();
        compound.insert("Blocks".to_owned(), Tag::ByteArray(self.block_ids.clone()));
        compound.insert(
            "Data".to_owned(),
            Tag::ByteArray(self.block_data.bytes().to_vec()),
        );
        // Block light is never computed, only reserved in the format.
        compound.insert(
            "BlockLight".to_owned(),
            Tag::ByteArray(vec![0; BLOCKS_PER_SECTION / 2]),
        );
        compound.insert(
            "SkyLight".to_owned(),
            Tag::ByteArray(self.sky_light.bytes().to_vec()),
        );
        compound.insert("Y".to_owned(), Tag::Byte(self.y as i8));
        Tag::Compound(compound)
    }

    /// Rebuilds a section from its tag. The block count is recomputed and
    /// the transparency array re-derived from the material table, so blocks
    /// stored with a synthetic transparency come back with the standard one.
    pub fn from_tag(tag: &Tag) -> io::Result<Section> {
        let compound = tags::as_compound(tag)?;

        let block_ids = tags::byte_array(compound, "Blocks")?.to_vec();
        if block_ids.len() != BLOCKS_PER_SECTION {
            return Err(tags::invalid_data(format!(
                "Blocks has {} entries, expected {}",
                block_ids.len(),
                BLOCKS_PER_SECTION
            )));
        }

        let block_data = NibbleArray::from_bytes(tags::byte_array(compound, "Data")?.to_vec());
        let sky_light = NibbleArray::from_bytes(tags::byte_array(compound, "SkyLight")?.to_vec());
        let y = tags::byte(compound, "Y")? as u8;

        let block_count = block_ids.iter().filter(|&&id| id != 0).count() as u32;
        let transparency = block_ids
            .iter()
            .map(|&id| Material::transparency_of(id))
            .collect();

        Ok(Section {
            block_ids,
            block_data,
            sky_light,
            transparency,
            block_count,
            y,
        })
    }
}

fn block_index(x: usize, y: usize, z: usize) -> usize {
    y * 256 + z * 16 + x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{CustomBlock, SimpleBlock};

    #[test]
    fn test_block_count_tracks_air() {
        let mut section = Section::new(0);
        section.set_block(1, 2, 3, &SimpleBlock(Material::Stone));
        section.set_block(1, 2, 3, &SimpleBlock(Material::Dirt));
        assert_eq!(section.block_count(), 1);

        section.set_block(1, 2, 3, &SimpleBlock(Material::Air));
        assert_eq!(section.block_count(), 0);
    }

    #[test]
    fn test_highest_block_skips_fully_transparent() {
        let mut section = Section::new(0);
        section.set_block(0, 3, 0, &SimpleBlock(Material::Stone));
        section.set_block(0, 8, 0, &SimpleBlock(Material::Glass));
        assert_eq!(section.highest_block(0, 0), Some(3));
        assert_eq!(section.highest_block(1, 1), None);
    }

    #[test]
    fn test_add_sky_light_stops_at_opaque() {
        let mut section = Section::new(0);
        section.set_block(0, 10, 0, &SimpleBlock(Material::Stone));

        let leftover = section.add_sky_light(0, 0, 15);
        assert_eq!(leftover, 0);
        assert_eq!(section.sky_light(0, 15, 0), 15);
        assert_eq!(section.sky_light(0, 11, 0), 15);
        assert_eq!(section.sky_light(0, 10, 0), 0);
    }

    #[test]
    fn test_add_sky_light_absorption() {
        let mut section = Section::new(0);
        // Ice absorbs 2 light plus the usual 1.
        section.set_block(0, 15, 0, &SimpleBlock(Material::Ice));

        let leftover = section.add_sky_light(0, 0, 15);
        assert_eq!(section.sky_light(0, 15, 0), 12);
        assert_eq!(section.sky_light(0, 0, 0), 12);
        assert_eq!(leftover, 12);
    }

    #[test]
    fn test_from_tag_rejects_non_compound() {
        use assert_matches::assert_matches;

        let result = Section::from_tag(&Tag::Byte(1));
        assert_matches!(result, Err(e) if e.kind() == io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_tag_roundtrip() {
        let mut section = Section::new(10);
        section.set_block(1, 2, 3, &SimpleBlock(Material::GoldBlock));
        section.set_block(2, 3, 4, &SimpleBlock(Material::DiamondBlock));
        section.set_block(3, 4, 5, &SimpleBlock(Material::Glass));
        section.set_block(4, 5, 6, &SimpleBlock(Material::Grass));
        section.set_sky_light(5, 6, 7, 1);
        section.set_sky_light(6, 7, 8, 2);
        section.set_sky_light(7, 8, 9, 3);

        let result = Section::from_tag(&section.to_tag()).unwrap();
        assert_eq!(result, section);
    }

    #[test]
    fn test_custom_transparency_is_lost_on_reload() {
        let mut section = Section::new(0);
        // Stone stored with a synthetic transparency of 2.
        section.set_block(0, 5, 0, &CustomBlock::new(1, 0, 2));

        let reloaded = Section::from_tag(&section.to_tag()).unwrap();
        // The reloaded section derives transparency 0 from the material
        // table, so the two differ.
        assert_ne!(reloaded, section);
        assert_eq!(reloaded.highest_block(0, 0), Some(5));
    }
}
