use std::collections::HashMap;
use std::io;

use anvil_logger::time::unix_timestamp_millis;
use anvil_nbt::{Tag, TagType};

use crate::blocks::{Block, CustomBlock};
use crate::layers::DefaultLayers;
use crate::section::{Section, SECTION_HEIGHT};
use crate::tags;
use crate::world::{DEFAULT_SKY_LIGHT, MAX_HEIGHT};

/// Blocks per chunk side.
pub const BLOCKS_PER_CHUNK_SIDE: usize = 16;

const SECTIONS_PER_CHUNK: usize = 16;

/// A 16x16 column of up to 16 sparse sections plus its height map.
///
/// `x_pos`/`z_pos` are chunk coordinates relative to the owning region; the
/// persisted `xPos`/`zPos` are world-absolute, so serialization needs the
/// region's coordinates to convert (a historical quirk of the format
/// handling kept as is).
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    sections: Vec<Option<Section>>,
    height_map: [[i32; BLOCKS_PER_CHUNK_SIDE]; BLOCKS_PER_CHUNK_SIDE],
    x_pos: i32,
    z_pos: i32,
}

impl Chunk {
    /// Creates an empty chunk at region-relative chunk coordinates,
    /// pre-filled from the default layers when given.
    pub fn new(x_pos: i32, z_pos: i32, layers: Option<&DefaultLayers>) -> Chunk {
        let mut chunk = Chunk {
            sections: vec![None; SECTIONS_PER_CHUNK],
            height_map: [[0; BLOCKS_PER_CHUNK_SIDE]; BLOCKS_PER_CHUNK_SIDE],
            x_pos,
            z_pos,
        };

        if let Some(layers) = layers {
            for y in 0..MAX_HEIGHT {
                if let Some(material) = layers.layer(y) {
                    let block = CustomBlock::new(material.id(), 0, material.transparency());
                    for x in 0..BLOCKS_PER_CHUNK_SIDE {
                        for z in 0..BLOCKS_PER_CHUNK_SIDE {
                            chunk.set_block(x, y, z, &block);
                        }
                    }
                }
            }
        }

        chunk
    }

    /// Places a block at chunk-local x/z and absolute y, creating the
    /// section on demand.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: &dyn Block) {
        let section_y = y / SECTION_HEIGHT;
        let section = self.sections[section_y].get_or_insert_with(|| Section::new(section_y as u8));
        section.set_block(x, y % SECTION_HEIGHT, z, block);
    }

    /// Sets a whole column bottom-up and recomputes its height-map entry,
    /// so the region does not need revisiting later.
    pub fn set_blocks(&mut self, x: usize, z: usize, blocks: &[&dyn Block]) {
        for (y, block) in blocks.iter().enumerate() {
            self.set_block(x, y, z, *block);
        }

        self.height_map[x][z] = 0;
        self.calculate_height_map(x, z);
    }

    /// Pours full daylight down the (x, z) column, chaining each section's
    /// leftover light into the section below until it runs out.
    pub fn add_sky_light(&mut self, x: usize, z: usize) {
        let mut light = DEFAULT_SKY_LIGHT as i8;
        for section in self.sections.iter_mut().rev().flatten() {
            light = section.add_sky_light(x, z, light);
            if light <= 0 {
                break;
            }
        }
    }

    /// The height-map entry for the column: one above the highest
    /// non-transparent block, as set by the last column write.
    pub fn highest_block(&self, x: usize, z: usize) -> i32 {
        self.height_map[x][z]
    }

    /// True if at least one block is not air.
    pub fn has_blocks(&self) -> bool {
        self.sections
            .iter()
            .flatten()
            .any(|section| section.block_count() > 0)
    }

    pub fn section(&self, y: usize) -> Option<&Section> {
        self.sections[y].as_ref()
    }

    // Only fills the entry in while it is zero; an existing height is never
    // lowered.
    fn calculate_height_map(&mut self, x: usize, z: usize) {
        for y in (0..SECTIONS_PER_CHUNK).rev() {
            if let Some(section) = &self.sections[y] {
                if self.height_map[x][z] == 0 {
                    if let Some(height) = section.highest_block(x, z) {
                        self.height_map[x][z] = (y * SECTION_HEIGHT + height + 1) as i32;
                        break;
                    }
                }
            }
        }
    }

    /// Serializes to the chunk tag: an unnamed root holding the `Level`
    /// compound with world-absolute positions.
    pub fn to_tag(&self, region_x: i32, region_z: i32) -> Tag {
        let sections: Vec<Tag> = self
            .sections
            .iter()
            .flatten()
            .filter(|section| section.block_count() > 0)
            .map(Section::to_tag)
            .collect();

        let mut level = HashMap::new();
        level.insert(
            "Sections".to_owned(),
            Tag::List(TagType::Compound, sections),
        );
        level.insert(
            "xPos".to_owned(),
            Tag::Int(region_x * crate::region::CHUNKS_PER_REGION_SIDE as i32 + self.x_pos),
        );
        level.insert(
            "zPos".to_owned(),
            Tag::Int(region_z * crate::region::CHUNKS_PER_REGION_SIDE as i32 + self.z_pos),
        );
        level.insert("LastUpdate".to_owned(), Tag::Long(unix_timestamp_millis()));
        level.insert("V".to_owned(), Tag::Byte(1));
        level.insert("LightPopulated".to_owned(), Tag::Byte(1));
        level.insert("TerrainPopulated".to_owned(), Tag::Byte(1));
        level.insert(
            "Entities".to_owned(),
            Tag::List(TagType::Compound, Vec::new()),
        );
        level.insert(
            "TileEntities".to_owned(),
            Tag::List(TagType::Compound, Vec::new()),
        );

        let mut height_map = Vec::with_capacity(BLOCKS_PER_CHUNK_SIDE * BLOCKS_PER_CHUNK_SIDE);
        for z in 0..BLOCKS_PER_CHUNK_SIDE {
            for x in 0..BLOCKS_PER_CHUNK_SIDE {
                height_map.push(self.height_map[x][z]);
            }
        }
        level.insert("HeightMap".to_owned(), Tag::IntArray(height_map));

        let mut root = HashMap::new();
        root.insert("Level".to_owned(), Tag::Compound(level));
        Tag::Compound(root)
    }

    /// Rebuilds a chunk from its tag. The owning region's coordinates must
    /// be known to turn the stored world-absolute position back into a
    /// region-relative one.
    pub fn from_tag(region_x: i32, region_z: i32, tag: &Tag) -> io::Result<Chunk> {
        let root = tags::as_compound(tag)?;
        let level = tags::compound(root, "Level")?;

        let chunks_per_side = crate::region::CHUNKS_PER_REGION_SIDE as i32;
        let x_pos = tags::int(level, "xPos")? - region_x * chunks_per_side;
        let z_pos = tags::int(level, "zPos")? - region_z * chunks_per_side;

        let mut sections: Vec<Option<Section>> = vec![None; SECTIONS_PER_CHUNK];
        for section_tag in tags::list(level, "Sections")? {
            let section = Section::from_tag(section_tag)?;
            let y = section.y() as usize;
            if y >= SECTIONS_PER_CHUNK {
                return Err(tags::invalid_data(format!("section Y {} out of range", y)));
            }
            sections[y] = Some(section);
        }

        let height_map_tag = tags::int_array(level, "HeightMap")?;
        if height_map_tag.len() != BLOCKS_PER_CHUNK_SIDE * BLOCKS_PER_CHUNK_SIDE {
            return Err(tags::invalid_data(format!(
                "HeightMap has {} entries",
                height_map_tag.len()
            )));
        }
        let mut height_map = [[0; BLOCKS_PER_CHUNK_SIDE]; BLOCKS_PER_CHUNK_SIDE];
        let mut i = 0;
        for z in 0..BLOCKS_PER_CHUNK_SIDE {
            for x in 0..BLOCKS_PER_CHUNK_SIDE {
                height_map[x][z] = height_map_tag[i];
                i += 1;
            }
        }

        Ok(Chunk {
            sections,
            height_map,
            x_pos,
            z_pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Material, SimpleBlock};

    #[test]
    fn test_tag_roundtrip() {
        let mut chunk = Chunk::new(1, 2, None);
        chunk.set_block(0, 0, 0, &SimpleBlock(Material::Glass));
        chunk.set_block(1, 10, 1, &SimpleBlock(Material::Glass));
        chunk.set_block(2, 20, 2, &SimpleBlock(Material::DiamondBlock));
        chunk.set_block(3, 30, 3, &SimpleBlock(Material::BrickBlock));

        let tag = chunk.to_tag(5, -3);
        let result = Chunk::from_tag(5, -3, &tag).unwrap();
        assert_eq!(result, chunk);
    }

    #[test]
    fn test_set_blocks_updates_height_map() {
        let mut chunk = Chunk::new(0, 0, None);
        let stone = SimpleBlock(Material::Stone);
        let column: Vec<&dyn Block> = vec![&stone; 20];
        chunk.set_blocks(1, 1, &column);

        assert_eq!(chunk.highest_block(1, 1), 20);
        assert_eq!(chunk.highest_block(0, 0), 0);
    }

    #[test]
    fn test_height_is_never_lowered() {
        let mut chunk = Chunk::new(0, 0, None);
        let stone = SimpleBlock(Material::Stone);

        let tall: Vec<&dyn Block> = vec![&stone; 20];
        chunk.set_blocks(1, 1, &tall);
        assert_eq!(chunk.highest_block(1, 1), 20);

        // Writing a shorter column leaves the blocks above in place, so the
        // recomputed height stays at the old top.
        let short: Vec<&dyn Block> = vec![&stone; 5];
        chunk.set_blocks(1, 1, &short);
        assert_eq!(chunk.highest_block(1, 1), 20);
    }

    #[test]
    fn test_sky_light_chains_across_sections() {
        let mut chunk = Chunk::new(0, 0, None);
        // Ice at the top of section 2 absorbs 3 light; section 1 below is
        // present but empty.
        chunk.set_block(0, 47, 0, &SimpleBlock(Material::Ice));
        chunk.set_block(5, 16, 5, &SimpleBlock(Material::Stone));

        chunk.add_sky_light(0, 0);

        let upper = chunk.section(2).unwrap();
        assert_eq!(upper.sky_light(0, 15, 0), 12);
        assert_eq!(upper.sky_light(0, 8, 0), 12);
        // The attenuated light carries into the lower section instead of
        // restarting at full daylight.
        let lower = chunk.section(1).unwrap();
        assert_eq!(lower.sky_light(0, 4, 0), 12);
    }

    #[test]
    fn test_sky_light_stops_at_opaque_block() {
        let mut chunk = Chunk::new(0, 0, None);
        chunk.set_block(0, 40, 0, &SimpleBlock(Material::Stone));

        chunk.add_sky_light(0, 0);

        let section = chunk.section(2).unwrap();
        assert_eq!(section.sky_light(0, 15, 0), 15);
        assert_eq!(section.sky_light(0, 9, 0), 15);
        assert_eq!(section.sky_light(0, 8, 0), 0);
    }

    #[test]
    fn test_has_blocks() {
        let mut chunk = Chunk::new(0, 0, None);
        assert!(!chunk.has_blocks());
        chunk.set_block(0, 0, 0, &SimpleBlock(Material::Stone));
        assert!(chunk.has_blocks());
        chunk.set_block(0, 0, 0, &SimpleBlock(Material::Air));
        assert!(!chunk.has_blocks());
    }
}
