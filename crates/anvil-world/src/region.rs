use std::io;
use std::path::Path;

use anvil_logger::{log, LogSeverity};
use anvil_nbt::Tag;
use anvil_region::RegionFile;

use crate::blocks::Block;
use crate::chunk::{Chunk, BLOCKS_PER_CHUNK_SIDE};
use crate::layers::DefaultLayers;

/// Chunks per region side.
pub const CHUNKS_PER_REGION_SIDE: usize = 32;

/// Blocks per region side.
pub const BLOCKS_PER_REGION_SIDE: usize = CHUNKS_PER_REGION_SIDE * BLOCKS_PER_CHUNK_SIDE;

/// A 32x32 grid of sparse chunks at region coordinates (x, z). Block
/// operations take region-local coordinates (0..512).
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    x: i32,
    z: i32,
    chunks: Vec<Option<Chunk>>,
    layers: Option<DefaultLayers>,
}

impl Region {
    /// Creates an empty region at the given region coordinates, handing the
    /// default layers to every chunk it creates.
    pub fn new(x: i32, z: i32, layers: Option<DefaultLayers>) -> Region {
        Region {
            x,
            z,
            chunks: vec![None; CHUNKS_PER_REGION_SIDE * CHUNKS_PER_REGION_SIDE],
            layers,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: &dyn Block) {
        let block_x = x % BLOCKS_PER_CHUNK_SIDE;
        let block_z = z % BLOCKS_PER_CHUNK_SIDE;
        self.chunk_mut(x, z).set_block(block_x, y, block_z, block);
    }

    pub fn set_blocks(&mut self, x: usize, z: usize, blocks: &[&dyn Block]) {
        let block_x = x % BLOCKS_PER_CHUNK_SIDE;
        let block_z = z % BLOCKS_PER_CHUNK_SIDE;
        self.chunk_mut(x, z).set_blocks(block_x, block_z, blocks);
    }

    /// The height-map entry for a column, or 0 when its chunk was never
    /// written.
    pub fn highest_block(&self, x: usize, z: usize) -> i32 {
        match self.chunk(x, z) {
            Some(chunk) => chunk.highest_block(x % BLOCKS_PER_CHUNK_SIDE, z % BLOCKS_PER_CHUNK_SIDE),
            None => 0,
        }
    }

    pub fn add_sky_light(&mut self, x: usize, z: usize) {
        let index = chunk_index(x, z);
        if let Some(chunk) = &mut self.chunks[index] {
            chunk.add_sky_light(x % BLOCKS_PER_CHUNK_SIDE, z % BLOCKS_PER_CHUNK_SIDE);
        }
    }

    fn chunk(&self, x: usize, z: usize) -> Option<&Chunk> {
        self.chunks[chunk_index(x, z)].as_ref()
    }

    fn chunk_mut(&mut self, x: usize, z: usize) -> &mut Chunk {
        let chunk_x = x / BLOCKS_PER_CHUNK_SIDE;
        let chunk_z = z / BLOCKS_PER_CHUNK_SIDE;
        let index = chunk_x * CHUNKS_PER_REGION_SIDE + chunk_z;
        let layers = self.layers.as_ref();
        self.chunks[index]
            .get_or_insert_with(|| Chunk::new(chunk_x as i32, chunk_z as i32, layers))
    }

    /// Writes every populated chunk into the region file at `path`.
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        log(
            format!("Writing region file: {}", path.display()),
            LogSeverity::Debug,
        );

        let mut file = RegionFile::open(path)?;
        for chunk_x in 0..CHUNKS_PER_REGION_SIDE {
            for chunk_z in 0..CHUNKS_PER_REGION_SIDE {
                let slot = &self.chunks[chunk_x * CHUNKS_PER_REGION_SIDE + chunk_z];
                if let Some(chunk) = slot {
                    if chunk.has_blocks() {
                        let mut writer = file.chunk_writer(chunk_x, chunk_z)?;
                        chunk.to_tag(self.x, self.z).write(&mut writer, "")?;
                        writer.close()?;
                    }
                }
            }
        }
        file.close()
    }

    /// Loads every stored chunk from the region file at `path`.
    pub fn read_from_file(&mut self, path: &Path) -> io::Result<()> {
        log(
            format!("Loading region file: {}", path.display()),
            LogSeverity::Debug,
        );

        let mut file = RegionFile::open(path)?;
        for chunk_x in 0..CHUNKS_PER_REGION_SIDE {
            for chunk_z in 0..CHUNKS_PER_REGION_SIDE {
                if let Some(mut reader) = file.chunk_reader(chunk_x, chunk_z)? {
                    let (_, tag) = Tag::read(&mut reader)?;
                    let chunk = Chunk::from_tag(self.x, self.z, &tag)?;
                    self.chunks[chunk_x * CHUNKS_PER_REGION_SIDE + chunk_z] = Some(chunk);
                }
            }
        }
        file.close()
    }
}

fn chunk_index(x: usize, z: usize) -> usize {
    (x / BLOCKS_PER_CHUNK_SIDE) * CHUNKS_PER_REGION_SIDE + z / BLOCKS_PER_CHUNK_SIDE
}
