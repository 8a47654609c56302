use std::path::Path;

use anvil_logger::{log, LogSeverity};

use crate::blocks::Block;
use crate::cache::RegionCache;
use crate::error::WorldError;
use crate::files::FileManager;
use crate::layers::DefaultLayers;
use crate::level::Level;
use crate::region::{Region, BLOCKS_PER_REGION_SIDE};

/// Maximal world height in blocks.
pub const MAX_HEIGHT: usize = 256;

/// The transparency assigned to air and unknown block ids.
pub const DEFAULT_TRANSPARENCY: u8 = 1;

/// Full daylight.
pub const DEFAULT_SKY_LIGHT: u8 = 15;

const REGION_CACHE_CAPACITY: usize = 30;

/// The world facade: routes block operations at world coordinates to the
/// right region via the cache and owns the on-disk layout.
pub struct World {
    level: Level,
    layers: Option<DefaultLayers>,
    files: FileManager,
    regions: RegionCache,
}

impl World {
    /// Creates a world under `<world_dir>/<level name>/`, writing the
    /// session lock. With `update_existing` an already existing directory
    /// is reused so regions saved earlier can be amended.
    pub fn new(
        world_dir: &Path,
        level: Level,
        layers: Option<DefaultLayers>,
        update_existing: bool,
    ) -> Result<World, WorldError> {
        let files = FileManager::new(world_dir, &level.name, update_existing)?;
        let regions = RegionCache::new(files.region_dir().to_path_buf(), REGION_CACHE_CAPACITY);
        files.write_session_lock()?;

        Ok(World {
            level,
            layers,
            files,
            regions,
        })
    }

    /// Sets a whole column of blocks starting at y 0. Empty columns and
    /// columns taller than 255 blocks are ignored.
    pub fn set_blocks(&mut self, x: i32, z: i32, blocks: &[&dyn Block]) -> Result<(), WorldError> {
        if blocks.is_empty() || blocks.len() > 255 {
            return Ok(());
        }

        let (block_x, block_z) = (local_coord(x), local_coord(z));
        let region = self.region(x, z, true)?;
        if let Some(region) = region {
            region.set_blocks(block_x, block_z, blocks);
        }
        Ok(())
    }

    pub fn set_block(
        &mut self,
        x: i32,
        y: usize,
        z: i32,
        block: &dyn Block,
    ) -> Result<(), WorldError> {
        let (block_x, block_z) = (local_coord(x), local_coord(z));
        if let Some(region) = self.region(x, z, true)? {
            region.set_block(block_x, y, block_z, block);
        }
        Ok(())
    }

    /// The height-map entry for the column, or 0 where nothing was ever
    /// written.
    pub fn highest_block(&mut self, x: i32, z: i32) -> Result<i32, WorldError> {
        let (block_x, block_z) = (local_coord(x), local_coord(z));
        match self.region(x, z, false)? {
            Some(region) => Ok(region.highest_block(block_x, block_z)),
            None => Ok(0),
        }
    }

    /// Computes the sky light for one column of the column's region.
    pub fn calculate_sky_light(&mut self, x: i32, z: i32) -> Result<(), WorldError> {
        let (block_x, block_z) = (local_coord(x), local_coord(z));
        if let Some(region) = self.region(x, z, false)? {
            region.add_sky_light(block_x, block_z);
        }
        Ok(())
    }

    /// Writes `level.dat` and every in-memory region to disk.
    pub fn save(&mut self) -> Result<(), WorldError> {
        self.files.write_level_file(&self.level)?;

        log("Saving regions from memory".to_owned(), LogSeverity::Info);
        for ((x, z), region) in self.regions.iter() {
            region.write_to_file(&self.files.region_file(x, z))?;
        }
        Ok(())
    }

    fn region(
        &mut self,
        x: i32,
        z: i32,
        create: bool,
    ) -> Result<Option<&mut Region>, WorldError> {
        let key = (
            x.div_euclid(BLOCKS_PER_REGION_SIDE as i32),
            z.div_euclid(BLOCKS_PER_REGION_SIDE as i32),
        );

        if self.regions.get(key)?.is_none() && create {
            self.regions
                .put(key, Region::new(key.0, key.1, self.layers.clone()))?;
        }
        self.regions.get(key)
    }
}

fn local_coord(coord: i32) -> usize {
    coord.rem_euclid(BLOCKS_PER_REGION_SIDE as i32) as usize
}
