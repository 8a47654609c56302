use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::GzEncoder;
use flate2::Compression;

use anvil_logger::time::unix_timestamp_millis;
use anvil_logger::{log, LogSeverity};

use crate::level::Level;
use crate::region::BLOCKS_PER_REGION_SIDE;

/// Manages the on-disk layout of one world: the level directory, its
/// `region/` subdirectory, the `session.lock` file and `level.dat`.
pub struct FileManager {
    level_dir: PathBuf,
    region_dir: PathBuf,
}

impl FileManager {
    /// Creates (or reuses) `<world_dir>/<level_name>/`. When not updating
    /// an existing world the directory name gets a numeric suffix until it
    /// is free.
    pub fn new(world_dir: &Path, level_name: &str, update_existing: bool) -> io::Result<FileManager> {
        let mut level_dir = world_dir.join(level_name);

        if !level_dir.exists() || !update_existing {
            let mut count = 1;
            while level_dir.exists() {
                level_dir = world_dir.join(format!("{}{}", level_name, count));
                count += 1;
            }
            fs::create_dir_all(&level_dir)?;
        }

        let region_dir = level_dir.join("region");
        if !region_dir.exists() {
            fs::create_dir(&region_dir)?;
        }

        Ok(FileManager {
            level_dir,
            region_dir,
        })
    }

    pub fn region_dir(&self) -> &Path {
        &self.region_dir
    }

    /// Writes `session.lock`: the current time in milliseconds as one
    /// big-endian i64.
    pub fn write_session_lock(&self) -> io::Result<()> {
        let path = self.level_dir.join("session.lock");
        log(
            format!("Writing session lock file: {}", path.display()),
            LogSeverity::Info,
        );
        let mut file = File::create(path)?;
        file.write_i64::<BigEndian>(unix_timestamp_millis())
    }

    /// Writes the gzip-framed `level.dat` unless it already exists.
    pub fn write_level_file(&self, level: &Level) -> io::Result<()> {
        let path = self.level_dir.join("level.dat");
        if path.exists() {
            return Ok(());
        }

        log(
            format!("Writing level file: {}", path.display()),
            LogSeverity::Info,
        );
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        level.to_tag().write(&mut encoder, "")?;
        encoder.finish()?;
        Ok(())
    }

    /// The path of the region file for region coordinates (x, z).
    pub fn region_file(&self, x: i32, z: i32) -> PathBuf {
        self.region_dir.join(format!("r.{}.{}.mca", x, z))
    }

    /// The path of the region file that holds the block at world
    /// coordinates (x, z). The file may not exist.
    pub fn region_file_for_block(&self, x: i32, z: i32) -> PathBuf {
        self.region_file(
            x.div_euclid(BLOCKS_PER_REGION_SIDE as i32),
            z.div_euclid(BLOCKS_PER_REGION_SIDE as i32),
        )
    }
}
