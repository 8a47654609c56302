//! Sector-based region files.
//!
//! A region file stores up to 32x32 chunks in runs of 4096-byte sectors.
//! The file starts with two header sectors: a location table of 1024
//! big-endian u32 entries (`(sector_offset << 8) | sector_count`, indexed
//! `x + z * 32`) and a parallel table of Unix-second modification
//! timestamps. Chunk payloads are `[u32 length][u8 version][length - 1
//! compressed bytes]`, where version 1 is gzip and version 2 is zlib.
//!
//! Sectors are never compacted; freed runs are reused first-fit and the
//! file only ever grows.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fs::OpenOptions;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anvil_logger::{log, LogSeverity};

const SECTOR_BYTES: usize = 4096;
const SECTOR_INTS: usize = SECTOR_BYTES / 4;
const CHUNK_HEADER_SIZE: usize = 5;

const VERSION_GZIP: u8 = 1;
const VERSION_DEFLATE: u8 = 2;

/// An open region file with its header tables and free-sector map held in
/// memory. All mutation goes through `&mut self`; the file is
/// single-writer by construction.
pub struct RegionFile {
    file: std::fs::File,
    path: PathBuf,
    offsets: [u32; SECTOR_INTS],
    timestamps: [u32; SECTOR_INTS],
    sector_used: Vec<bool>,
}

impl RegionFile {
    /// Opens (creating if needed) the region file at `path`, writing empty
    /// header tables into new files and padding short ones to a sector
    /// boundary.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<RegionFile> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;

        let mut length = file.seek(SeekFrom::End(0))?;

        if length < (SECTOR_BYTES * 2) as u64 {
            // New or truncated file: write both header tables.
            file.seek(SeekFrom::Start(0))?;
            file.write_all(&[0u8; SECTOR_BYTES * 2])?;
            length = (SECTOR_BYTES * 2) as u64;
        }

        if length % SECTOR_BYTES as u64 != 0 {
            // Pad to the next sector boundary.
            let padding = SECTOR_BYTES as u64 - length % SECTOR_BYTES as u64;
            file.seek(SeekFrom::End(0))?;
            for _ in 0..padding {
                file.write_all(&[0u8])?;
            }
            length += padding;
        }

        let total_sectors = (length / SECTOR_BYTES as u64) as usize;
        let mut sector_used = vec![false; total_sectors];
        sector_used[0] = true; // location table
        sector_used[1] = true; // timestamp table

        let mut offsets = [0u32; SECTOR_INTS];
        let mut timestamps = [0u32; SECTOR_INTS];

        file.seek(SeekFrom::Start(0))?;
        for entry in offsets.iter_mut() {
            let offset = file.read_u32::<BigEndian>()?;
            *entry = offset;

            let sector_number = (offset >> 8) as usize;
            let sector_count = (offset & 0xFF) as usize;
            if offset != 0 && sector_number + sector_count <= total_sectors {
                for sector in sector_number..sector_number + sector_count {
                    sector_used[sector] = true;
                }
            }
        }
        for entry in timestamps.iter_mut() {
            *entry = file.read_u32::<BigEndian>()?;
        }

        Ok(RegionFile {
            file,
            path,
            offsets,
            timestamps,
            sector_used,
        })
    }

    /// Returns a reader over the decompressed chunk payload at region-local
    /// (x, z), or `None` if the chunk is absent or its entry is corrupt.
    /// Corruption is logged and treated as a missing chunk, never an error.
    pub fn chunk_reader(&mut self, x: usize, z: usize) -> io::Result<Option<Box<dyn Read>>> {
        if out_of_bounds(x, z) {
            log(
                format!("{}: read [{}, {}] out of bounds", self.path.display(), x, z),
                LogSeverity::Warning,
            );
            return Ok(None);
        }

        let offset = self.offsets[x + z * 32];
        if offset == 0 {
            return Ok(None);
        }

        let sector_number = (offset >> 8) as usize;
        let sector_count = (offset & 0xFF) as usize;

        if sector_number + sector_count > self.sector_used.len() {
            log(
                format!("{}: read [{}, {}] invalid sector", self.path.display(), x, z),
                LogSeverity::Warning,
            );
            return Ok(None);
        }

        self.file
            .seek(SeekFrom::Start((sector_number * SECTOR_BYTES) as u64))?;
        let length = self.file.read_u32::<BigEndian>()? as usize;

        if length > SECTOR_BYTES * sector_count || length < 1 {
            log(
                format!(
                    "{}: read [{}, {}] invalid length {} for {} sectors",
                    self.path.display(),
                    x,
                    z,
                    length,
                    sector_count
                ),
                LogSeverity::Warning,
            );
            return Ok(None);
        }

        let version = self.file.read_u8()?;
        let mut data = vec![0u8; length - 1];
        self.file.read_exact(&mut data)?;

        match version {
            VERSION_GZIP => Ok(Some(Box::new(GzDecoder::new(Cursor::new(data))))),
            VERSION_DEFLATE => Ok(Some(Box::new(ZlibDecoder::new(Cursor::new(data))))),
            _ => {
                log(
                    format!(
                        "{}: read [{}, {}] unknown version {}",
                        self.path.display(),
                        x,
                        z,
                        version
                    ),
                    LogSeverity::Warning,
                );
                Ok(None)
            }
        }
    }

    /// Returns a compressing sink for the chunk at region-local (x, z). The
    /// payload is buffered wholly in memory; nothing touches the file until
    /// [`ChunkWriter::close`].
    pub fn chunk_writer(&mut self, x: usize, z: usize) -> io::Result<ChunkWriter<'_>> {
        if out_of_bounds(x, z) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("chunk coordinate [{}, {}] out of bounds", x, z),
            ));
        }

        Ok(ChunkWriter {
            region: self,
            x,
            z,
            encoder: ZlibEncoder::new(Vec::with_capacity(8192), Compression::default()),
        })
    }

    /// Stores an already-compressed payload at (x, z), allocating sectors:
    /// exact fit rewrites in place, otherwise the old run is freed and the
    /// first fitting free run is taken, growing the file when none exists.
    /// Payloads needing 256 or more sectors are dropped; the 8-bit sector
    /// count cannot express them.
    pub fn write_chunk(&mut self, x: usize, z: usize, data: &[u8]) -> io::Result<()> {
        if out_of_bounds(x, z) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("chunk coordinate [{}, {}] out of bounds", x, z),
            ));
        }

        let sectors_needed = (data.len() + CHUNK_HEADER_SIZE).div_ceil(SECTOR_BYTES);
        if sectors_needed >= 256 {
            log(
                format!(
                    "{}: dropping oversized chunk [{}, {}]: {} bytes needs {} sectors",
                    self.path.display(),
                    x,
                    z,
                    data.len(),
                    sectors_needed
                ),
                LogSeverity::Warning,
            );
            return Ok(());
        }

        let offset = self.offsets[x + z * 32];
        let sector_number = (offset >> 8) as usize;
        let sectors_allocated = (offset & 0xFF) as usize;

        if sector_number != 0 && sectors_allocated == sectors_needed {
            // Exact fit: overwrite the old sectors in place.
            self.write_sectors(sector_number, data)?;
        } else {
            for sector in sector_number..sector_number + sectors_allocated {
                self.sector_used[sector] = false;
            }

            if let Some(run_start) = self.find_free_run(sectors_needed) {
                for sector in run_start..run_start + sectors_needed {
                    self.sector_used[sector] = true;
                }
                self.write_sectors(run_start, data)?;
                self.set_offset(x, z, ((run_start as u32) << 8) | sectors_needed as u32)?;
            } else {
                // No free run: grow the file by exactly the needed sectors.
                let run_start = self.sector_used.len();
                self.file.seek(SeekFrom::End(0))?;
                for _ in 0..sectors_needed {
                    self.file.write_all(&[0u8; SECTOR_BYTES])?;
                    self.sector_used.push(true);
                }
                self.write_sectors(run_start, data)?;
                self.set_offset(x, z, ((run_start as u32) << 8) | sectors_needed as u32)?;
            }
        }

        self.set_timestamp(x, z, anvil_logger::time::unix_timestamp() as u32)
    }

    pub fn has_chunk(&self, x: usize, z: usize) -> bool {
        !out_of_bounds(x, z) && self.offsets[x + z * 32] != 0
    }

    /// Flushes and closes the file.
    pub fn close(self) -> io::Result<()> {
        self.file.sync_all()
    }

    fn find_free_run(&self, sectors_needed: usize) -> Option<usize> {
        let mut run_start = 0;
        let mut run_length = 0;
        for (sector, used) in self.sector_used.iter().enumerate() {
            if *used {
                run_length = 0;
            } else {
                if run_length == 0 {
                    run_start = sector;
                }
                run_length += 1;
                if run_length >= sectors_needed {
                    return Some(run_start);
                }
            }
        }
        None
    }

    fn write_sectors(&mut self, sector_number: usize, data: &[u8]) -> io::Result<()> {
        self.file
            .seek(SeekFrom::Start((sector_number * SECTOR_BYTES) as u64))?;
        self.file.write_u32::<BigEndian>(data.len() as u32 + 1)?;
        self.file.write_u8(VERSION_DEFLATE)?;
        self.file.write_all(data)
    }

    fn set_offset(&mut self, x: usize, z: usize, offset: u32) -> io::Result<()> {
        self.offsets[x + z * 32] = offset;
        self.file.seek(SeekFrom::Start(((x + z * 32) * 4) as u64))?;
        self.file.write_u32::<BigEndian>(offset)
    }

    fn set_timestamp(&mut self, x: usize, z: usize, value: u32) -> io::Result<()> {
        self.timestamps[x + z * 32] = value;
        self.file
            .seek(SeekFrom::Start((SECTOR_BYTES + (x + z * 32) * 4) as u64))?;
        self.file.write_u32::<BigEndian>(value)
    }
}

fn out_of_bounds(x: usize, z: usize) -> bool {
    x >= 32 || z >= 32
}

/// In-memory zlib sink for one chunk. Dropping it without calling
/// [`close`](ChunkWriter::close) discards the write.
pub struct ChunkWriter<'a> {
    region: &'a mut RegionFile,
    x: usize,
    z: usize,
    encoder: ZlibEncoder<Vec<u8>>,
}

impl ChunkWriter<'_> {
    /// Finishes compression and hands the payload to the allocator.
    pub fn close(self) -> io::Result<()> {
        let data = self.encoder.finish()?;
        self.region.write_chunk(self.x, self.z, &data)
    }
}

impl Write for ChunkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_all(region: &mut RegionFile, x: usize, z: usize) -> Option<Vec<u8>> {
        let mut reader = region.chunk_reader(x, z).unwrap()?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data).unwrap();
        Some(data)
    }

    #[test]
    fn test_new_file_has_empty_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");

        let region = RegionFile::open(&path).unwrap();
        assert!(!region.has_chunk(0, 0));
        region.close().unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 8192);
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");

        let payload = b"chunk payload bytes".repeat(100);

        let mut region = RegionFile::open(&path).unwrap();
        let mut writer = region.chunk_writer(3, 7).unwrap();
        writer.write_all(&payload).unwrap();
        writer.close().unwrap();
        assert!(region.has_chunk(3, 7));
        region.close().unwrap();

        let mut region = RegionFile::open(&path).unwrap();
        assert!(region.has_chunk(3, 7));
        assert_eq!(read_all(&mut region, 3, 7).unwrap(), payload);
        assert_eq!(read_all(&mut region, 3, 8), None);
    }

    #[test]
    fn test_exact_fit_rewrite_keeps_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");

        let mut region = RegionFile::open(&path).unwrap();
        region.write_chunk(0, 0, &[1u8; 1000]).unwrap();
        let length = std::fs::metadata(&path).unwrap().len();

        region.write_chunk(0, 0, &[2u8; 1000]).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), length);
        region.close().unwrap();
    }

    #[test]
    fn test_relocation_reuses_freed_sectors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");

        let mut region = RegionFile::open(&path).unwrap();
        // One-sector chunk, then grow it to two sectors so it relocates.
        region.write_chunk(0, 0, &[1u8; 1000]).unwrap();
        region.write_chunk(0, 0, &[2u8; 5000]).unwrap();
        let length = std::fs::metadata(&path).unwrap().len();

        // A new one-sector chunk should land in the freed sector.
        region.write_chunk(1, 0, &[3u8; 1000]).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), length);
        region.close().unwrap();
    }

    #[test]
    fn test_oversized_chunk_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");

        let mut region = RegionFile::open(&path).unwrap();
        region.write_chunk(5, 5, &vec![0u8; 256 * 4096]).unwrap();
        assert!(!region.has_chunk(5, 5));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 8192);
        region.close().unwrap();
    }

    #[test]
    fn test_out_of_bounds_read_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");

        let mut region = RegionFile::open(&path).unwrap();
        assert!(region.chunk_reader(32, 0).unwrap().is_none());
        assert!(region.chunk_writer(0, 32).is_err());
    }

    #[test]
    fn test_corrupt_entry_reads_as_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.0.0.mca");

        let mut region = RegionFile::open(&path).unwrap();
        region.write_chunk(0, 0, &[1u8; 100]).unwrap();
        // Point the entry past the end of the file.
        region.set_offset(0, 0, (1000 << 8) | 1).unwrap();
        assert!(region.chunk_reader(0, 0).unwrap().is_none());
        region.close().unwrap();
    }

    #[test]
    fn test_multiple_chunks_independent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.1.2.mca");

        let mut region = RegionFile::open(&path).unwrap();
        for i in 0..8usize {
            region
                .write_chunk(i, i * 2 % 32, &vec![i as u8; 500 + i * 700])
                .unwrap();
        }
        region.close().unwrap();

        let mut region = RegionFile::open(&path).unwrap();
        for i in 0..8usize {
            assert_eq!(
                read_all(&mut region, i, i * 2 % 32).unwrap(),
                vec![i as u8; 500 + i * 700]
            );
        }
    }
}
