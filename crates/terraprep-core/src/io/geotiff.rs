//! Minimal GeoTIFF tag reader.
//!
//! Walks the first IFD of a TIFF file and extracts the georeferencing
//! tags (ModelPixelScale + ModelTiepoint, or ModelTransformation) plus
//! the EPSG code from the GeoKey directory. Pixel data is never touched;
//! full decoding stays with the `image` crate.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Result, TerraprepError};
use crate::geo::{GeoMetadata, GeoTransform};

const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
const TAG_MODEL_TIEPOINT: u16 = 33922;
const TAG_MODEL_TRANSFORMATION: u16 = 34264;
const TAG_GEO_KEY_DIRECTORY: u16 = 34735;

const TYPE_SHORT: u16 = 3;
const TYPE_DOUBLE: u16 = 12;

const GEO_KEY_GEOGRAPHIC_TYPE: u16 = 2048;
const GEO_KEY_PROJECTED_CS_TYPE: u16 = 3072;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

struct TagEntry {
    tag: u16,
    type_id: u16,
    count: u32,
    value_or_offset: u32,
}

/// Read georeferencing from a TIFF file's tags.
///
/// Returns `Ok(None)` when the file is not a TIFF or carries no geo
/// tags; a structurally broken TIFF is an error.
pub fn read_geo_metadata(path: &Path) -> Result<Option<GeoMetadata>> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 8];
    if file.read_exact(&mut header).is_err() {
        // Too short to be a TIFF.
        return Ok(None);
    }

    let endian = match (header[0], header[1]) {
        (b'I', b'I') => Endian::Little,
        (b'M', b'M') => Endian::Big,
        _ => return Ok(None),
    };
    if read_u16(endian, &header[2..4]) != 42 {
        return Ok(None);
    }

    let ifd_offset = read_u32(endian, &header[4..8]);
    let entries = read_ifd(&mut file, endian, ifd_offset)?;

    let scale = read_doubles(&mut file, endian, &entries, TAG_MODEL_PIXEL_SCALE)?;
    let tiepoint = read_doubles(&mut file, endian, &entries, TAG_MODEL_TIEPOINT)?;

    let mut transform = match (scale.as_deref(), tiepoint.as_deref()) {
        (Some(scale), Some(tie)) if scale.len() >= 2 && tie.len() >= 6 => {
            // Raster point (tie[0], tie[1]) maps to world (tie[3], tie[4]).
            Some(GeoTransform::new(
                tie[3] - tie[0] * scale[0],
                tie[4] + tie[1] * scale[1],
                scale[0],
                -scale[1],
            ))
        }
        _ => None,
    };

    if transform.is_none() {
        let matrix = read_doubles(&mut file, endian, &entries, TAG_MODEL_TRANSFORMATION)?;
        if let Some(m) = matrix.as_deref() {
            if m.len() >= 16 {
                transform = Some(GeoTransform {
                    origin_x: m[3],
                    origin_y: m[7],
                    pixel_width: m[0],
                    row_rotation: m[1],
                    col_rotation: m[4],
                    pixel_height: m[5],
                });
            }
        }
    }

    let Some(transform) = transform else {
        return Ok(None);
    };

    let epsg = read_epsg(&mut file, endian, &entries)?;
    Ok(Some(GeoMetadata { transform, epsg }))
}

fn read_ifd(file: &mut File, endian: Endian, offset: u32) -> Result<Vec<TagEntry>> {
    file.seek(SeekFrom::Start(offset as u64))?;
    let mut count_buf = [0u8; 2];
    file.read_exact(&mut count_buf)
        .map_err(|_| TerraprepError::Geo("TIFF IFD truncated".into()))?;
    let entry_count = read_u16(endian, &count_buf) as usize;

    let mut buf = vec![0u8; entry_count * 12];
    file.read_exact(&mut buf)
        .map_err(|_| TerraprepError::Geo("TIFF IFD entries truncated".into()))?;

    let mut entries = Vec::with_capacity(entry_count);
    for chunk in buf.chunks_exact(12) {
        entries.push(TagEntry {
            tag: read_u16(endian, &chunk[0..2]),
            type_id: read_u16(endian, &chunk[2..4]),
            count: read_u32(endian, &chunk[4..8]),
            value_or_offset: read_u32(endian, &chunk[8..12]),
        });
    }
    Ok(entries)
}

/// Values of a DOUBLE-typed tag. Doubles never fit inline, so the entry
/// value is always an offset.
fn read_doubles(
    file: &mut File,
    endian: Endian,
    entries: &[TagEntry],
    tag: u16,
) -> Result<Option<Vec<f64>>> {
    let Some(entry) = entries.iter().find(|e| e.tag == tag) else {
        return Ok(None);
    };
    if entry.type_id != TYPE_DOUBLE {
        return Err(TerraprepError::Geo(format!(
            "TIFF tag {tag} has unexpected type {}",
            entry.type_id
        )));
    }
    file.seek(SeekFrom::Start(entry.value_or_offset as u64))?;
    let mut buf = vec![0u8; entry.count as usize * 8];
    file.read_exact(&mut buf)
        .map_err(|_| TerraprepError::Geo(format!("TIFF tag {tag} data truncated")))?;
    Ok(Some(
        buf.chunks_exact(8).map(|c| read_f64(endian, c)).collect(),
    ))
}

/// EPSG code from the GeoKey directory: a projected CRS key wins over a
/// geographic one.
fn read_epsg(file: &mut File, endian: Endian, entries: &[TagEntry]) -> Result<Option<u32>> {
    let Some(entry) = entries.iter().find(|e| e.tag == TAG_GEO_KEY_DIRECTORY) else {
        return Ok(None);
    };
    if entry.type_id != TYPE_SHORT {
        return Err(TerraprepError::Geo(format!(
            "GeoKey directory has unexpected type {}",
            entry.type_id
        )));
    }
    file.seek(SeekFrom::Start(entry.value_or_offset as u64))?;
    let mut buf = vec![0u8; entry.count as usize * 2];
    file.read_exact(&mut buf)
        .map_err(|_| TerraprepError::Geo("GeoKey directory truncated".into()))?;
    let shorts: Vec<u16> = buf.chunks_exact(2).map(|c| read_u16(endian, c)).collect();
    if shorts.len() < 4 {
        return Ok(None);
    }

    // Header: [version, revision, minor, key count], then 4 shorts per
    // key: [key id, tag location, count, value].
    let key_count = shorts[3] as usize;
    let mut geographic = None;
    for i in 0..key_count {
        let base = 4 + i * 4;
        if base + 4 > shorts.len() {
            break;
        }
        let key_id = shorts[base];
        let location = shorts[base + 1];
        let value = shorts[base + 3];
        if location != 0 {
            // Value lives in another tag; only inline shorts are read.
            continue;
        }
        match key_id {
            GEO_KEY_PROJECTED_CS_TYPE => return Ok(Some(value as u32)),
            GEO_KEY_GEOGRAPHIC_TYPE => geographic = Some(value as u32),
            _ => {}
        }
    }
    Ok(geographic)
}

fn read_u16(endian: Endian, buf: &[u8]) -> u16 {
    match endian {
        Endian::Little => LittleEndian::read_u16(buf),
        Endian::Big => BigEndian::read_u16(buf),
    }
}

fn read_u32(endian: Endian, buf: &[u8]) -> u32 {
    match endian {
        Endian::Little => LittleEndian::read_u32(buf),
        Endian::Big => BigEndian::read_u32(buf),
    }
}

fn read_f64(endian: Endian, buf: &[u8]) -> f64 {
    match endian {
        Endian::Little => LittleEndian::read_f64(buf),
        Endian::Big => BigEndian::read_f64(buf),
    }
}
