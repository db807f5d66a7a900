//! PNG `pHYs` chunk editing

use crate::{DpiError, Result};

/// PNG file signature
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// `pHYs` unit specifier for pixels per meter
pub const UNIT_METER: u8 = 1;

const PHYS: &[u8; 4] = b"pHYs";
const IDAT: &[u8; 4] = b"IDAT";
const IEND: &[u8; 4] = b"IEND";

/// Inches per meter
const DPI_TO_PPM: f64 = 39.3700787;

/// Physical pixel density read back from a `pHYs` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalDensity {
    /// Pixels per unit, X axis
    pub x: u32,
    /// Pixels per unit, Y axis
    pub y: u32,
    /// 1 = meter, 0 = aspect ratio only
    pub unit: u8,
}

impl PhysicalDensity {
    /// Horizontal DPI, if the unit is the meter
    pub fn dpi(&self) -> Option<f64> {
        (self.unit == UNIT_METER).then(|| self.x as f64 / DPI_TO_PPM)
    }
}

/// Convert DPI to pixels per meter (truncated)
pub fn dpi_to_ppm(dpi: f64) -> u32 {
    (dpi * DPI_TO_PPM) as u32
}

/// Build a complete `pHYs` chunk: length, type, payload and CRC
pub fn build_phys_chunk(dpi: f64) -> [u8; 21] {
    let ppm = dpi_to_ppm(dpi).to_be_bytes();

    let mut chunk = [0u8; 21];
    chunk[0..4].copy_from_slice(&9u32.to_be_bytes());
    chunk[4..8].copy_from_slice(PHYS);
    chunk[8..12].copy_from_slice(&ppm);
    chunk[12..16].copy_from_slice(&ppm);
    chunk[16] = UNIT_METER;

    // CRC covers chunk type + payload
    let crc = crc32fast::hash(&chunk[4..17]);
    chunk[17..21].copy_from_slice(&crc.to_be_bytes());
    chunk
}

/// Set the resolution of a PNG buffer
pub fn set_dpi(data: &[u8], dpi: u32) -> Result<Vec<u8>> {
    if !data.starts_with(&SIGNATURE) {
        return Err(DpiError::InvalidPng("missing signature"));
    }
    splice_phys_chunk(data, &build_phys_chunk(dpi as f64))
}

/// Replace the existing `pHYs` chunk with `chunk`, or insert it before the
/// first `IDAT` chunk when there is none
pub fn splice_phys_chunk(data: &[u8], chunk: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() + chunk.len());

    if let Some(idx) = find(data, PHYS) {
        if idx < 4 {
            return Err(DpiError::InvalidPng("pHYs marker has no length field"));
        }
        let start = idx - 4;
        let length = read_u32(data, start) as usize;
        let end = (idx + 8)
            .checked_add(length)
            .filter(|&end| end <= data.len())
            .ok_or(DpiError::InvalidPng("pHYs chunk runs past the end of the file"))?;

        out.extend_from_slice(&data[..start]);
        out.extend_from_slice(chunk);
        out.extend_from_slice(&data[end..]);
    } else {
        let idat = find(data, IDAT).ok_or(DpiError::InvalidPng("no IDAT chunk"))?;
        if idat < 4 {
            return Err(DpiError::InvalidPng("IDAT marker has no length field"));
        }
        let insert_at = idat - 4;

        out.extend_from_slice(&data[..insert_at]);
        out.extend_from_slice(chunk);
        out.extend_from_slice(&data[insert_at..]);
    }

    Ok(out)
}

/// Read the `pHYs` chunk by walking the chunk list
pub fn read_phys(data: &[u8]) -> Option<PhysicalDensity> {
    if !data.starts_with(&SIGNATURE) {
        return None;
    }

    let mut pos = SIGNATURE.len();
    while pos + 8 <= data.len() {
        let length = read_u32(data, pos) as usize;
        let kind = &data[pos + 4..pos + 8];
        let body = pos + 8;

        if kind == PHYS && length >= 9 && body + 9 <= data.len() {
            return Some(PhysicalDensity {
                x: read_u32(data, body),
                y: read_u32(data, body + 4),
                unit: data[body + 8],
            });
        }
        if kind == IEND {
            break;
        }
        pos = body.checked_add(length)?.checked_add(4)?;
    }
    None
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
