//! JPEG resolution editing (JFIF APP0 and EXIF APP1)

use crate::{DpiError, Result};

/// Start of image
pub const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
/// Start of scan, entropy-coded data follows
const SOS: u8 = 0xDA;
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const TEM: u8 = 0x01;
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;

const TAG_X_RESOLUTION: u16 = 0x011A;
const TAG_Y_RESOLUTION: u16 = 0x011B;

/// JFIF density unit: dots per inch
pub const UNITS_DPI: u8 = 1;

/// Density fields of a JFIF APP0 segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JfifDensity {
    pub units: u8,
    pub x: u16,
    pub y: u16,
}

/// A marker segment located before the scan data
#[derive(Debug, Clone, Copy)]
struct Segment {
    offset: usize,
    marker: u8,
    /// Length including the two marker bytes
    len: usize,
}

/// Set the resolution of a JPEG buffer
pub fn set_dpi(data: &[u8], dpi: u32) -> Result<Vec<u8>> {
    let segments = segments(data)?;
    let mut out = data.to_vec();

    for seg in segments {
        let bytes = &mut out[seg.offset..seg.offset + seg.len];
        match seg.marker {
            APP0 => patch_jfif(bytes, dpi),
            APP1 => patch_exif(bytes, dpi),
            _ => {}
        }
    }

    Ok(out)
}

/// Read the density of the first JFIF segment
pub fn read_jfif_density(data: &[u8]) -> Option<JfifDensity> {
    segments(data).ok()?.into_iter().find_map(|seg| {
        let bytes = &data[seg.offset..seg.offset + seg.len];
        (seg.marker == APP0 && is_jfif(bytes)).then(|| JfifDensity {
            units: bytes[11],
            x: u16::from_be_bytes([bytes[12], bytes[13]]),
            y: u16::from_be_bytes([bytes[14], bytes[15]]),
        })
    })
}

/// Read the EXIF X resolution rational, if present
pub fn read_exif_resolution(data: &[u8]) -> Option<(u32, u32)> {
    segments(data).ok()?.into_iter().find_map(|seg| {
        let bytes = &data[seg.offset..seg.offset + seg.len];
        if seg.marker != APP1 {
            return None;
        }
        let exif = Exif::parse(bytes)?;
        exif.entries(bytes)
            .find(|(tag, _)| *tag == TAG_X_RESOLUTION)
            .and_then(|(_, addr)| {
                (addr + 8 <= bytes.len()).then(|| {
                    (exif.order.read_u32(bytes, addr), exif.order.read_u32(bytes, addr + 4))
                })
            })
    })
}

/// Walk the marker stream up to the start of scan
fn segments(data: &[u8]) -> Result<Vec<Segment>> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != SOI {
        return Err(DpiError::InvalidJpeg);
    }

    let mut found = Vec::new();
    let mut i = 2;
    while i < data.len() {
        if data[i] != 0xFF {
            return Err(DpiError::InvalidJpegSegment { offset: i });
        }
        let marker = *data.get(i + 1).ok_or(DpiError::InvalidJpegSegment { offset: i })?;

        match marker {
            // Fill byte before a marker
            0xFF => {
                i += 1;
                continue;
            }
            SOS | EOI => break,
            TEM | RST0..=RST7 => {
                i += 2;
                continue;
            }
            _ => {}
        }

        if i + 4 > data.len() {
            return Err(DpiError::InvalidJpegSegment { offset: i });
        }
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize + 2;
        if i + len > data.len() {
            return Err(DpiError::InvalidJpegSegment { offset: i });
        }

        found.push(Segment { offset: i, marker, len });
        i += len;
    }

    Ok(found)
}

fn is_jfif(seg: &[u8]) -> bool {
    seg.len() >= 16 && &seg[4..9] == b"JFIF\0"
}

fn patch_jfif(seg: &mut [u8], dpi: u32) {
    if !is_jfif(seg) {
        return;
    }
    // JFIF densities are 16-bit
    let density = u16::try_from(dpi).unwrap_or(u16::MAX).to_be_bytes();
    seg[11] = UNITS_DPI;
    seg[0x0C..0x0E].copy_from_slice(&density);
    seg[0x0E..0x10].copy_from_slice(&density);
}

fn patch_exif(seg: &mut [u8], dpi: u32) {
    let Some(exif) = Exif::parse(seg) else {
        return;
    };

    let targets: Vec<usize> = exif
        .entries(seg)
        .filter(|(tag, _)| matches!(*tag, TAG_X_RESOLUTION | TAG_Y_RESOLUTION))
        .map(|(_, addr)| addr)
        .collect();

    for addr in targets {
        if addr + 8 <= seg.len() {
            exif.order.write_u32(seg, addr, dpi);
            exif.order.write_u32(seg, addr + 4, 1);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn read_u16(self, data: &[u8], at: usize) -> u16 {
        let bytes = [data[at], data[at + 1]];
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    fn read_u32(self, data: &[u8], at: usize) -> u32 {
        let bytes = [data[at], data[at + 1], data[at + 2], data[at + 3]];
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    fn write_u32(self, data: &mut [u8], at: usize, value: u32) {
        let bytes = match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        };
        data[at..at + 4].copy_from_slice(&bytes);
    }
}

/// TIFF header location inside an APP1 segment
#[derive(Debug, Clone, Copy)]
struct Exif {
    tiff: usize,
    ifd: usize,
    order: ByteOrder,
}

impl Exif {
    fn parse(seg: &[u8]) -> Option<Self> {
        if seg.len() < 20 || &seg[4..10] != b"Exif\0\0" {
            return None;
        }
        let tiff = 10;
        let order = match &seg[tiff..tiff + 2] {
            b"II" => ByteOrder::Little,
            b"MM" => ByteOrder::Big,
            _ => return None,
        };
        let ifd = tiff.checked_add(order.read_u32(seg, tiff + 4) as usize)?;
        (ifd + 2 <= seg.len()).then_some(Self { tiff, ifd, order })
    }

    /// (tag, absolute value address) of each first-IFD entry
    fn entries(self, seg: &[u8]) -> impl Iterator<Item = (u16, usize)> + '_ {
        let Self { tiff, ifd, order } = self;
        let count = order.read_u16(seg, ifd) as usize;
        (0..count)
            .map(move |n| ifd + 2 + n * 12)
            .take_while(move |pos| pos + 12 <= seg.len())
            .map(move |pos| {
                let tag = order.read_u16(seg, pos);
                let value = order.read_u32(seg, pos + 8) as usize;
                (tag, tiff + value)
            })
    }
}
