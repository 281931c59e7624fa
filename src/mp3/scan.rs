// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Frame scanning: ID3v2 skip and byte-aligned sync search.
//!
//! The scanner walks the cover byte by byte looking for the 11-bit frame
//! sync pattern, decodes a candidate header, and enrolls the frame only when
//! the decode succeeds and the whole frame fits in the cover. On any decode
//! failure it advances a single byte and retries, so interleaved garbage and
//! vendor padding between frames never abort a scan.

use log::debug;

use super::header::FrameHeader;

/// Size of the fixed ID3v2 tag header.
const ID3V2_HEADER_LEN: usize = 10;

/// One enrolled frame: its absolute byte offset in the cover plus the
/// decoded header (which carries the frame size).
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Byte offset of the first header byte within the cover.
    pub offset: usize,
    /// Decoded header fields.
    pub header: FrameHeader,
}

/// Return the offset of the first byte past an ID3v2 tag, or 0 when the
/// cover does not start with one.
///
/// The tag size at bytes 6..10 is synchsafe: each byte contributes 7 bits,
/// MSB first, and excludes the 10-byte tag header itself.
pub fn skip_id3(cover: &[u8]) -> usize {
    if cover.len() < ID3V2_HEADER_LEN {
        return 0;
    }
    if &cover[..3] != b"ID3" {
        return 0;
    }
    let size = (usize::from(cover[6]) << 21)
        | (usize::from(cover[7]) << 14)
        | (usize::from(cover[8]) << 7)
        | usize::from(cover[9]);
    ID3V2_HEADER_LEN + size
}

/// Scan the cover and return the frame table in ascending offset order.
///
/// Starts past any ID3v2 tag. Offsets are absolute within `cover`, strictly
/// increasing and non-overlapping (each successful parse advances the cursor
/// by the full frame size). An empty result means the cover holds no valid
/// MPEG-1 Layer III frames.
pub fn scan(cover: &[u8]) -> Vec<Frame> {
    let start = skip_id3(cover);
    let mut frames = Vec::new();

    let mut pos = start;
    while pos + 4 <= cover.len() {
        if cover[pos] == 0xFF && (cover[pos + 1] & 0xE0) == 0xE0 {
            match FrameHeader::parse(cover, pos) {
                Ok(header) if header.size > 0 && pos + header.size <= cover.len() => {
                    frames.push(Frame {
                        offset: pos,
                        header,
                    });
                    pos += header.size;
                    continue;
                }
                _ => {}
            }
        }
        pos += 1;
    }

    debug!(
        "scanned {} bytes: {} frames, id3 prefix {}",
        cover.len(),
        frames.len(),
        start
    );
    frames
}
