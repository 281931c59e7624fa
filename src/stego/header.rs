// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Frame-header channel: three inert bits per MP3 frame.
//!
//! Wire layout, bits consumed MSB-first from each source byte and written
//! three per frame in the fixed order Private, Copyright, Original:
//!
//! ```text
//! [4 bytes] secret length (big-endian u32)
//! [4 bytes] filename length (big-endian u32, 0–255)
//! [N bytes] filename
//! [M bytes] secret
//! ```
//!
//! Every other bit of the cover is preserved exactly, so the stego file
//! stays a playable MP3: compliant decoders ignore all three carrier bits.

use log::debug;

use crate::mp3::scan::scan;
use crate::stego::bits::bytes_to_bits;
use crate::stego::error::StegoError;

/// Preamble size: secret length + filename length.
pub const PREAMBLE_LEN: usize = 8;

/// Longest filename carried in the preamble.
pub const MAX_FILENAME_LEN: usize = 255;

/// Upper bound on an extracted secret length. Random inert bits in a cover
/// that was never embedded rarely decode to a length this plausible.
const MAX_DATA_LEN: u32 = 10 * 1024 * 1024;

/// Carrier bit positions within a 4-byte frame header, in embed order:
/// (byte offset, mask, shift) for Private, Copyright, Original.
const SAFE_BITS: [(usize, u8, u8); 3] = [(2, 0x01, 0), (3, 0x08, 3), (3, 0x04, 2)];

/// Embed `secret` (labelled with `filename`) into the inert header bits of
/// every frame of `cover`.
///
/// The filename is clamped to [`MAX_FILENAME_LEN`] bytes. The capacity gate
/// counts the preamble *and* the filename, so a long filename can never
/// slip past it.
///
/// # Errors
/// - [`StegoError::NoValidFrames`] when the cover holds no MPEG-1 Layer III
///   frames.
/// - [`StegoError::EmbedDataTooLarge`] when secret + preamble + filename
///   exceed the channel capacity.
pub fn embed(cover: &[u8], secret: &[u8], filename: &str) -> Result<Vec<u8>, StegoError> {
    let frames = scan(cover);
    if frames.is_empty() {
        return Err(StegoError::NoValidFrames);
    }

    let filename_bytes = clamp_filename(filename);
    let payload_len = PREAMBLE_LEN + filename_bytes.len() + secret.len();
    if payload_len > frames.len() * 3 / 8 {
        return Err(StegoError::EmbedDataTooLarge);
    }

    let mut payload = Vec::with_capacity(payload_len);
    payload.extend_from_slice(&(secret.len() as u32).to_be_bytes());
    payload.extend_from_slice(&(filename_bytes.len() as u32).to_be_bytes());
    payload.extend_from_slice(filename_bytes);
    payload.extend_from_slice(secret);

    let payload_bits = bytes_to_bits(&payload);
    let mut stego = cover.to_vec();
    let mut cursor = 0usize;

    'frames: for frame in &frames {
        for &(byte_off, mask, shift) in &SAFE_BITS {
            if cursor >= payload_bits.len() {
                break 'frames;
            }
            let pos = frame.offset + byte_off;
            stego[pos] = (stego[pos] & !mask) | (payload_bits[cursor] << shift);
            cursor += 1;
        }
    }

    // The capacity gate bounds the payload at floor(frames*3/8) bytes, so
    // the frame walk can never run dry mid-payload.
    debug_assert_eq!(cursor, payload_bits.len(), "payload outran the frame table");

    debug!(
        "header embed: {} payload bytes over {} frames",
        payload.len(),
        frames.len()
    );
    Ok(stego)
}

/// Extractor state over the header-channel bit traversal.
enum State {
    Length,
    FilenameLength,
    Filename,
    Data,
}

/// Extract the secret and filename from the inert header bits of `stego`.
///
/// Runs a four-state machine over the same bit traversal as [`embed`]:
/// secret length, filename length (with bounds validation), filename
/// bytes, then secret bytes.
///
/// # Errors
/// - [`StegoError::NoValidFrames`] when the cover holds no frames.
/// - [`StegoError::InvalidMetadata`] when the decoded lengths are
///   implausible (zero or oversized secret, filename over 255 bytes) —
///   the expected outcome for a cover that was never embedded.
/// - [`StegoError::IncompleteData`] when the frame table runs out before
///   the secret completes.
pub fn extract(stego: &[u8]) -> Result<(Vec<u8>, String), StegoError> {
    let frames = scan(stego);
    if frames.is_empty() {
        return Err(StegoError::NoValidFrames);
    }

    let mut state = State::Length;
    let mut current = 0u8;
    let mut bit_count = 0u8;

    let mut data_len = 0u32;
    let mut filename_len = 0u32;
    let mut preamble_bytes = 0usize;
    let mut filename = Vec::new();
    let mut data = Vec::new();

    for frame in &frames {
        for &(byte_off, mask, shift) in &SAFE_BITS {
            let bit = (stego[frame.offset + byte_off] & mask) >> shift;
            current = (current << 1) | bit;
            bit_count += 1;
            if bit_count < 8 {
                continue;
            }

            match state {
                State::Length => {
                    data_len = (data_len << 8) | u32::from(current);
                    preamble_bytes += 1;
                    if preamble_bytes == 4 {
                        state = State::FilenameLength;
                    }
                }
                State::FilenameLength => {
                    filename_len = (filename_len << 8) | u32::from(current);
                    preamble_bytes += 1;
                    if preamble_bytes == PREAMBLE_LEN {
                        if data_len == 0
                            || data_len > MAX_DATA_LEN
                            || filename_len > MAX_FILENAME_LEN as u32
                        {
                            return Err(StegoError::InvalidMetadata);
                        }
                        state = if filename_len > 0 {
                            State::Filename
                        } else {
                            State::Data
                        };
                    }
                }
                State::Filename => {
                    filename.push(current);
                    if filename.len() >= filename_len as usize {
                        state = State::Data;
                    }
                }
                State::Data => {
                    data.push(current);
                    if data.len() >= data_len as usize {
                        debug!(
                            "header extract: {} bytes, filename {} bytes",
                            data.len(),
                            filename.len()
                        );
                        let name = String::from_utf8_lossy(&filename).into_owned();
                        return Ok((data, name));
                    }
                }
            }

            current = 0;
            bit_count = 0;
        }
    }

    Err(StegoError::IncompleteData)
}

/// Clamp a filename to [`MAX_FILENAME_LEN`] bytes on a char boundary.
fn clamp_filename(filename: &str) -> &[u8] {
    if filename.len() <= MAX_FILENAME_LEN {
        return filename.as_bytes();
    }
    let mut end = MAX_FILENAME_LEN;
    while !filename.is_char_boundary(end) {
        end -= 1;
    }
    filename[..end].as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthesize a cover of `n` valid 417-byte frames.
    fn cover_with_frames(n: usize) -> Vec<u8> {
        let mut cover = Vec::with_capacity(n * 417);
        for i in 0..n {
            let mut frame = vec![(i % 251) as u8; 417];
            frame[0] = 0xFF;
            frame[1] = 0xFB;
            frame[2] = 0x90;
            frame[3] = 0x00;
            cover.extend(frame);
        }
        cover
    }

    #[test]
    fn roundtrip_with_filename() {
        let cover = cover_with_frames(200); // 600 bits = 75 bytes
        let stego = embed(&cover, b"attack at dawn", "orders.txt").unwrap();
        let (secret, name) = extract(&stego).unwrap();
        assert_eq!(secret, b"attack at dawn");
        assert_eq!(name, "orders.txt");
    }

    #[test]
    fn roundtrip_empty_filename() {
        let cover = cover_with_frames(100);
        let stego = embed(&cover, b"payload", "").unwrap();
        let (secret, name) = extract(&stego).unwrap();
        assert_eq!(secret, b"payload");
        assert_eq!(name, "");
    }

    #[test]
    fn length_preserved_and_only_inert_bits_touched() {
        let cover = cover_with_frames(100);
        let stego = embed(&cover, &[0xFFu8; 20], "name.bin").unwrap();
        assert_eq!(stego.len(), cover.len());

        let carriers: std::collections::HashSet<usize> = scan(&cover)
            .iter()
            .flat_map(|f| [f.offset + 2, f.offset + 3])
            .collect();
        for (i, (&a, &b)) in cover.iter().zip(stego.iter()).enumerate() {
            if carriers.contains(&i) {
                // Only Private (0x01) / Copyright+Original (0x0C) may differ.
                assert_eq!(a & !0x0D, b & !0x0D, "non-inert bit changed at {i}");
            } else {
                assert_eq!(a, b, "byte {i} outside carrier positions changed");
            }
        }
    }

    #[test]
    fn no_frames_rejected() {
        let cover = vec![0u8; 4096];
        assert_eq!(
            embed(&cover, b"x", "").unwrap_err(),
            StegoError::NoValidFrames
        );
        assert_eq!(extract(&cover).unwrap_err(), StegoError::NoValidFrames);
    }

    #[test]
    fn capacity_gate_counts_filename() {
        // 30 frames -> 90 bits -> 11 bytes. 8-byte preamble leaves 3.
        let cover = cover_with_frames(30);
        assert!(embed(&cover, b"abc", "").is_ok());
        assert_eq!(
            embed(&cover, b"abc", "f").unwrap_err(),
            StegoError::EmbedDataTooLarge
        );
    }

    #[test]
    fn oversized_secret_rejected() {
        let cover = cover_with_frames(30);
        assert_eq!(
            embed(&cover, &[0u8; 100], "").unwrap_err(),
            StegoError::EmbedDataTooLarge
        );
    }

    #[test]
    fn untouched_cover_yields_no_plausible_lengths() {
        // All-zero inert bits decode to data_len == 0.
        let cover = cover_with_frames(50);
        assert_eq!(extract(&cover).unwrap_err(), StegoError::InvalidMetadata);
    }

    #[test]
    fn long_filename_clamped() {
        let cover = cover_with_frames(800);
        let long_name = "n".repeat(300);
        let stego = embed(&cover, b"data", &long_name).unwrap();
        let (_, name) = extract(&stego).unwrap();
        assert_eq!(name.len(), MAX_FILENAME_LEN);
    }

    #[test]
    fn garbage_between_frames_survives_roundtrip() {
        let mut cover = Vec::new();
        for chunk in cover_with_frames(120).chunks(417) {
            cover.extend_from_slice(chunk);
            cover.extend_from_slice(b"\x00garbage\xFF\xE0");
        }
        let stego = embed(&cover, b"resilient", "g.bin").unwrap();
        let (secret, name) = extract(&stego).unwrap();
        assert_eq!(secret, b"resilient");
        assert_eq!(name, "g.bin");
    }
}
