// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! MPEG-1 Layer III frame-header decoding.
//!
//! A frame header is 4 bytes:
//!
//! ```text
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//! A = sync (11 bits, all ones)     F = sample-rate index
//! B = version                      G = padding
//! C = layer                        H = private
//! D = protection                   I = channel mode
//! E = bitrate index                J = mode extension
//!                                  K = copyright    L = original
//!                                  M = emphasis
//! ```
//!
//! Only version field 3 (MPEG-1) with layer field 1 (Layer III) is accepted;
//! everything else is rejected so the scanner skips past it. The Private,
//! Copyright and Original bits are semantically inert for compliant decoders,
//! which is what makes the header channel possible.

use super::error::{Mp3Error, Result};

/// MPEG-1 Layer III bitrates in kbit/s, indexed by the 4-bit bitrate field.
/// Index 0 is "free" and index 15 is reserved; both are rejected.
const BITRATE_KBPS: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];

/// MPEG-1 sample rates in Hz, indexed by the 2-bit sample-rate field.
/// Index 3 is reserved and rejected.
const SAMPLE_RATE_HZ: [u32; 4] = [44_100, 48_000, 32_000, 0];

/// Version field value for MPEG-1.
const VERSION_MPEG1: u8 = 3;
/// Layer field value for Layer III.
const LAYER_III: u8 = 1;

/// A decoded MPEG-1 Layer III frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Frame sync (11 bits, always 0x7FF for a valid frame).
    pub sync: u16,
    /// MPEG audio version field (3 = MPEG-1).
    pub version: u8,
    /// Layer description field (1 = Layer III).
    pub layer: u8,
    /// Protection bit (0 = CRC follows the header).
    pub protection: u8,
    /// Bitrate index (1–14).
    pub bitrate_index: u8,
    /// Sample-rate index (0–2).
    pub sample_rate_index: u8,
    /// Padding bit.
    pub padding: u8,
    /// Private bit — inert, first carrier bit of the header channel.
    pub private: u8,
    /// Channel mode (stereo, joint stereo, dual, mono).
    pub channel_mode: u8,
    /// Mode extension (joint stereo only).
    pub mode_extension: u8,
    /// Copyright bit — inert, second carrier bit.
    pub copyright: u8,
    /// Original bit — inert, third carrier bit.
    pub original: u8,
    /// Emphasis field.
    pub emphasis: u8,
    /// Total frame size in bytes, header included.
    pub size: usize,
}

impl FrameHeader {
    /// Decode a frame header at `offset` within `data`.
    ///
    /// Accepts only MPEG-1 Layer III headers with a valid bitrate and
    /// sample-rate index. The frame size is
    /// `floor(144 * bitrate_bps / sample_rate_hz) + padding`.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        if data.len() < offset + 4 {
            return Err(Mp3Error::UnexpectedEof);
        }

        let (b1, b2, b3, b4) = (
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        );

        if b1 != 0xFF || (b2 & 0xE0) != 0xE0 {
            return Err(Mp3Error::InvalidSync);
        }

        let header = FrameHeader {
            sync: (u16::from(b1) << 3) | u16::from(b2 >> 5),
            version: (b2 >> 3) & 0x03,
            layer: (b2 >> 1) & 0x03,
            protection: b2 & 0x01,
            bitrate_index: (b3 >> 4) & 0x0F,
            sample_rate_index: (b3 >> 2) & 0x03,
            padding: (b3 >> 1) & 0x01,
            private: b3 & 0x01,
            channel_mode: (b4 >> 6) & 0x03,
            mode_extension: (b4 >> 4) & 0x03,
            copyright: (b4 >> 3) & 0x01,
            original: (b4 >> 2) & 0x01,
            emphasis: b4 & 0x03,
            size: 0,
        };

        if header.version != VERSION_MPEG1 || header.layer != LAYER_III {
            return Err(Mp3Error::UnsupportedFormat);
        }

        let bitrate_bps = BITRATE_KBPS[header.bitrate_index as usize] * 1000;
        if bitrate_bps == 0 {
            return Err(Mp3Error::InvalidBitrate);
        }
        let sample_rate = SAMPLE_RATE_HZ[header.sample_rate_index as usize];
        if sample_rate == 0 {
            return Err(Mp3Error::InvalidSampleRate);
        }

        let size = (144 * bitrate_bps / sample_rate) as usize + header.padding as usize;

        Ok(FrameHeader { size, ..header })
    }
}
