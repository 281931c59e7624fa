// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! MP3 container parsing (zero external dependencies).
//!
//! Provides just enough MPEG-1 Layer III structure awareness for
//! steganographic embedding: skipping an ID3v2 tag, locating frame sync,
//! decoding the 4-byte frame header, and computing frame sizes. The scanner
//! never decodes audio and never mutates the cover; it produces a frame
//! table that the `stego` layer uses to address the inert header bits.
//!
//! Supports:
//! - ID3v2 tags (skipped via the synchsafe size field)
//! - MPEG-1 Layer III frames at any table bitrate/sample rate
//! - Garbage and vendor padding between frames (skipped byte by byte)
//!
//! Does NOT support:
//! - MPEG-2/2.5 or Layers I/II — rejected per frame, scan continues
//! - Free-format bitrate (index 0) — rejected per frame

pub mod error;
pub mod header;
pub mod scan;

pub use error::Mp3Error;
pub use header::FrameHeader;
pub use scan::{scan, skip_id3, Frame};
