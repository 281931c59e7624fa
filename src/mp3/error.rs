// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Error types for MP3 frame-header parsing.

use std::fmt;

/// Errors that can occur while parsing a single MP3 frame header.
///
/// The frame scanner treats all of these as "not a frame here" and resumes
/// the sync search one byte later; they never abort a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mp3Error {
    /// Fewer than 4 bytes available at the candidate offset.
    UnexpectedEof,
    /// The 11-bit frame sync pattern is not present.
    InvalidSync,
    /// Version/layer fields are not MPEG-1 Layer III.
    UnsupportedFormat,
    /// Bitrate index 0 (free) or 15 (reserved).
    InvalidBitrate,
    /// Sample-rate index 3 (reserved).
    InvalidSampleRate,
}

impl fmt::Display for Mp3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "not enough data for frame header"),
            Self::InvalidSync => write!(f, "invalid frame sync"),
            Self::UnsupportedFormat => write!(f, "not an MPEG-1 Layer III frame"),
            Self::InvalidBitrate => write!(f, "invalid bitrate index"),
            Self::InvalidSampleRate => write!(f, "invalid sample rate index"),
        }
    }
}

impl std::error::Error for Mp3Error {}

pub type Result<T> = std::result::Result<T, Mp3Error>;
