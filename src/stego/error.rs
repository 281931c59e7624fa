// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from cover validation through
//! embedding, blind extraction and metadata decoding. Every operation
//! returns exactly once; nothing in the core retries.

use core::fmt;

/// Errors that can occur during steganographic embedding or extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StegoError {
    /// The secret payload is empty.
    EmptySecret,
    /// The cover is empty.
    EmptyCover,
    /// LSB bit count outside 1–4.
    InvalidBitCount,
    /// The cover is too short for the LSB payload region, or holds no frames.
    InvalidMp3Format,
    /// Payload plus framing exceeds the channel capacity.
    InsufficientCapacity,
    /// The frame scanner found no valid MPEG-1 Layer III frames.
    NoValidFrames,
    /// Secret plus preamble exceeds the header-channel capacity.
    EmbedDataTooLarge,
    /// Metadata failed to parse, or its length fields are out of bounds.
    InvalidMetadata,
    /// Metadata declares encryption but no key was given, or the deciphered
    /// private part is nonsense (strong evidence of a key mismatch).
    WrongKey,
    /// Blind LSB extraction exhausted every parameter trial without a
    /// consistency witness.
    NoSteganographicData,
    /// The frame table ran out before the header-channel payload completed.
    IncompleteData,
    /// Encryption was requested for the header channel, which has no
    /// in-band metadata to record the flag.
    EncryptionUnsupported,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "secret payload cannot be empty"),
            Self::EmptyCover => write!(f, "MP3 cover cannot be empty"),
            Self::InvalidBitCount => write!(f, "bits must be between 1 and 4"),
            Self::InvalidMp3Format => write!(f, "invalid MP3 file format"),
            Self::InsufficientCapacity => {
                write!(f, "MP3 file is too small to embed the message")
            }
            Self::NoValidFrames => write!(f, "no valid MP3 frames found"),
            Self::EmbedDataTooLarge => {
                write!(f, "secret data too large for MP3 header capacity")
            }
            Self::InvalidMetadata => write!(f, "invalid metadata format"),
            Self::WrongKey => {
                write!(f, "incorrect key provided - unable to decrypt encrypted metadata")
            }
            Self::NoSteganographicData => {
                write!(f, "no steganographic data found in this MP3 file")
            }
            Self::IncompleteData => write!(f, "could not extract complete data"),
            Self::EncryptionUnsupported => {
                write!(f, "header channel does not support encryption")
            }
        }
    }
}

impl std::error::Error for StegoError {}
