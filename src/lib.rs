// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! # sono-core
//!
//! Pure-Rust steganography engine for hiding arbitrary secret files in
//! MPEG-1 Layer III (MP3) audio. Provides two embedding channels:
//!
//! - **Header**: exploits the inert Private/Copyright/Original bits of
//!   each frame header — low bandwidth, structurally valid cover.
//! - **LSB**: overwrites the low 1–4 bits of every byte past a fixed
//!   prefix, with optional payload-position keying and a self-describing
//!   metadata preamble that enables blind extraction.
//!
//! All processing is in-memory over byte slices; the core performs no
//! network or filesystem I/O. The MP3 container module (`mp3`) is
//! zero-dependency (std only). The steganography layer (`stego`) applies a
//! byte-wise additive keystream — deliberately a toy cipher that binds
//! extraction to key possession without claiming confidentiality — and
//! ships a byte-domain PSNR comparator for cover/stego distortion checks.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sono_core::{embed_lsb, extract_lsb, EmbedConfig};
//!
//! let cover = std::fs::read("song.mp3").unwrap();
//! let cfg = EmbedConfig { lsb_bits: 2, key: "passphrase".into(),
//!     use_encryption: true, ..EmbedConfig::default() };
//! let stego = embed_lsb(&cover, b"secret payload", &cfg).unwrap();
//! let out = extract_lsb(&stego, "passphrase").unwrap();
//! assert_eq!(out.message, b"secret payload");
//! ```

pub mod mp3;
pub mod stego;

pub use mp3::{Frame, FrameHeader, Mp3Error};
pub use stego::{
    embed, embed_header, embed_lsb, extract_header, extract_lsb, header_capacity,
    header_capacity_of, lsb_capacity, psnr, Channel, EmbedConfig, EmbedMetadata, ExtractResult,
    PsnrReport, StegoError, LSB_PREFIX_LEN,
};
