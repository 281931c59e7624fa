// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Steganographic embedding and extraction over MP3 covers.
//!
//! Two independent channels, selectable per operation:
//!
//! - **Header** (`embed_header` / `extract_header`): three semantically
//!   inert bits (Private, Copyright, Original) per MP3 frame header. Low
//!   bandwidth, but the cover stays structurally pristine.
//! - **LSB** (`embed_lsb` / `extract_lsb`): the low 1–4 bits of every byte
//!   past a fixed 1024-byte prefix, with an in-band two-part metadata
//!   record, optional key-derived start position, and blind parameter
//!   auto-detection on extraction.
//!
//! Both channels share the additive keystream cipher (`cipher`) and
//! produce stego output byte-length-identical to the cover. The
//! `psnr` module quantifies the byte-domain distortion between the two.

pub mod error;
pub mod cipher;
pub mod bits;
pub mod metadata;
pub mod filetype;
pub mod capacity;
pub mod header;
pub mod lsb;
pub mod psnr;
mod pipeline;

pub use error::StegoError;

/// Reserved cover prefix for the LSB channel, in bytes. Keeps ID3 tags and
/// the first frame headers intact so decoders stay seekable. Part of the
/// wire compatibility contract.
pub const LSB_PREFIX_LEN: usize = 1024;

pub use capacity::{header_capacity, lsb_capacity};
pub use metadata::EmbedMetadata;
pub use pipeline::{
    embed, embed_header, embed_lsb, extract_header, extract_lsb, header_capacity_of, Channel,
    EmbedConfig, ExtractResult,
};
pub use psnr::{compare as psnr, PsnrReport};
