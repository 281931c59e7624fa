// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Embed/extract orchestration.
//!
//! The facade validates the configuration, sequences cipher → metadata →
//! codec for embedding and codec → cipher for extraction, and surfaces the
//! typed errors from `error`. All operations are pure functions over byte
//! slices; nothing here touches the network or the filesystem.

use log::debug;

use crate::mp3::scan::scan;
use crate::stego::capacity::header_capacity;
use crate::stego::error::StegoError;
use crate::stego::filetype::detect_file_type;
use crate::stego::metadata::EmbedMetadata;
use crate::stego::{cipher, header, lsb};

/// Which embedding channel to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Three inert bits per MP3 frame header. Low bandwidth, structurally
    /// pristine cover.
    Header,
    /// 1–4 LSBs of every payload-region byte, with in-band metadata and
    /// blind extraction.
    Lsb,
}

/// Configuration for one embed operation.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Embedding channel.
    pub channel: Channel,
    /// LSBs per carrier byte (LSB channel only, 1–4).
    pub lsb_bits: u8,
    /// Key for the cipher and/or the position derivation. May be empty.
    pub key: String,
    /// Encipher the secret and the private metadata part.
    pub use_encryption: bool,
    /// Derive the LSB stream start offset from the key.
    pub use_key_for_position: bool,
    /// Filename recorded alongside the secret.
    pub original_filename: String,
    /// Declared media type; sniffed from the secret when empty.
    pub file_type: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            channel: Channel::Lsb,
            lsb_bits: 1,
            key: String::new(),
            use_encryption: false,
            use_key_for_position: false,
            original_filename: String::new(),
            file_type: String::new(),
        }
    }
}

/// Result of an LSB extraction, message deciphered when the metadata
/// called for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractResult {
    /// The recovered secret.
    pub message: Vec<u8>,
    /// The recovered metadata record.
    pub metadata: EmbedMetadata,
    /// Filename from the metadata.
    pub original_filename: String,
    /// Media type from the metadata.
    pub file_type: String,
}

/// Embed `secret` into `cover` per `config`, dispatching on the channel.
///
/// # Errors
/// - [`StegoError::EmptySecret`] / [`StegoError::EmptyCover`] on empty inputs.
/// - [`StegoError::EncryptionUnsupported`] for the header channel with
///   encryption requested — that channel has no in-band metadata to record
///   the flag.
/// - Everything the chosen codec reports.
pub fn embed(cover: &[u8], secret: &[u8], config: &EmbedConfig) -> Result<Vec<u8>, StegoError> {
    if secret.is_empty() {
        return Err(StegoError::EmptySecret);
    }
    if cover.is_empty() {
        return Err(StegoError::EmptyCover);
    }

    match config.channel {
        Channel::Header => {
            if config.use_encryption {
                return Err(StegoError::EncryptionUnsupported);
            }
            header::embed(cover, secret, &config.original_filename)
        }
        Channel::Lsb => embed_lsb(cover, secret, config),
    }
}

/// Embed into the header channel. Convenience wrapper over [`embed`]'s
/// header arm without a full config record.
pub fn embed_header(cover: &[u8], secret: &[u8], filename: &str) -> Result<Vec<u8>, StegoError> {
    if secret.is_empty() {
        return Err(StegoError::EmptySecret);
    }
    if cover.is_empty() {
        return Err(StegoError::EmptyCover);
    }
    header::embed(cover, secret, filename)
}

/// Extract from the header channel: `(secret, filename)`.
pub fn extract_header(stego: &[u8]) -> Result<(Vec<u8>, String), StegoError> {
    if stego.is_empty() {
        return Err(StegoError::EmptyCover);
    }
    header::extract(stego)
}

/// Embed into the LSB channel: cipher the secret when asked, build the
/// metadata record, and hand both to the codec.
pub fn embed_lsb(cover: &[u8], secret: &[u8], config: &EmbedConfig) -> Result<Vec<u8>, StegoError> {
    if secret.is_empty() {
        return Err(StegoError::EmptySecret);
    }
    if cover.is_empty() {
        return Err(StegoError::EmptyCover);
    }
    if !(1..=4).contains(&config.lsb_bits) {
        return Err(StegoError::InvalidBitCount);
    }

    let key = config.key.as_bytes();
    let encrypting = config.use_encryption && !key.is_empty();

    let file_type = if config.file_type.is_empty() {
        detect_file_type(secret, &config.original_filename)
    } else {
        config.file_type.clone()
    };

    let payload = if encrypting {
        debug!("enciphering {} secret bytes", secret.len());
        cipher::encrypt(secret, key)
    } else {
        secret.to_vec()
    };

    // The metadata records what actually happened: an encryption request
    // with an empty key enciphers nothing, and declaring it would make the
    // record undecodable by every key.
    let metadata = EmbedMetadata {
        use_encryption: encrypting,
        use_key_for_position: config.use_key_for_position,
        lsb_bits: config.lsb_bits,
        original_filename: config.original_filename.clone(),
        file_type,
        secret_message_size: payload.len(),
    };

    lsb::embed(cover, &payload, &metadata, key)
}

/// Blind LSB extraction with only a key: recover metadata and message,
/// deciphering the message when the metadata declares encryption.
pub fn extract_lsb(stego: &[u8], key: &str) -> Result<ExtractResult, StegoError> {
    if stego.is_empty() {
        return Err(StegoError::EmptyCover);
    }

    let key = key.as_bytes();
    let extraction = lsb::extract_with_metadata(stego, key)?;

    let message = if extraction.metadata.use_encryption && !key.is_empty() {
        debug!("deciphering {} recovered bytes", extraction.message.len());
        cipher::decrypt(&extraction.message, key)
    } else {
        extraction.message
    };

    let metadata = extraction.metadata;
    Ok(ExtractResult {
        message,
        original_filename: metadata.original_filename.clone(),
        file_type: metadata.file_type.clone(),
        metadata,
    })
}

/// Header-channel capacity of `cover`: `(payload bytes, frame count)`.
///
/// # Errors
/// [`StegoError::NoValidFrames`] when the scanner enrolls nothing.
pub fn header_capacity_of(cover: &[u8]) -> Result<(usize, usize), StegoError> {
    let frames = scan(cover);
    if frames.is_empty() {
        return Err(StegoError::NoValidFrames);
    }
    Ok((header_capacity(frames.len()), frames.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lsb_cover() -> Vec<u8> {
        (0..20_000).map(|i| (i * 7 % 256) as u8).collect()
    }

    #[test]
    fn empty_inputs_rejected_up_front() {
        let cfg = EmbedConfig::default();
        assert_eq!(
            embed(&lsb_cover(), b"", &cfg).unwrap_err(),
            StegoError::EmptySecret
        );
        assert_eq!(embed(&[], b"x", &cfg).unwrap_err(), StegoError::EmptyCover);
        assert_eq!(extract_lsb(&[], "").unwrap_err(), StegoError::EmptyCover);
        assert_eq!(extract_header(&[]).unwrap_err(), StegoError::EmptyCover);
    }

    #[test]
    fn header_channel_refuses_encryption() {
        let cfg = EmbedConfig {
            channel: Channel::Header,
            use_encryption: true,
            key: "k".into(),
            ..EmbedConfig::default()
        };
        assert_eq!(
            embed(&lsb_cover(), b"secret", &cfg).unwrap_err(),
            StegoError::EncryptionUnsupported
        );
    }

    #[test]
    fn enciphered_lsb_roundtrip() {
        let cfg = EmbedConfig {
            lsb_bits: 3,
            key: "hunter2".into(),
            use_encryption: true,
            use_key_for_position: true,
            original_filename: "notes.txt".into(),
            ..EmbedConfig::default()
        };
        let secret = b"meet me at the usual place";
        let stego = embed(&lsb_cover(), secret, &cfg).unwrap();
        let out = extract_lsb(&stego, "hunter2").unwrap();
        assert_eq!(out.message, secret);
        assert_eq!(out.original_filename, "notes.txt");
        assert_eq!(out.file_type, "text/plain");
        assert!(out.metadata.use_encryption);
        assert_eq!(out.metadata.lsb_bits, 3);
    }

    #[test]
    fn declared_file_type_passes_through() {
        let cfg = EmbedConfig {
            file_type: "application/x-custom".into(),
            ..EmbedConfig::default()
        };
        let stego = embed(&lsb_cover(), &[0x00, 0x01, 0x02], &cfg).unwrap();
        let out = extract_lsb(&stego, "").unwrap();
        assert_eq!(out.file_type, "application/x-custom");
    }

    #[test]
    fn encryption_flag_without_key_embeds_plaintext() {
        // use_encryption with an empty key enciphers nothing, so the
        // metadata must not declare encryption — the stego stays readable.
        let cfg = EmbedConfig {
            use_encryption: true,
            ..EmbedConfig::default()
        };
        let stego = embed(&lsb_cover(), b"plain", &cfg).unwrap();
        let out = extract_lsb(&stego, "").unwrap();
        assert_eq!(out.message, b"plain");
        assert!(!out.metadata.use_encryption);
    }

    #[test]
    fn secret_size_reflects_payload() {
        let cfg = EmbedConfig {
            key: "k".into(),
            use_encryption: true,
            ..EmbedConfig::default()
        };
        let stego = embed(&lsb_cover(), &[9u8; 77], &cfg).unwrap();
        let out = extract_lsb(&stego, "k").unwrap();
        assert_eq!(out.metadata.secret_message_size, 77);
        assert_eq!(out.message.len(), 77);
    }
}
