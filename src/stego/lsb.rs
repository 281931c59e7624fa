// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! LSB channel: multi-bit embedding over the MP3 payload region.
//!
//! The first [`LSB_PREFIX_LEN`](crate::stego::LSB_PREFIX_LEN) bytes of the
//! cover are never touched, preserving ID3 tags and the first frame headers
//! so decoders keep seeking correctly. Everything past that is carrier: the
//! low `lsb_bits` of each byte hold the serialized stream
//!
//! ```text
//! [4 bytes] metadata length (big-endian u32)
//! [N bytes] metadata record (see `metadata`)
//! [4 bytes] secret length (big-endian u32)
//! [M bytes] secret (post-encipherment if the config asked for it)
//! ```
//!
//! written MSB-first from a single continuous bit cursor starting at the
//! (optionally key-derived) start offset. Extraction is either parametric —
//! the caller knows `lsb_bits` and the position flag — or blind: all eight
//! `(lsb_bits, keyed-position)` combinations are tried and a trial commits
//! only when two independent consistency witnesses hold.

use log::debug;

use crate::stego::bits::{LsbReader, LsbWriter};
use crate::stego::error::StegoError;
use crate::stego::metadata::{self, EmbedMetadata};
use crate::stego::LSB_PREFIX_LEN;

/// Reject metadata length prefixes above this during extraction trials.
/// Real records are a few hundred bytes; anything bigger is noise.
const MAX_METADATA_LEN: u32 = 10_000;

/// A recovered LSB payload: the raw message bytes (still enciphered when
/// the metadata says so) and the metadata record describing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsbExtraction {
    /// Raw recovered message, before any deciphering.
    pub message: Vec<u8>,
    /// Decoded metadata record.
    pub metadata: EmbedMetadata,
}

/// Derive the stream start offset within the payload region from the key:
/// the sum of the key bytes at even indices, mod the region length.
///
/// Returns 0 when `keyed` is false or the key is empty. The stream always
/// runs forward from the offset without wraparound; a large offset shrinks
/// the usable capacity and embedding fails rather than truncate.
pub fn key_offset(key: &[u8], region_len: usize, keyed: bool) -> usize {
    if !keyed || key.is_empty() || region_len == 0 {
        return 0;
    }
    let sum: usize = key.iter().step_by(2).map(|&b| usize::from(b)).sum();
    sum % region_len
}

/// Embed an already-prepared secret into the payload region of `cover`.
///
/// `metadata` describes the embedding and is serialized in-band ahead of the
/// secret; its `lsb_bits` and `use_key_for_position` fields drive the write.
/// The caller enciphers the secret beforehand when encryption is on — this
/// function only enciphers the private metadata part (via `metadata::serialize`).
///
/// # Errors
/// - [`StegoError::InvalidBitCount`] for `lsb_bits` outside 1–4.
/// - [`StegoError::InvalidMp3Format`] when the cover is no longer than the
///   reserved prefix.
/// - [`StegoError::InsufficientCapacity`] when the stream does not fit
///   between the start offset and the end of the region.
pub fn embed(
    cover: &[u8],
    secret: &[u8],
    metadata: &EmbedMetadata,
    key: &[u8],
) -> Result<Vec<u8>, StegoError> {
    let bits = metadata.lsb_bits;
    if !(1..=4).contains(&bits) {
        return Err(StegoError::InvalidBitCount);
    }
    if cover.len() <= LSB_PREFIX_LEN {
        return Err(StegoError::InvalidMp3Format);
    }

    let meta_bytes = metadata::serialize(metadata, key)?;
    let mut stream =
        Vec::with_capacity(8 + meta_bytes.len() + secret.len());
    stream.extend_from_slice(&(meta_bytes.len() as u32).to_be_bytes());
    stream.extend_from_slice(&meta_bytes);
    stream.extend_from_slice(&(secret.len() as u32).to_be_bytes());
    stream.extend_from_slice(secret);

    let region_len = cover.len() - LSB_PREFIX_LEN;
    let offset = key_offset(key, region_len, metadata.use_key_for_position);
    if stream.len() * 8 > (region_len - offset) * bits as usize {
        return Err(StegoError::InsufficientCapacity);
    }

    let mut stego = cover.to_vec();
    let mut writer = LsbWriter::new(&mut stego[LSB_PREFIX_LEN..], offset, bits);
    if !writer.write(&stream) {
        return Err(StegoError::InsufficientCapacity);
    }

    debug!(
        "lsb embed: {} stream bytes at {} bits/byte, offset {}",
        stream.len(),
        bits,
        offset
    );
    Ok(stego)
}

/// Parametric extraction: recover the stream given `lsb_bits` and the
/// keyed-position flag.
///
/// A committed result requires both consistency witnesses: the decoded
/// metadata must echo the trial parameters, and the secret length prefix
/// must equal the metadata's `secret_message_size`. Witness failures and
/// out-of-region reads report [`StegoError::NoSteganographicData`];
/// metadata decode errors propagate unchanged.
pub fn extract_with_params(
    stego: &[u8],
    bits: u8,
    key: &[u8],
    keyed_position: bool,
) -> Result<LsbExtraction, StegoError> {
    if !(1..=4).contains(&bits) {
        return Err(StegoError::InvalidBitCount);
    }
    if stego.len() <= LSB_PREFIX_LEN {
        return Err(StegoError::InvalidMp3Format);
    }

    let region = &stego[LSB_PREFIX_LEN..];
    let offset = key_offset(key, region.len(), keyed_position);
    let mut reader = LsbReader::new(region, offset, bits);

    let meta_len = reader
        .read_u32()
        .ok_or(StegoError::NoSteganographicData)?;
    if meta_len == 0 || meta_len > MAX_METADATA_LEN {
        return Err(StegoError::NoSteganographicData);
    }
    let meta_bytes = reader
        .read_bytes(meta_len as usize)
        .ok_or(StegoError::NoSteganographicData)?;
    let (meta, _) = metadata::deserialize(&meta_bytes, key)?;

    // First witness: the record must describe this very trial.
    if meta.lsb_bits != bits || meta.use_key_for_position != keyed_position {
        return Err(StegoError::NoSteganographicData);
    }

    // Second witness: the in-band length must match the declared size.
    let secret_len = reader
        .read_u32()
        .ok_or(StegoError::NoSteganographicData)?;
    if secret_len as usize != meta.secret_message_size {
        return Err(StegoError::NoSteganographicData);
    }
    let message = reader
        .read_bytes(secret_len as usize)
        .ok_or(StegoError::NoSteganographicData)?;

    Ok(LsbExtraction {
        message,
        metadata: meta,
    })
}

/// Blind extraction: only the key is supplied.
///
/// Tries every `(lsb_bits, keyed-position)` combination across
/// `{1,2,3,4} × {unkeyed, keyed}` and commits the first trial whose
/// consistency witnesses hold.
///
/// # Errors
/// - [`StegoError::InvalidMp3Format`] when the cover is no longer than the
///   reserved prefix.
/// - [`StegoError::WrongKey`] when a trial located a record that declares
///   encryption but the key failed to decipher it.
/// - [`StegoError::NoSteganographicData`] when every trial failed.
pub fn extract_with_metadata(stego: &[u8], key: &[u8]) -> Result<LsbExtraction, StegoError> {
    if stego.len() <= LSB_PREFIX_LEN {
        return Err(StegoError::InvalidMp3Format);
    }

    let mut saw_wrong_key = false;
    for bits in 1..=4u8 {
        for keyed_position in [false, true] {
            match extract_with_params(stego, bits, key, keyed_position) {
                Ok(extraction) => {
                    debug!(
                        "blind extract committed: {} bits, keyed={}",
                        bits, keyed_position
                    );
                    return Ok(extraction);
                }
                Err(StegoError::WrongKey) => saw_wrong_key = true,
                Err(_) => {}
            }
        }
    }

    if saw_wrong_key {
        Err(StegoError::WrongKey)
    } else {
        Err(StegoError::NoSteganographicData)
    }
}
