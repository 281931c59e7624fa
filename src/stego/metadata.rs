// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Two-part metadata record for the LSB channel.
//!
//! Wire layout:
//!
//! ```text
//! [4 bytes] public part length (big-endian u32)
//! [N bytes] public JSON: use_encryption, use_key_for_position, lsb_bits
//! [4 bytes] private part length (big-endian u32)
//! [M bytes] private JSON: original_filename, file_type, secret_message_size
//!           (run through the cipher when use_encryption is set and a key
//!            was supplied)
//! ```
//!
//! The public part is deliberately readable without a key so the blind
//! extractor can learn `lsb_bits` and `use_key_for_position` before locating
//! the rest of the stream; the private part still hides filename and size.
//! A wrong key turns the private part into bytes that fail JSON parsing,
//! which is reported as [`StegoError::WrongKey`].

use serde::{Deserialize, Serialize};

use crate::stego::cipher;
use crate::stego::error::StegoError;

/// Upper bound on the declared secret size: 100 MiB. A deciphered private
/// part claiming more is treated as key-mismatch garbage.
const MAX_SECRET_SIZE: i64 = 100 * 1024 * 1024;

/// Everything the embedder records about one LSB embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedMetadata {
    /// Whether the secret payload was enciphered before embedding.
    pub use_encryption: bool,
    /// Whether the stream start offset was derived from the key.
    pub use_key_for_position: bool,
    /// LSBs used per carrier byte (1–4).
    pub lsb_bits: u8,
    /// Name of the embedded file.
    pub original_filename: String,
    /// Declared media type of the embedded file.
    pub file_type: String,
    /// Length of the embedded secret in bytes.
    pub secret_message_size: usize,
}

#[derive(Serialize, Deserialize)]
struct PublicPart {
    use_encryption: bool,
    use_key_for_position: bool,
    lsb_bits: u8,
}

#[derive(Serialize, Deserialize)]
struct PrivatePart {
    original_filename: String,
    file_type: String,
    secret_message_size: i64,
}

/// Serialize a metadata record, enciphering the private part when the
/// record asks for encryption and `key` is non-empty.
pub fn serialize(metadata: &EmbedMetadata, key: &[u8]) -> Result<Vec<u8>, StegoError> {
    let public = PublicPart {
        use_encryption: metadata.use_encryption,
        use_key_for_position: metadata.use_key_for_position,
        lsb_bits: metadata.lsb_bits,
    };
    let public_json = serde_json::to_vec(&public).map_err(|_| StegoError::InvalidMetadata)?;

    let private = PrivatePart {
        original_filename: metadata.original_filename.clone(),
        file_type: metadata.file_type.clone(),
        secret_message_size: metadata.secret_message_size as i64,
    };
    let mut private_json =
        serde_json::to_vec(&private).map_err(|_| StegoError::InvalidMetadata)?;

    if metadata.use_encryption && !key.is_empty() {
        private_json = cipher::encrypt(&private_json, key);
    }

    let mut out = Vec::with_capacity(8 + public_json.len() + private_json.len());
    out.extend_from_slice(&(public_json.len() as u32).to_be_bytes());
    out.extend_from_slice(&public_json);
    out.extend_from_slice(&(private_json.len() as u32).to_be_bytes());
    out.extend_from_slice(&private_json);
    Ok(out)
}

/// Deserialize a metadata record, returning it with the total bytes consumed.
///
/// # Errors
/// - [`StegoError::InvalidMetadata`] when the record is truncated, the
///   public part is not valid JSON, or an unencrypted private part fails
///   to parse or declares an out-of-range size.
/// - [`StegoError::WrongKey`] when encryption is declared but `key` is
///   empty, or when the deciphered private part fails to parse or declares
///   an out-of-range size.
pub fn deserialize(data: &[u8], key: &[u8]) -> Result<(EmbedMetadata, usize), StegoError> {
    if data.len() < 8 {
        return Err(StegoError::InvalidMetadata);
    }

    let public_len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let mut consumed = 4;
    if data.len() < consumed + public_len + 4 {
        return Err(StegoError::InvalidMetadata);
    }
    let public: PublicPart = serde_json::from_slice(&data[consumed..consumed + public_len])
        .map_err(|_| StegoError::InvalidMetadata)?;
    consumed += public_len;

    let private_len = u32::from_be_bytes([
        data[consumed],
        data[consumed + 1],
        data[consumed + 2],
        data[consumed + 3],
    ]) as usize;
    consumed += 4;
    if data.len() < consumed + private_len {
        return Err(StegoError::InvalidMetadata);
    }
    let mut private_bytes = data[consumed..consumed + private_len].to_vec();
    consumed += private_len;

    if public.use_encryption {
        if key.is_empty() {
            return Err(StegoError::WrongKey);
        }
        private_bytes = cipher::decrypt(&private_bytes, key);
    }

    // Parse failure on an enciphered part means the cipher produced
    // nonsense: the key did not match.
    let mismatch = if public.use_encryption {
        StegoError::WrongKey
    } else {
        StegoError::InvalidMetadata
    };

    let private: PrivatePart = serde_json::from_slice(&private_bytes).map_err(|_| mismatch)?;
    if private.secret_message_size < 0 || private.secret_message_size > MAX_SECRET_SIZE {
        return Err(mismatch);
    }

    Ok((
        EmbedMetadata {
            use_encryption: public.use_encryption,
            use_key_for_position: public.use_key_for_position,
            lsb_bits: public.lsb_bits,
            original_filename: private.original_filename,
            file_type: private.file_type,
            secret_message_size: private.secret_message_size as usize,
        },
        consumed,
    ))
}
