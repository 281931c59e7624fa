// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Byte-wise Vigenère keystream over payload and private metadata.
//!
//! `encrypt` adds the cycled key to each byte mod 256; `decrypt` subtracts.
//! An empty key is the identity. This is deliberately a toy cipher: it
//! provides no confidentiality and no authentication. Its job is to bind
//! extraction success to possession of the key — a wrong key turns the
//! private metadata into bytes that fail to parse as JSON, which the
//! metadata decoder reports as a key mismatch.

/// Encipher `data` with the cycled `key`, adding mod 256.
///
/// Returns `data` unchanged when `key` is empty.
pub fn encrypt(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, &b)| b.wrapping_add(key[i % key.len()]))
        .collect()
}

/// Decipher `data` with the cycled `key`, subtracting mod 256.
///
/// Inverse of [`encrypt`]: `decrypt(encrypt(d, k), k) == d` for all inputs.
pub fn decrypt(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, &b)| b.wrapping_sub(key[i % key.len()]))
        .collect()
}
