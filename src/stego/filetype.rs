// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sonocore

//! Media-type detection for embedded secrets.
//!
//! Sniffs well-known magic bytes first, then falls back to the filename
//! extension. The result is stored in the private metadata part so the
//! extractor can label the recovered payload without guessing.

/// Detect the media type of `data`, consulting `filename` when the content
/// is not recognizable. Defaults to `application/octet-stream`.
pub fn detect_file_type(data: &[u8], filename: &str) -> String {
    if let Some(t) = sniff_magic(data) {
        return t.to_string();
    }
    if let Some(t) = by_extension(filename) {
        return t.to_string();
    }
    if is_plausible_text(data) {
        return "text/plain".to_string();
    }
    "application/octet-stream".to_string()
}

fn sniff_magic(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if data.starts_with(b"\xFF\xD8\xFF") {
        return Some("image/jpeg");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if data.starts_with(b"%PDF-") {
        return Some("application/pdf");
    }
    if data.starts_with(b"PK\x03\x04") {
        return Some("application/zip");
    }
    if data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0)
    {
        return Some("audio/mpeg");
    }
    if data.starts_with(b"RIFF") && data.get(8..12) == Some(&b"WAVE"[..]) {
        return Some("audio/wav");
    }
    if data.get(4..8) == Some(&b"ftyp"[..]) {
        return Some("video/mp4");
    }
    None
}

fn by_extension(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit_once('.').map(|(_, e)| e)?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "mp4" => Some("video/mp4"),
        "zip" => Some("application/zip"),
        _ => None,
    }
}

/// ASCII-printable heuristic over the first 512 bytes.
fn is_plausible_text(data: &[u8]) -> bool {
    if data.is_empty() {
        return false;
    }
    data.iter()
        .take(512)
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..0x7F).contains(&b))
}
