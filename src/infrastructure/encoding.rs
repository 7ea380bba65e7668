//! Strict text decoding for uploaded files.
//!
//! Content is UTF-8 unless it starts with a byte-order mark, in which case the
//! BOM's encoding wins (spreadsheet tools export "Unicode text" as UTF-16LE
//! with a BOM). Invalid sequences are an error, never replaced.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::domain::error::{AppError, Result};

pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let body = &bytes[bom_len..];

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| decode_error(encoding, body))
}

fn decode_error(encoding: &'static Encoding, body: &[u8]) -> AppError {
    let detail = match std::str::from_utf8(body) {
        Err(e) if encoding == UTF_8 => format!(
            "invalid UTF-8 byte sequence at offset {}",
            e.valid_up_to()
        ),
        _ => format!("content is not valid {} text", encoding.name()),
    };
    AppError::InvalidFormat(format!("Error processing file: {}", detail))
}
