//
//  storedesk
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the commands.
//!
//! - **Time**: [`format_timestamp`]
//! - **Strings**: [`truncate`], [`parse_key_value`]
//! - **Files**: [`guess_image_mime`], [`format_size`]
//!
//! ## Example
//!
//! ```rust
//! use storedesk::util::{format_size, parse_key_value, truncate};
//!
//! assert_eq!(truncate("Stainless steel travel mug", 12), "Stainless...");
//! assert_eq!(parse_key_value("page=2").unwrap(), ("page".into(), "2".into()));
//! assert_eq!(format_size(1536), "1.5 KB");
//! ```

use std::path::Path;

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDateTime};

/// Formats a backend timestamp for display in local time.
///
/// The backend sends either RFC 3339 or `YYYY-MM-DD HH:MM:SS` (assumed to be
/// local already). Anything else is shown as received.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

/// Truncates a string to `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Splits a `key=value` argument. The value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => bail!("Invalid key=value pair: {}", s),
    }
}

/// Guesses an image MIME type from a file extension.
///
/// # Errors
///
/// The extension is missing or not an image type the backend accepts.
pub fn guess_image_mime(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    Ok(match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => bail!(
            "Unsupported image type for {}. Use jpg, png, gif or webp",
            path.display()
        ),
    })
}

/// Formats a byte count for humans.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
