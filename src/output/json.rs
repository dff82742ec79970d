//
//  storedesk
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Machine-readable output for `--json` and `sd api`.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

/// Writes a value to stdout as pretty-printed JSON.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Writes a value to `writer` as pretty-printed JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Picks a value out of a JSON document by a dotted path such as
/// `data.records.0.name`.
///
/// Numeric segments index into arrays. `.` or an empty path returns the
/// whole document.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use storedesk::output::select_path;
///
/// let doc = json!({"data": {"records": [{"name": "Mug"}]}});
/// assert_eq!(select_path(&doc, ".data.records.0.name"), Some(&json!("Mug")));
/// assert_eq!(select_path(&doc, "data.missing"), None);
/// ```
pub fn select_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.trim_start_matches('.')
        .split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match current {
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Object(map) => map.get(segment),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_to_buffer() {
        let mut buf = Vec::new();
        write_json_to(&mut buf, &json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_select_identity() {
        let doc = json!({"a": 1});
        assert_eq!(select_path(&doc, "."), Some(&doc));
        assert_eq!(select_path(&doc, ""), Some(&doc));
    }

    #[test]
    fn test_select_through_scalar_fails() {
        let doc = json!({"a": 1});
        assert_eq!(select_path(&doc, "a.b"), None);
        assert_eq!(select_path(&json!([1, 2]), "x"), None);
    }
}
