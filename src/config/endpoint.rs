//
//  storedesk
//  config/endpoint.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Backend endpoint helpers.

use anyhow::{bail, Context, Result};
use url::Url;

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "STOREDESK_API_BASE";

/// Normalizes a user-supplied base URL.
///
/// Surrounding whitespace and trailing slashes are removed and a bare host
/// gets `http://` in front. The path prefix, if any, is kept.
///
/// # Errors
///
/// Fails if the result does not parse as an `http` or `https` URL.
///
/// # Examples
///
/// ```rust
/// use storedesk::config::normalize_base_url;
///
/// assert_eq!(
///     normalize_base_url(" shop.example.com/admin-api/ ").unwrap(),
///     "http://shop.example.com/admin-api"
/// );
/// assert_eq!(
///     normalize_base_url("https://shop.example.com").unwrap(),
///     "https://shop.example.com"
/// );
/// assert!(normalize_base_url("ftp://shop.example.com").is_err());
/// ```
pub fn normalize_base_url(input: &str) -> Result<String> {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("Base URL cannot be empty");
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).with_context(|| format!("Invalid base URL: {}", input))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!("Unsupported scheme '{}' in base URL", other),
    }
    if parsed.host_str().is_none() {
        bail!("Base URL has no host: {}", input);
    }

    Ok(candidate)
}

/// The base URL override from the environment, if set and non-empty.
pub fn base_url_from_env() -> Option<String> {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_path_prefix() {
        assert_eq!(
            normalize_base_url("http://10.0.0.5:8080/api/").unwrap(),
            "http://10.0.0.5:8080/api"
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("   ").is_err());
        assert!(normalize_base_url("http://shop example.com").is_err());
    }
}
