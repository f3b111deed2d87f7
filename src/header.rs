//! This module loads and prepares default headers. Users can optionally
//! specify headers that should be sent with every request the smoke tester
//! makes, and this module parses those into a Reqwest HeaderMap.

use std::{collections::HashMap, fs::File, str::FromStr};

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::configuration::Configuration;

/// Load default headers from a file specified in configuration and combine
/// them with the headers every request should carry.
pub fn get_default_headers(config: &Configuration) -> Result<HeaderMap> {
    // Add custom default headers from file
    let custom_header: HashMap<String, String> = match config.header.as_deref() {
        Some(header_path) => {
            serde_yaml::from_reader(File::open(header_path).with_context(|| {
                format!(
                    "Failed to open default header file {}",
                    header_path.to_string_lossy()
                )
            })?)
            .with_context(|| "Failed to parse default header file as YAML")?
        }
        None => HashMap::new(),
    };

    // Create the actual map of HeaderKeys and Values
    let mut default_headers = HeaderMap::new();

    // Insert default headers
    default_headers.insert(
        HeaderName::from_static("user-agent"),
        HeaderValue::from_static(concat!("settings-smoke/", env!("CARGO_PKG_VERSION"))),
    );

    // Insert custom headers from file
    for (key, value) in custom_header {
        default_headers.insert(
            HeaderName::from_str(&key)
                .with_context(|| format!("Can't parse {key} as header name"))?,
            HeaderValue::from_str(&value)
                .with_context(|| format!("Can't parse {value} as header value"))?,
        );
    }

    Ok(default_headers)
}
