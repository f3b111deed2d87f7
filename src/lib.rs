//! settings-smoke checks that a running school administration API accepts
//! a branding settings upload end to end: it logs in with the seeded test
//! account, PATCHes the settings resource with a multipart form holding
//! the branding fields and a small logo file, and reads the settings back
//! to confirm the update stuck.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate lazy_static;

pub mod asset;
pub mod authentication;
pub mod configuration;
pub mod header;
pub mod response;
pub mod smoke;

use configuration::{Configuration, OutputFormat};
use url::Url;

/// Initializes the log crate with the configured level, either in
/// human-readable or in JSON lines format.
pub fn setup_logging(config: &Configuration) {
    match config.output_format {
        OutputFormat::Json => {
            let mut builder = json_env_logger2::builder();
            builder.filter_level(config.log_level);
            let _ = builder.try_init();
        }
        OutputFormat::HumanReadable => {
            let _ = env_logger::Builder::new()
                .filter_level(config.log_level)
                .try_init();
        }
    }
}

/// Joins the target base URL and an endpoint path. `Url::join` would drop
/// the final path segment of the base, so plain concatenation is used.
pub(crate) fn endpoint_url(target: &Url, path: &str) -> String {
    format!("{}{}", target.as_str().trim_end_matches('/'), path)
}

#[cfg(test)]
pub(crate) fn test_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::new()
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::endpoint_url;

    #[test]
    fn test_endpoint_url_keeps_the_base_path() {
        let target = Url::parse("http://localhost:3000/api").unwrap();
        assert_eq!(
            endpoint_url(&target, "/auth/login"),
            "http://localhost:3000/api/auth/login"
        );
    }

    #[test]
    fn test_endpoint_url_tolerates_trailing_slashes() {
        let target = Url::parse("http://localhost:3000/api/").unwrap();
        assert_eq!(
            endpoint_url(&target, "/settings"),
            "http://localhost:3000/api/settings"
        );
    }
}
