//! Logging in to the API server. The login endpoint hands out a bearer
//! token, which is attached to the settings update request.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// The seeded test account present in every development database.
const DEFAULT_EMAIL: &str = "admin@test.com";
const DEFAULT_PASSWORD: &str = "Test@123456";

/// Login configuration to be used to acquire the bearer token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            email: DEFAULT_EMAIL.to_owned(),
            password: DEFAULT_PASSWORD.to_owned(),
        }
    }
}

/// A successful login response. The interesting part is the access token
/// inside the `data` object; `message` is only set on failures.
#[derive(Debug, Clone, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    data: Option<LoginData>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoginData {
    #[serde(rename = "accessToken", default)]
    access_token: String,
}

impl Credentials {
    /// Loads credentials from a YAML file with `email` and `password` keys,
    /// or falls back to the built-in test account.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Credentials::default()),
            Some(path) => serde_yaml::from_reader(std::fs::File::open(path).with_context(
                || format!("Error opening file given for --authentication, which is {path:?}"),
            )?)
            .with_context(|| {
                format!("Error parsing file given for --authentication, which is {path:?}")
            }),
        }
    }

    /// Uses the login configuration to attempt to log in to the server.
    /// Yields the access token on success; any non-success response from
    /// the server is an error carrying the server's `message`.
    pub fn login(&self, client: &reqwest::blocking::Client, target: &Url) -> Result<String> {
        let response: LoginResponse = client
            .post(super::endpoint_url(target, "/auth/login"))
            .json(self)
            .send()
            .context("Could not reach the login endpoint")?
            .json()
            .context("Login response is not a valid JSON envelope")?;

        if !response.success {
            bail!(
                "Login rejected by the server: {}",
                response.message.as_deref().unwrap_or("no message given")
            );
        }
        match response.data {
            Some(data) if !data.access_token.is_empty() => Ok(data.access_token),
            _ => bail!("Login response contains no access token"),
        }
    }
}
