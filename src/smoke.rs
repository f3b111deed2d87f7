//! The smoke test flow: log in, upload the branding settings together
//! with a logo file, and read the settings resource back to verify the
//! update went through. Four sequential requests over one blocking
//! client.

use std::time::Duration;

use anyhow::{Context, Result};
use log::error;
use reqwest::blocking::{Client, multipart};

use crate::{
    asset, authentication::Credentials, configuration::Configuration, header, response::Envelope,
};

/// The branding fields submitted to the settings endpoint.
pub const SETTINGS_FIELDS: [(&str, &str); 5] = [
    ("schoolName", "Test School - Updated"),
    ("schoolCode", "TEST001"),
    ("contactEmail", "contact@school.edu"),
    ("contactPhone", "+84912345678"),
    ("address", "Test Address Street, City"),
];

/// Runs the smoke test end to end.
///
/// Only a failed login (or broken setup) yields an `Err`; failures in the
/// update and verification steps are reported on stdout and leave the
/// process exit status at zero.
pub fn run(config: &Configuration) -> Result<()> {
    let client = build_http_client(config)?;

    println!("=== Step 1: Login ===");
    let credentials = Credentials::load(config.authentication.as_deref())?;
    let token = credentials.login(&client, &config.target)?;
    println!("Token: {}...", preview(&token));

    println!("\n=== Step 2: Creating test image ===");
    println!(
        "Using embedded test PNG ({} bytes)",
        asset::TEST_LOGO_PNG.len()
    );

    println!("\n=== Step 3: Upload settings with logo ===");
    if let Err(error) = update_settings(&client, config, &token) {
        error!("Settings update could not be performed: {error:#}");
    }

    println!("\n=== Step 4: Verify settings ===");
    if let Err(error) = verify_settings(&client, config) {
        error!("Settings verification could not be performed: {error:#}");
    }

    Ok(())
}

/// Builds the blocking HTTP client shared by all requests.
fn build_http_client(config: &Configuration) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(config.request_timeout))
        .default_headers(header::get_default_headers(config)?)
        .build()
        .context("Could not build the HTTP client")
}

/// Sends the authenticated multipart PATCH with the settings fields and
/// the logo file, and prints the status and full response body.
fn update_settings(client: &Client, config: &Configuration, token: &str) -> Result<()> {
    let mut form = multipart::Form::new();
    for (name, value) in SETTINGS_FIELDS {
        form = form.text(name, value);
    }
    let logo = multipart::Part::bytes(asset::TEST_LOGO_PNG.to_vec())
        .file_name(asset::TEST_LOGO_FILENAME)
        .mime_str(asset::TEST_LOGO_MIME)
        .context("The logo MIME type is invalid")?;
    form = form.part("logo", logo);

    let response = client
        .patch(crate::endpoint_url(&config.target, "/settings"))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .context("Could not reach the settings endpoint")?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .context("Update response is not valid JSON")?;
    println!("Status: {}", status.as_u16());
    println!("Response: {}", serde_json::to_string_pretty(&body)?);

    let envelope: Envelope =
        serde_json::from_value(body).context("Update response is not a valid envelope")?;
    if status == reqwest::StatusCode::OK {
        println!("Settings updated successfully");
        if let Some(logo_url) = envelope.data_str("logoUrl") {
            println!("Logo URL: {logo_url}");
        }
    } else {
        println!("Settings update failed");
        if let Some(debug) = envelope.debug_text() {
            println!("Debug info: {debug}");
        }
    }
    Ok(())
}

/// Reads the settings resource back without authentication and prints the
/// fields the update should have changed.
fn verify_settings(client: &Client, config: &Configuration) -> Result<()> {
    let response = client
        .get(crate::endpoint_url(&config.target, "/settings"))
        .send()
        .context("Could not reach the settings endpoint")?;

    println!("Status: {}", response.status().as_u16());
    let envelope: Envelope = response
        .json()
        .context("Settings response is not a valid JSON envelope")?;

    if envelope.success {
        println!(
            "School Name: {}",
            envelope.data_str("schoolName").unwrap_or("<unset>")
        );
        println!(
            "Logo URL: {}",
            envelope.data_str("logoUrl").unwrap_or("<unset>")
        );
    } else {
        println!("Error: {}", envelope.message_text());
    }
    Ok(())
}

/// The token is a credential, so only a short prefix is ever printed.
fn preview(token: &str) -> &str {
    match token.char_indices().nth(20) {
        Some((index, _)) => &token[..index],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use url::Url;

    use super::{SETTINGS_FIELDS, preview, run};
    use crate::configuration::{Configuration, OutputFormat};

    fn test_configuration(server: &mockito::Server) -> Configuration {
        Configuration {
            target: Url::parse(&server.url()).unwrap(),
            authentication: None,
            header: None,
            request_timeout: 5000,
            output_format: OutputFormat::HumanReadable,
            log_level: log::LevelFilter::Off,
        }
    }

    fn login_mock(server: &mut mockito::Server) -> mockito::Mock {
        server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "success": true,
                    "data": { "accessToken": "smoke-token-123" },
                })
                .to_string(),
            )
            .create()
    }

    #[test]
    fn test_full_flow_performs_all_requests() {
        let mut server = mockito::Server::new();
        let login = login_mock(&mut server);
        let update = server
            .mock("PATCH", "/settings")
            .match_header("authorization", "Bearer smoke-token-123")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "success": true,
                    "data": { "logoUrl": "/uploads/test-logo.png" },
                })
                .to_string(),
            )
            .create();
        let verify = server
            .mock("GET", "/settings")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "success": true,
                    "data": {
                        "schoolName": SETTINGS_FIELDS[0].1,
                        "logoUrl": "/uploads/test-logo.png",
                    },
                })
                .to_string(),
            )
            .create();

        run(&test_configuration(&server)).unwrap();

        login.assert();
        update.assert();
        verify.assert();
    }

    #[test]
    fn test_failed_login_stops_the_flow() {
        let mut server = mockito::Server::new();
        let login = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(
                serde_json::json!({
                    "success": false,
                    "message": "Invalid email or password",
                })
                .to_string(),
            )
            .create();
        let update = server.mock("PATCH", "/settings").expect(0).create();
        let verify = server.mock("GET", "/settings").expect(0).create();

        let error = run(&test_configuration(&server)).unwrap_err();
        assert!(error.to_string().contains("Invalid email or password"));

        login.assert();
        update.assert();
        verify.assert();
    }

    #[test]
    fn test_failed_update_is_reported_but_not_fatal() {
        let mut server = mockito::Server::new();
        login_mock(&mut server);
        let update = server
            .mock("PATCH", "/settings")
            .with_status(500)
            .with_body(
                serde_json::json!({
                    "success": false,
                    "message": "upload failed",
                    "debug": "multer rejected the file",
                })
                .to_string(),
            )
            .create();
        let verify = server
            .mock("GET", "/settings")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "success": false,
                    "message": "Settings not found",
                })
                .to_string(),
            )
            .create();

        // The update and verification failures only produce diagnostics.
        run(&test_configuration(&server)).unwrap();

        update.assert();
        verify.assert();
    }

    #[test]
    fn test_unreachable_settings_endpoint_is_not_fatal() {
        let mut server = mockito::Server::new();
        login_mock(&mut server);
        // No settings mocks: mockito answers 501 with a plain text body,
        // which fails JSON parsing inside the update and verify steps.
        run(&test_configuration(&server)).unwrap();
    }

    #[test]
    fn test_preview_truncates_long_tokens() {
        assert_eq!(preview("short"), "short");
        let token = "x".repeat(64);
        assert_eq!(preview(&token), "x".repeat(20));
    }
}
