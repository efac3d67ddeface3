//! Shared helpers for integration tests against local mock servers.
#![allow(dead_code)]

pub mod socket_guard;

use newshelf_core::Settings;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bearer token handed out by [`mount_token`].
pub const TEST_TOKEN: &str = "tk_test_123";

/// Encodes a solid-colour PNG of the given size for use as a mock cover.
pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Settings with every endpoint pointed at `server`.
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.token_url = format!("{}/token", server.uri());
    settings.catalog.url = format!("{}/new-titles", server.uri());
    settings.covers.primary_url = server.uri();
    settings.covers.secondary_url = server.uri();
    settings.link_template = "https://catalog.example/oclc/{oclc}".to_string();
    settings
}

/// A brief record as the catalog returns it.
pub fn brief_record(title: &str, oclc: &str, isbns: &[&str]) -> Value {
    json!({ "title": title, "oclcNumber": oclc, "isbns": isbns })
}

/// Token endpoint answering 200 with [`TEST_TOKEN`].
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer",
            "expires_in": 1199
        })))
        .mount(server)
        .await;
}

/// Catalog endpoint answering with `records` as `briefRecords`.
pub async fn mount_catalog(server: &MockServer, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/new-titles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numberOfRecords": records.len(),
            "briefRecords": records
        })))
        .mount(server)
        .await;
}

/// Primary lookup answering with an image for `isbn`, served from the same
/// server.
pub async fn mount_primary_cover(server: &MockServer, isbn: &str, image: Vec<u8>) {
    let image_path = format!("/images/{isbn}.png");
    Mock::given(method("GET"))
        .and(path(format!("/bookcover/{isbn}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": format!("{}{image_path}", server.uri()) })),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image))
        .mount(server)
        .await;
}
