use httpmock::prelude::*;
use std::io::{Cursor, Write};
use std::process::Command;
use tempfile::NamedTempFile;

fn locator() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pharmacy-locator"));
    command
        .env_remove("PHARMACY_GEOCODER_API_KEY")
        .env_remove("PHARMACY_SEARCH_API_KEY")
        .env_remove("PHARMACY_STATIC_MAPS_API_KEY")
        .env_remove("RUST_LOG");
    command
}

fn config_file(server: &MockServer) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let content = format!(
        r#"
[http]
timeout_seconds = 5

[geocoder]
endpoint = "{}"
api_key = "geo-key"

[search]
endpoint = "{}"
api_key = "search-key"

[static_map]
endpoint = "{}"
api_key = "map-key"
"#,
        server.url("/1.x/"),
        server.url("/v1/"),
        server.url("/static/1.x")
    );
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = locator().output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("pharmacy-locator"));
}

#[test]
fn test_no_arguments_makes_no_requests() {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });
    let config = config_file(&server);

    let output = locator()
        .args(["--config", config.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    any_request.assert_hits(0);
}

#[test]
fn test_geocoder_failure_prints_single_error_line() {
    let server = MockServer::start();
    let geocoder_mock = server.mock(|when, then| {
        when.method(GET).path("/1.x/");
        then.status(403);
    });
    let config = config_file(&server);

    let output = locator()
        .args(["--config", config.path().to_str().unwrap(), "--no-map", "Moscow,", "Red", "Square"])
        .output()
        .unwrap();

    geocoder_mock.assert();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "Source address: Moscow, Red Square\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(
        stderr,
        "Error: Geocoder request failed: service returned 403 Forbidden\n"
    );
}

#[test]
fn test_missing_keys_do_not_add_stderr_lines() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/1.x/");
        then.status(403);
    });
    let mut config = NamedTempFile::new().unwrap();
    let content = format!("[geocoder]\nendpoint = \"{}\"\n", server.url("/1.x/"));
    config.write_all(content.as_bytes()).unwrap();

    let output = locator()
        .args(["--config", config.path().to_str().unwrap(), "--no-map", "Moscow"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.starts_with("Error: "));
}

#[test]
fn test_full_run_saves_map() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/1.x/").query_param("geocode", "Moscow, Red Square");
        then.status(200).json_body(serde_json::json!({
            "response": { "GeoObjectCollection": { "featureMember": [
                { "GeoObject": { "Point": { "pos": "37.620795 55.75393" } } }
            ] } }
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/");
        then.status(200).json_body(serde_json::json!({
            "features": [ {
                "geometry": { "coordinates": [37.618, 55.7575] },
                "properties": { "CompanyMetaData": { "name": "Ригла", "address": "Москва" } }
            } ]
        }));
    });
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2))
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    server.mock(|when, then| {
        when.method(GET).path("/static/1.x");
        then.status(200).body(png.clone());
    });

    let config = config_file(&server);
    let out_dir = tempfile::TempDir::new().unwrap();
    let map_path = out_dir.path().join("map.png");

    let output = locator()
        .args([
            "--config",
            config.path().to_str().unwrap(),
            "--output",
            map_path.to_str().unwrap(),
            "Moscow, Red Square",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Name: Ригла"));
    assert!(stdout.contains("Distance to pharmacy: 0.43 km"));
    assert!(stdout.ends_with(&format!("Map saved to: {}\n", map_path.display())));
    assert!(output.stderr.is_empty());
    assert_eq!(std::fs::read(&map_path).unwrap(), png);
}
