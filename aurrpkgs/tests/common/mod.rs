#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address nothing listens on, for "unreachable" scenarios
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// One AUR search result entry
pub fn aur_package(name: &str, version: &str, url: Option<&str>) -> Value {
    json!({
        "Name": name,
        "PackageBase": name,
        "Version": version,
        "URL": url,
        "Maintainer": "someone",
        "NumVotes": 3,
        "OutOfDate": null
    })
}

/// AUR RPC v5 search response
pub fn aur_search_body(results: &[Value]) -> Value {
    json!({
        "version": 5,
        "type": "search",
        "resultcount": results.len(),
        "results": results
    })
}

/// Minimal CRAN package page
pub fn cran_page(name: &str, version: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<body>\n<h2>{name}: Sample Package</h2>\n\
         <table summary=\"Package {name} summary\">\n\
         <tr>\n<td>Version:</td>\n<td>{version}</td>\n</tr>\n\
         <tr>\n<td>Published:</td>\n<td>2024-01-01</td>\n</tr>\n\
         </table>\n</body>\n</html>\n"
    )
}

/// Minimal Bioconductor package page
pub fn bioc_page(version: &str) -> String {
    format!(
        "<html><body>\n<table class=\"details\">\n\
         <tr class=\"row_odd\">\n    <td>Version</td>\n    <td>{version}</td>\n</tr>\n\
         </table>\n</body></html>\n"
    )
}

/// Serve `results` as the packages of `username`
pub async fn mount_user(server: &MockServer, username: &str, results: &[Value]) {
    Mock::given(method("GET"))
        .and(path("/rpc/"))
        .and(query_param("by", "maintainer"))
        .and(query_param("arg", username))
        .respond_with(ResponseTemplate::new(200).set_body_json(aur_search_body(results)))
        .mount(server)
        .await;
}

/// Serve a CRAN page at `/package=<name>`
pub async fn mount_cran(server: &MockServer, name: &str, version: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/package={name}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(cran_page(name, version)))
        .mount(server)
        .await;
}

/// Serve a Bioconductor page at `/packages/<name>`
pub async fn mount_bioc(server: &MockServer, name: &str, version: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/packages/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(bioc_page(version)))
        .mount(server)
        .await;
}

/// The binary pointed at `server` for the AUR and both upstream sources
pub fn aurrpkgs(server: &MockServer) -> Command {
    aurrpkgs_with_bioc(server, &server.uri())
}

/// Like [`aurrpkgs`], but Bioconductor pages come from `bioc_mirror`
pub fn aurrpkgs_with_bioc(server: &MockServer, bioc_mirror: &str) -> Command {
    let mut cmd = Command::cargo_bin("aurrpkgs").expect("binary is built");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--aur-url")
        .arg(format!("{}/rpc/", server.uri()))
        .arg("--cran-mirror")
        .arg(server.uri())
        .arg("--bioc-mirror")
        .arg(bioc_mirror);
    cmd
}
