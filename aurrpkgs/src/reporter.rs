use crate::aur::AurClient;
use crate::config::ClientConfig;
use crate::error::CheckError;
use crate::upstream::UpstreamClient;
use anyhow::{Context, Result};
use aurrpkgs_core::{Package, PackageReport, PackageStatus, StatusRenderer, UpdateResolver};
use indicatif::ProgressBar;
use std::io::Write;
use tracing::{debug, info};

/// Counts for one maintainer's run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserSummary {
    pub checked: usize,
    pub outdated: usize,
    pub failed: usize,
}

/// Checks a maintainer's packages one by one and prints a line for each
pub struct Reporter {
    aur: AurClient,
    upstream: UpstreamClient,
    resolver: UpdateResolver,
    renderer: StatusRenderer,
    outdated_only: bool,
}

impl Reporter {
    pub fn new(config: &ClientConfig, renderer: StatusRenderer) -> Self {
        Self {
            aur: AurClient::new(config),
            upstream: UpstreamClient::new(config),
            resolver: UpdateResolver::new(),
            renderer,
            outdated_only: false,
        }
    }

    /// Skip lines for packages that are up to date
    pub fn outdated_only(mut self, outdated_only: bool) -> Self {
        self.outdated_only = outdated_only;
        self
    }

    /// Check a single package. Failures become a `Failed` status.
    pub async fn check_package(&self, package: &Package) -> PackageReport {
        let status = match self.evaluate(package).await {
            Ok(status) => status,
            Err(e) => {
                debug!(package = %package.name, error = %e, "package check failed");
                PackageStatus::Failed(e.to_string())
            }
        };

        PackageReport::new(&package.name, status)
    }

    async fn evaluate(&self, package: &Package) -> Result<PackageStatus, CheckError> {
        let url = package.url.as_deref().ok_or(CheckError::MissingUrl)?;
        let release = self.upstream.latest_release(url).await?;
        let status = self.resolver.resolve(package, &release)?;

        if let PackageStatus::Outdated {
            aur,
            upstream,
            source,
        } = &status
        {
            debug!(
                package = %package.name,
                %source,
                aur = %aur.normalized(),
                upstream = %upstream.normalized(),
                "newer upstream release"
            );
        }

        Ok(status)
    }

    /// Look up `username` in the AUR and write one line per R package to
    /// `out`, in AUR order.
    ///
    /// Only the AUR lookup can fail; package failures are written as
    /// `error:` lines.
    pub async fn report_user<W: Write>(
        &self,
        username: &str,
        out: &mut W,
        progress: &ProgressBar,
    ) -> Result<UserSummary> {
        let packages = self
            .aur
            .r_packages(username)
            .await
            .with_context(|| format!("Failed to list AUR packages of user '{username}'"))?;

        progress.set_length(packages.len() as u64);
        let mut summary = UserSummary::default();

        for package in &packages {
            progress.set_message(package.name.clone());
            let report = self.check_package(package).await;

            summary.checked += 1;
            if report.status.is_outdated() {
                summary.outdated += 1;
            } else if report.status.is_failed() {
                summary.failed += 1;
            }

            if !(self.outdated_only && matches!(report.status, PackageStatus::UpToDate { .. })) {
                let line = self.renderer.format_line(&report);
                progress
                    .suspend(|| writeln!(out, "{line}"))
                    .context("Failed to write report line")?;
            }
            progress.inc(1);
        }

        info!(
            username,
            checked = summary.checked,
            outdated = summary.outdated,
            failed = summary.failed,
            "finished user"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use aurrpkgs_core::SourceKind;

    fn cran_page(name: &str, version: &str) -> String {
        format!(
            "<table summary=\"Package {name} summary\">\n\
             <tr>\n<td>Version:</td>\n<td>{version}</td>\n</tr>\n</table>"
        )
    }

    async fn mount_cran(server: &MockServer, name: &str, version: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/package={name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(cran_page(name, version)))
            .mount(server)
            .await;
    }

    async fn mount_aur(server: &MockServer, username: &str, results: serde_json::Value) {
        let count = results.as_array().map_or(0, Vec::len);
        Mock::given(method("GET"))
            .and(path("/rpc/"))
            .and(query_param("arg", username))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": 5,
                "type": "search",
                "resultcount": count,
                "results": results
            })))
            .mount(server)
            .await;
    }

    fn reporter_for(server: &MockServer) -> Reporter {
        let mut config = ClientConfig {
            aur_url: format!("{}/rpc/", server.uri()),
            ..ClientConfig::default()
        };
        config
            .mirrors
            .insert(SourceKind::Cran, Url::parse(&server.uri()).unwrap());
        // Bioconductor pages are "unreachable" in these tests
        config.mirrors.insert(
            SourceKind::Bioconductor,
            Url::parse("http://127.0.0.1:1").unwrap(),
        );
        Reporter::new(&config, StatusRenderer::new(false))
    }

    async fn run(reporter: &Reporter, username: &str) -> (Result<UserSummary>, String) {
        let mut out = Vec::new();
        let result = reporter
            .report_user(username, &mut out, &ProgressBar::hidden())
            .await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_outdated_and_up_to_date() {
        let server = MockServer::start().await;
        mount_aur(
            &server,
            "someone",
            json!([
                {"Name": "r-foo", "Version": "1.2-1", "URL": "https://cran.r-project.org/package=foo"},
                {"Name": "r-bar", "Version": "1.3-1", "URL": "https://cran.r-project.org/package=bar"}
            ]),
        )
        .await;
        mount_cran(&server, "foo", "1.3").await;
        mount_cran(&server, "bar", "1.3").await;

        let (result, output) = run(&reporter_for(&server), "someone").await;

        assert_eq!(
            output,
            "r-foo: outdated: aur=1.2-1 upstream=1.3\nr-bar: up to date (v1.3)\n"
        );
        assert_eq!(
            result.unwrap(),
            UserSummary {
                checked: 2,
                outdated: 1,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_one_unreachable_upstream_of_three() {
        let server = MockServer::start().await;
        mount_aur(
            &server,
            "someone",
            json!([
                {"Name": "r-foo", "Version": "1.3-1", "URL": "https://cran.r-project.org/package=foo"},
                {"Name": "r-limma", "Version": "3.58.0-1", "URL": "https://bioconductor.org/packages/limma"},
                {"Name": "r-bar", "Version": "0.9-1", "URL": "https://cran.r-project.org/package=bar"}
            ]),
        )
        .await;
        mount_cran(&server, "foo", "1.3").await;
        mount_cran(&server, "bar", "1.0").await;

        let (result, output) = run(&reporter_for(&server), "someone").await;
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "r-foo: up to date (v1.3)");
        assert!(lines[1].starts_with("r-limma: error: upstream unreachable"));
        assert_eq!(lines[2], "r-bar: outdated: aur=0.9-1 upstream=1.0");
        assert_eq!(result.unwrap().failed, 1);
    }

    #[tokio::test]
    async fn test_per_package_errors_do_not_abort() {
        let server = MockServer::start().await;
        mount_aur(
            &server,
            "someone",
            json!([
                {"Name": "r-nourl", "Version": "1.0-1", "URL": null},
                {"Name": "r-gh", "Version": "1.0-1", "URL": "https://github.com/x/gh"},
                {"Name": "r-badver", "Version": "1.0-1", "URL": "https://cran.r-project.org/package=badver"},
                {"Name": "r-ok", "Version": "2.0-1", "URL": "https://cran.r-project.org/package=ok"}
            ]),
        )
        .await;
        mount_cran(&server, "badver", "--").await;
        mount_cran(&server, "ok", "2.0").await;

        let (result, output) = run(&reporter_for(&server), "someone").await;

        assert_eq!(
            output,
            "r-nourl: error: no upstream URL declared\n\
             r-gh: error: upstream repository github.com is not supported\n\
             r-badver: error: malformed version '--'\n\
             r-ok: up to date (v2.0)\n"
        );
        assert_eq!(result.unwrap().failed, 3);
    }

    #[tokio::test]
    async fn test_outdated_only_hides_up_to_date() {
        let server = MockServer::start().await;
        mount_aur(
            &server,
            "someone",
            json!([
                {"Name": "r-foo", "Version": "1.2-1", "URL": "https://cran.r-project.org/package=foo"},
                {"Name": "r-bar", "Version": "1.3-1", "URL": "https://cran.r-project.org/package=bar"}
            ]),
        )
        .await;
        mount_cran(&server, "foo", "1.3").await;
        mount_cran(&server, "bar", "1.3").await;

        let reporter = reporter_for(&server).outdated_only(true);
        let (_, output) = run(&reporter, "someone").await;

        assert_eq!(output, "r-foo: outdated: aur=1.2-1 upstream=1.3\n");
    }

    #[tokio::test]
    async fn test_no_r_packages_prints_nothing() {
        let server = MockServer::start().await;
        mount_aur(
            &server,
            "someone",
            json!([
                {"Name": "python-foo", "Version": "1.0-1", "URL": "https://pypi.org/project/foo"}
            ]),
        )
        .await;

        let (result, output) = run(&reporter_for(&server), "someone").await;

        assert!(output.is_empty());
        assert_eq!(result.unwrap(), UserSummary::default());
    }

    #[tokio::test]
    async fn test_aur_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rpc/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (result, output) = run(&reporter_for(&server), "someone").await;

        assert!(output.is_empty());
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("AUR server returned 500"));
    }
}
