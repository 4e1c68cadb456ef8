use crate::types::{PackageReport, PackageStatus};
use colored::Colorize;

/// Renders one `<package>: <status>` line per checked package
pub struct StatusRenderer {
    show_colors: bool,
}

impl StatusRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    /// Full report line, without trailing newline
    pub fn format_line(&self, report: &PackageReport) -> String {
        format!("{}: {}", report.name, self.format_status(&report.status))
    }

    /// Format the status part with optional colors
    pub fn format_status(&self, status: &PackageStatus) -> String {
        match status {
            PackageStatus::UpToDate { upstream } => {
                let label = self.paint("up to date", Paint::Ok);
                format!("{label} (v{upstream})")
            }
            PackageStatus::Outdated { aur, upstream, .. } => {
                let label = self.paint("outdated", Paint::Outdated);
                let aur = self.paint(&aur.to_string(), Paint::Old);
                let upstream = self.paint(&upstream.to_string(), Paint::New);
                format!("{label}: aur={aur} upstream={upstream}")
            }
            PackageStatus::Failed(reason) => {
                let label = self.paint("error", Paint::Error);
                format!("{label}: {reason}")
            }
        }
    }

    fn paint(&self, text: &str, paint: Paint) -> String {
        if !self.show_colors {
            return text.to_string();
        }

        match paint {
            Paint::Ok | Paint::New => text.green().to_string(),
            Paint::Outdated => text.yellow().bold().to_string(),
            Paint::Old => text.red().to_string(),
            Paint::Error => text.red().bold().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Paint {
    Ok,
    Outdated,
    Old,
    New,
    Error,
}
