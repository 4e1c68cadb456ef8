use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Write};

use aurrpkgs::cli::Args;
use aurrpkgs::logging;
use aurrpkgs::reporter::Reporter;
use aurrpkgs_core::StatusRenderer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut stdout = std::io::stdout();
    let show_colors = !args.no_color && stdout.is_terminal();
    if !show_colors {
        colored::control::set_override(false);
    }

    let reporter = Reporter::new(&args.client_config(), StatusRenderer::new(show_colors))
        .outdated_only(args.outdated_only);

    let with_headers = args.usernames.len() > 1;
    let mut failures = Vec::new();

    for username in &args.usernames {
        if with_headers {
            writeln!(stdout, "{} {}", "==>".cyan().bold(), username.bold())?;
        }

        let progress = progress_bar();
        let result = reporter.report_user(username, &mut stdout, &progress).await;
        progress.finish_and_clear();

        if let Err(e) = result {
            failures.push(e);
        }
    }

    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        count => {
            for failure in &failures {
                eprintln!("{} {failure:#}", "error:".red().bold());
            }
            anyhow::bail!("{count} AUR lookups failed")
        }
    }
}

/// Progress on stderr; indicatif hides it when stderr is not a terminal
fn progress_bar() -> ProgressBar {
    let progress_bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress_bar.set_style(style.progress_chars("#>-"));
    }
    progress_bar
}
