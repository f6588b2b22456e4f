mod logging;

use std::io::IsTerminal as _;
use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use verdant_errors::{Renderer, Severity};
use verdant_parse::{DEFAULT_MAX_DEPTH, ParseOptions};
use verdant_yellow::SyntaxTree;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about)]
enum Options {
    /// Report the diagnostics of a settings file.
    Check {
        path: Utf8PathBuf,
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Print the syntax tree of a settings file.
    Tree {
        path: Utf8PathBuf,
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    logging::setup_logging();

    match Options::parse() {
        Options::Check { path, max_depth } => {
            let tree = parse_file(&path, max_depth)?;
            let renderer = if std::io::stderr().is_terminal() {
                Renderer::styled()
            } else {
                Renderer::plain()
            };

            for diagnostic in tree.diagnostics() {
                eprintln!("{}", diagnostic.render(&renderer, path.as_str(), tree.text()));
            }

            let errors =
                tree.diagnostics().iter().filter(|d| d.severity() == Severity::Error).count();
            tracing::info!(%path, diagnostics = tree.diagnostics().len(), errors, "checked");
            Ok(if errors == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Options::Tree { path, max_depth } => {
            let tree = parse_file(&path, max_depth)?;
            print!("{}", tree.root().debug_dump());
            for diagnostic in tree.diagnostics() {
                eprintln!("{diagnostic}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse_file(path: &Utf8Path, max_depth: usize) -> anyhow::Result<SyntaxTree> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    let options = ParseOptions::new(max_depth)?;
    Ok(verdant_parse::parse_with_options(&text, &options))
}
