//! Command line plumbing shared by both binaries: output destination and logging.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Args;
use color_eyre::eyre::WrapErr;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Write the formula to this file instead of the standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log debug information on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors on stderr.
    #[arg(short, long)]
    pub quiet: bool,
}

impl OutputArgs {
    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }

    /// Logs on stderr, keeping stdout for the formula.
    pub fn init_logger(&self) -> color_eyre::Result<()> {
        TermLogger::init(
            self.level(),
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
        Ok(())
    }

    /// The `--output` file if given, the standard output otherwise.
    pub fn writer(&self) -> color_eyre::Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).wrap_err_with(|| format!("failed to create {}", path.display()))?,
            )),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }
}

/// The last component of `path`, as shown in the generated comments.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
