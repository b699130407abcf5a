use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ar_model::{ProjectConfig, SketchSyntax};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "arturo", version, about = "arturo — build Arduino sketches with make")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Resolved project configuration (JSON).
    #[arg(long, global = true, default_value = "arturo.json")]
    config: PathBuf,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform Arduino sketches (.ino) into valid .cpp files.
    Preprocess {
        /// Sketch files to transform.
        #[arg(long = "sketch", num_args = 1.., required = true)]
        sketches: Vec<PathBuf>,
        /// Output directory (the configured build dir if omitted).
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Print the results to stdout instead of writing files.
        #[arg(long)]
        stdout: bool,
        /// Umbrella header to include first.
        #[arg(long)]
        header: Option<String>,
        /// Write the origin marker as a comment instead of `#line`.
        #[arg(long)]
        no_line_marker: bool,
        /// Copy nested closing braces while collapsing, like older releases.
        #[arg(long)]
        compat_brace_leak: bool,
    },
    /// Emit a list of header folders suitable for consumption by GNU make.
    SourceHeaders,
    /// Emit a list of source files suitable for consumption by GNU make.
    SourceFiles,
    /// Portable version of mkdir -p.
    Mkdirs {
        #[arg(long)]
        path: PathBuf,
    },
    /// Convert a GNU .d file into arturo dependencies.
    DToAd {
        #[arg(long)]
        dpath: PathBuf,
        #[arg(long)]
        adpath: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration, falling back to defaults when the file is absent
/// and `required` is false.
fn load_config(path: &Path, required: bool) -> Result<ProjectConfig> {
    if !required && !path.exists() {
        debug!(config = %path.display(), "no configuration file, using defaults");
        return Ok(ProjectConfig::default());
    }
    ProjectConfig::load(path)
}

/// Command-line flags layered over the configured sketch options.
fn sketch_syntax(
    config: &ProjectConfig,
    header: Option<String>,
    no_line_marker: bool,
    compat_brace_leak: bool,
) -> SketchSyntax {
    let mut syntax = config.sketch.clone();
    if let Some(header) = header {
        syntax.umbrella_header = header;
    }
    if no_line_marker {
        syntax.line_marker = false;
    }
    if compat_brace_leak {
        syntax.compat_brace_leak = true;
    }
    syntax
}

fn resolve_output_dir(output_dir: Option<PathBuf>, config: &ProjectConfig) -> PathBuf {
    output_dir.unwrap_or_else(|| config.build_dir.clone())
}

/// Write each sketch's translation unit to `out` instead of a file.
fn write_translations(sketches: &[PathBuf], syntax: &SketchSyntax, out: &mut impl Write) -> Result<()> {
    for sketch in sketches {
        let source = std::fs::read_to_string(sketch)
            .with_context(|| format!("failed to read sketch {}", sketch.display()))?;
        let output = ar_sketch::preprocess(&source, &sketch.display().to_string(), syntax);
        out.write_all(output.as_bytes())?;
    }
    Ok(())
}

fn print_lines<I, T>(lines: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    let mut out = std::io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Preprocess {
            sketches,
            output_dir,
            stdout,
            header,
            no_line_marker,
            compat_brace_leak,
        } => {
            let config = load_config(&cli.config, false)?;
            let syntax = sketch_syntax(&config, header, no_line_marker, compat_brace_leak);

            if stdout {
                write_translations(&sketches, &syntax, &mut std::io::stdout().lock())?;
            } else {
                let output_dir = resolve_output_dir(output_dir, &config);
                ar_sketch::preprocess_sketches(&sketches, &output_dir, &syntax)?;
            }
        }
        Commands::SourceHeaders => {
            let config = load_config(&cli.config, true)?;
            print_lines(ar_build::header_folders(&config)?.iter().map(|p| p.display()))?;
        }
        Commands::SourceFiles => {
            let config = load_config(&cli.config, true)?;
            print_lines(ar_build::source_files(&config)?.iter().map(|p| p.display()))?;
        }
        Commands::Mkdirs { path } => {
            ar_build::mkdirs(&path)?;
        }
        Commands::DToAd { dpath, adpath } => {
            let config = load_config(&cli.config, true)?;
            ar_build::convert_depfile(&dpath, adpath.as_deref(), &config.libraries)?;
        }
    }

    Ok(())
}
