use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use publist_core::config_file::{self, ConfigFile};
use publist_core::SourceFormat;
use publist_ingest::Pipeline;
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// Publication list generator - turn CSV or RIS citation exports into HTML
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of .publist.toml / the platform config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a CSV citation export (default: docs/citations.csv)
    Csv(RunArgs),

    /// Render a RIS citation export (default: docs/citations.ris)
    Ris(RunArgs),

    /// Render any supported file, picking the format from --format or the extension
    Build {
        #[command(flatten)]
        args: RunArgs,

        /// Input format: csv or ris
        #[arg(long)]
        format: Option<SourceFormat>,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Path to the citation export
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to write the HTML fragment to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse and summarise without writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Maximum authors before "et al." (0 = no limit)
    #[arg(long)]
    max_authors: Option<usize>,

    /// Escape HTML special characters in field text
    #[arg(long)]
    escape_html: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config_file::load_strict(path)?,
        None => config_file::load_config(),
    };
    tracing::debug!(?config, "loaded config");

    let (format, args) = match cli.command {
        Command::Csv(args) => (SourceFormat::Csv, args),
        Command::Ris(args) => (SourceFormat::Ris, args),
        Command::Build { args, format } => {
            let format = match (format, &args.input) {
                (Some(f), _) => f,
                (None, Some(input)) => publist_ingest::detect_format(input)?,
                (None, None) => anyhow::bail!("build needs --input or --format"),
            };
            (format, args)
        }
    };

    let pipeline = resolve_pipeline(format, &args, &config);
    let (groups, summary) = pipeline
        .run()
        .with_context(|| format!("failed to render {}", pipeline.input.display()))?;

    let color = ColorMode(!args.no_color && std::io::stdout().is_terminal());
    let mut stdout = std::io::stdout().lock();
    if pipeline.dry_run {
        output::print_dry_run(&mut stdout, &summary, &groups, color)?;
    } else {
        output::print_summary(&mut stdout, &summary, color)?;
    }
    Ok(())
}

/// Log to stderr so stdout carries only the summary. Filter with `PUBLIST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("PUBLIST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve settings: CLI flags > config file > built-in defaults.
fn resolve_pipeline(format: SourceFormat, args: &RunArgs, config: &ConfigFile) -> Pipeline {
    let mut pipeline = Pipeline::for_format(format);

    let paths = match format {
        SourceFormat::Csv => config.csv.as_ref(),
        SourceFormat::Ris => config.ris.as_ref(),
    };
    if let Some(paths) = paths {
        if let Some(input) = &paths.input {
            pipeline.input = PathBuf::from(input);
        }
        if let Some(output) = &paths.output {
            pipeline.output = PathBuf::from(output);
        }
    }
    if let Some(render) = &config.render {
        if let Some(max) = render.max_authors {
            pipeline.style.max_authors = max;
        }
        if let Some(escape) = render.escape_html {
            pipeline.style.escape_html = escape;
        }
    }

    if let Some(input) = &args.input {
        pipeline.input = input.clone();
    }
    if let Some(output) = &args.output {
        pipeline.output = output.clone();
    }
    if let Some(max) = args.max_authors {
        pipeline.style.max_authors = max;
    }
    if args.escape_html {
        pipeline.style.escape_html = true;
    }
    pipeline.dry_run = args.dry_run;

    pipeline
}
