use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use lightning_talk::config::{Overrides, TalkConfig};
use lightning_talk::export::{self, DumpOptions};
use lightning_talk::{deck, tui};

/// Terminal slideshow: default output next to styled output
#[derive(Debug, Parser)]
#[command(name = "lightning-talk", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Slide to open on, by index or name
    #[arg(long, value_name = "INDEX|NAME")]
    start: Option<String>,

    /// Syntax highlighting theme
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Seconds the status spinner runs
    #[arg(long, value_name = "N")]
    hold_seconds: Option<u64>,

    /// Print the slides to stdout instead of presenting them
    #[arg(long)]
    dump: bool,

    /// Dump width in columns
    #[arg(long, value_name = "W", requires = "dump")]
    width: Option<u16>,

    /// Dump height in rows
    #[arg(long, value_name = "H", requires = "dump")]
    height: Option<u16>,

    /// Dump without ANSI colors
    #[arg(long, requires = "dump")]
    no_color: bool,

    /// List slide indices and names, then exit
    #[arg(long, conflicts_with = "dump")]
    list: bool,

    /// Write logs here instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at INFO
    #[arg(short, long)]
    verbose: bool,

    /// Log at DEBUG
    #[arg(long)]
    debug: bool,
}

fn init_logging(cli: &Cli) -> Result<()> {
    // Set log level based on flags
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_ansi(false);

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    init_logging(&cli)?;

    tracing::info!("Starting lightning-talk version {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Debug logging enabled");

    let config = TalkConfig::load(cli.config.as_deref())?.with_overrides(Overrides {
        theme: cli.theme.clone(),
        hold_seconds: cli.hold_seconds,
        start: cli.start.clone(),
    })?;
    tracing::debug!("Config: {:?}", config);

    let slides = deck::build(&config)?;
    let start = match config.start.as_deref() {
        Some(selector) => deck::find(&slides, selector)?,
        None => 0,
    };

    if cli.list {
        let mut out = io::stdout().lock();
        for (index, slide) in slides.iter().enumerate() {
            writeln!(out, "{index:>2}  {}", slide.name)?;
        }
        return Ok(());
    }

    if cli.dump {
        let (columns, rows) = tui::terminal::size().unwrap_or((100, 30));
        let options = DumpOptions {
            width: cli.width.unwrap_or(columns),
            height: cli.height.unwrap_or(rows),
            color: !cli.no_color,
        };
        export::dump(&slides, start, options, &mut io::stdout().lock())
            .wrap_err("Failed to write slides")?;
        return Ok(());
    }

    tui::run(slides, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dump_flags_require_dump() {
        assert!(Cli::try_parse_from(["lightning-talk", "--width", "80"]).is_err());
        let cli = Cli::try_parse_from(["lightning-talk", "--dump", "--width", "80", "--no-color"])
            .expect("parse");
        assert_eq!(cli.width, Some(80));
        assert!(cli.no_color);
    }
}
