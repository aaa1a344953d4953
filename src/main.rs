mod cli;

use clap::Parser;
use ezfetch::{collectors, logo, Config, Context, Theme};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_lines<I, S>(lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()
}

fn run(args: cli::Args) -> ezfetch::Result<()> {
    if args.list_logos {
        return Ok(print_lines(logo::list_logos())?);
    }
    if args.list_themes {
        return Ok(print_lines(Theme::list())?);
    }

    let mut config = Config::load(args.config.as_deref());
    args.apply_to(&mut config);
    if let Some(name) = config.get_str(&["display", "logo"]) {
        if !logo::is_known(&name) {
            warn!(logo = %name, "unknown logo, falling back to {}", logo::DEFAULT_LOGO);
        }
    }

    if args.print_config {
        return Ok(print_lines([config.to_toml_string()?.trim_end()])?);
    }

    let ctx = Context::from_config(config);
    if args.clear_cache {
        ctx.cache.clear(None);
        info!("cache cleared");
        return Ok(());
    }

    let record = collectors::collect_record(&ctx);
    if args.json {
        return Ok(print_lines([serde_json::to_string_pretty(&record)?])?);
    }

    let theme = Theme::from_config(&ctx.config, None);
    let logo = logo::from_config(&ctx.config, &ctx.host);
    let lines = ezfetch::render_record(&record, &ctx.config, &theme, logo.as_deref());
    Ok(print_lines(lines)?)
}

fn main() -> ExitCode {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        // A closed pipe (e.g. `ezfetch | head -3`) is not worth reporting
        Err(ezfetch::EzfetchError::Io(err)) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "ezfetch failed");
            ExitCode::FAILURE
        }
    }
}
