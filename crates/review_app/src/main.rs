mod batch;
mod cli;
mod config;
mod platform;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::LevelFilter;
use review_core::Scope;
use review_engine::{default_fallback_base, prepare_base};
use review_logging::{review_info, review_warn, LogDestination};

use cli::{Cli, Command};
use config::AppConfig;
use platform::SessionConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Run);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base) = &cli.base {
        config.base_path = Some(base.clone());
    }

    // The log file lives under the base path, so the base is settled first.
    let prepared = prepare_base(
        &config.resolver(),
        &config.projects,
        &config.deliveries,
        default_fallback_base(),
    )
    .context("preparing folder structure")?;

    let level = match (cli.verbose, &command) {
        (true, _) => LevelFilter::Debug,
        (false, Command::Run) => LevelFilter::Info,
        (false, _) => LevelFilter::Warn,
    };
    // One-shot subcommands log to the console only.
    let destination = match &command {
        Command::Run => LogDestination::Both {
            log_dir: prepared.resolver.log_dir(),
        },
        _ => LogDestination::Terminal,
    };
    let log_file = review_logging::initialize(destination, level);
    review_info!("lmreview {} starting, log file {:?}", env!("CARGO_PKG_VERSION"), log_file);
    if let Some(from) = &prepared.relocated_from {
        review_warn!(
            "Base path {:?} not writable, using {:?}",
            from,
            prepared.resolver.base_path()
        );
    }

    let project = cli
        .project
        .clone()
        .unwrap_or_else(|| config.default_project().to_string());
    let delivery = cli
        .delivery
        .clone()
        .unwrap_or_else(|| config.default_delivery().to_string());
    let scope = Scope::new(project, delivery).ok_or_else(|| anyhow!("請選擇專案與交付"))?;

    match command {
        Command::Run => platform::run_app(SessionConfig {
            timings: config.timings.to_timings(),
            notebook_url: config.notebook_url.clone(),
            scope,
            prepared,
        }),
        Command::List => {
            for line in batch::list(&prepared.resolver, &scope)? {
                println!("{line}");
            }
            Ok(())
        }
        Command::Tag { file, tag } => {
            println!("{}", batch::tag(&prepared.resolver, &scope, &file, &tag)?);
            Ok(())
        }
        Command::Prompt { target } => {
            print!("{}", batch::prompt(&prepared.resolver, &scope, target.as_deref())?);
            Ok(())
        }
        Command::Export(args) => {
            let file = if args.clipboard {
                None
            } else {
                args.file.as_deref()
            };
            let path =
                batch::export_with_system(&prepared.resolver, &scope, args.target.as_deref(), file)?;
            println!("✓ Word 已輸出：{}", path.display());
            Ok(())
        }
    }
}
