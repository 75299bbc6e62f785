mod cli;
mod error;

use clap::Parser;
use exn::{OptionExt, ResultExt};
use nxlib_config::Config;
use nxlib_library::{FileDescriptor, TitleSummary, identify_file, scan, summarize};
use nxlib_sync::TitleDbMirror;
use nxlib_titledb::models::{GameInfo, TitleId, VersionRelease};
use nxlib_titledb::{TitleDb, latest_version};
use serde::Serialize;
use std::io::{Write, stdout};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};

fn init_tracing(verbose: u8, quiet: u8) {
    let level = match (1 + verbose).saturating_sub(quiet) {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    // The exn debug output is the full error tree, with locations.
    run(cli).map_err(|err| miette::miette!("{err:?}"))
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    match cli.command {
        Command::Scan { path, json } => {
            let db = load_titledb(&config)?;
            let root = path.or(config.library.path.clone()).ok_or_raise(|| ErrorKind::NoLibraryPath)?;
            let result = scan(&db, &root, config.library.extensions.as_slice()).or_raise(|| ErrorKind::Scan)?;
            let summaries = summarize(&db, &result.identified);
            if json {
                print_json(&summaries)?;
            } else {
                print_lines(summaries.iter().map(summary_line))?;
                if !result.skipped.is_empty() {
                    print_lines(result.skipped.iter().map(|path| format!("skipped: {}", path.display())))?;
                }
            }
        },
        Command::Identify { files, json } => {
            let db = load_titledb(&config)?;
            let descriptors: Vec<_> = files.iter().filter_map(|file| identify_file(&db, file)).collect();
            if json {
                print_json(&descriptors)?;
            } else {
                print_lines(descriptors.iter().map(descriptor_line))?;
            }
        },
        Command::Info { title_id, json } => {
            let title_id = title_id.parse::<TitleId>().or_raise(|| ErrorKind::InvalidTitleId(title_id.clone()))?;
            let db = load_titledb(&config)?;
            let info = db.game_info(&title_id);
            let versions = db.versions(&title_id).unwrap_or_default();
            if json {
                print_json(&serde_json::json!({ "info": info, "versions": versions }))?;
            } else {
                print_lines(info_lines(&title_id, info.as_ref(), &versions))?;
            }
        },
        Command::Update => {
            let mirror = TitleDbMirror::new(&config.titledb.path, &config.titledb.url).or_raise(|| ErrorKind::Sync)?;
            mirror
                .sync(config.titledb.files.as_slice(), &config.library.region, &config.library.language)
                .or_raise(|| ErrorKind::Sync)?;
            let db = load_titledb(&config)?;
            print_lines([format!(
                "titledb: {} applications, {} titles, {} version histories",
                db.application_count(),
                db.title_count(),
                db.version_history_count()
            )])?;
        },
    }
    Ok(())
}

fn load_titledb(config: &Config) -> Result<TitleDb> {
    TitleDb::load(&config.titledb.path, &config.library.region, &config.library.language)
        .or_raise(|| ErrorKind::TitleDb)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut out = stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).or_raise(|| ErrorKind::Output)?;
    writeln!(out).or_raise(|| ErrorKind::Output)
}

fn print_lines(lines: impl IntoIterator<Item = String>) -> Result<()> {
    let mut out = stdout().lock();
    for line in lines {
        writeln!(out, "{line}").or_raise(|| ErrorKind::Output)?;
    }
    Ok(())
}

/// `v131072 (2)`: raw version, then the version users see.
fn format_version(version: u64) -> String {
    format!("v{version} ({})", nxlib_titledb::models::human_version(version))
}

fn summary_line(summary: &TitleSummary) -> String {
    let status = match (summary.is_up_to_date(), summary.latest_version) {
        (Some(true), _) => "up to date".to_string(),
        (Some(false), Some(latest)) => format!("update available: {}", format_version(latest)),
        (_, None) => "no version history".to_string(),
        (_, Some(_)) => "no base game or update owned".to_string(),
    };
    format!(
        "{}  {}  base:{} patches:{} dlc:{}  {}",
        summary.title_id,
        summary.name(),
        summary.base.len(),
        summary.patches.len(),
        summary.dlc.len(),
        status
    )
}

fn descriptor_line(descriptor: &FileDescriptor) -> String {
    let version = descriptor.version.map(format_version).unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {} {:<5} {}  {}",
        descriptor.title_id, descriptor.app_id, descriptor.content_type, version, descriptor.filename
    )
}

fn info_lines(title_id: &TitleId, info: Option<&GameInfo>, versions: &[VersionRelease]) -> Vec<String> {
    let name = info.map(GameInfo::display_name).unwrap_or(title_id.as_str());
    let mut lines = vec![format!("{title_id}  {name}")];
    if let Some(info) = info
        && !info.category.is_empty()
    {
        lines.push(format!("category: {}", info.category.join(", ")));
    }
    lines.extend(versions.iter().map(release_line));
    if let Ok(latest) = latest_version(versions) {
        lines.push(format!("latest: {}", format_version(latest)));
    }
    lines
}

fn release_line(release: &VersionRelease) -> String {
    format!("{}  {}", format_version(release.version), release.release_date)
}
