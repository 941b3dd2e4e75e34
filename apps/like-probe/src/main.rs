//! like-probe - observe how SeaORM translates substring and equality filters.
//!
//! Connects to the configured database, applies the blog/article migration,
//! seeds one blog with one article, then runs each query probe and prints
//! whether the captured SQL used the expected predicate.

mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use blogs::BlogsService;
use blogs::infra::storage::db::connect;
use blogs::infra::storage::migrations::Migrator;
use blogs::infra::storage::sea_orm_repo::SeaOrmBlogsRepository;
use blogs::probes::{default_probes, run_probes};
use clap::Parser;
use sea_orm_migration::MigratorTrait;
use sql_capture::{CaptureContext, TraceFile};
use tracing::{info, warn};

use crate::config::{AppConfig, CliOverrides};

/// Seeds a blog/articles schema and reports which SQL predicates SeaORM emits
#[derive(Parser)]
#[command(name = "like-probe")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database connection URL (overrides config)
    #[arg(long)]
    database_url: Option<String>,

    /// Search term used by every probe (overrides config)
    #[arg(long)]
    search: Option<String>,

    /// File receiving the captured SQL trace (overrides config)
    #[arg(long)]
    trace_file: Option<PathBuf>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        bail!("config file does not exist: {}", path.display());
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        database_url: cli.database_url,
        search: cli.search,
        trace_file: cli.trace_file,
    });

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let trace = config
        .capture
        .trace_file
        .as_ref()
        .map(TraceFile::open)
        .transpose()
        .context("opening SQL trace file")?
        .map(Arc::new);

    logging::init(&config.logging, cli.verbose, trace.clone())?;

    run(&config, trace).await
}

async fn run(config: &AppConfig, trace: Option<Arc<TraceFile>>) -> Result<()> {
    let db = connect(&config.database, trace.clone())
        .await
        .context("connecting to database")?;
    Migrator::up(&db, None).await.context("applying migrations")?;

    let service = BlogsService::new(SeaOrmBlogsRepository::new(db.clone()));
    let seeded = service.seed(&config.seed).await?;
    info!(
        blog_id = %seeded.blog.id,
        article_id = %seeded.article.id,
        blog_created = seeded.blog_created,
        article_created = seeded.article_created,
        "seed data ready"
    );

    // seeding ran outside any capture scope
    sql_capture::reset();

    let probes = default_probes();
    let report = CaptureContext::new()
        .scope(run_probes(&db, &probes, &config.probes.search))
        .await?;

    for outcome in &report.outcomes {
        info!(
            probe = outcome.name,
            observed = %outcome.observed,
            rows = outcome.rows.len(),
            "probe finished"
        );
        println!("{}", outcome.summary());
    }

    if let Some(trace) = trace
        && trace.failed_writes() > 0
    {
        warn!(
            path = %trace.path().display(),
            failed = trace.failed_writes(),
            "some SQL trace entries could not be written"
        );
    }

    Ok(())
}
