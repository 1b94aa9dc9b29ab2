// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use swiftclaw::dashboard::render;
use swiftclaw::generator::DEFAULT_DISTRIBUTION;
use swiftclaw::upload::{catalog_table, collect_files};
use swiftclaw::utils::logging::{
    format_error, format_info, format_step, format_success, format_summary_line, format_warning,
};
use swiftclaw::{
    CatalogListing, Config, CsvExporter, Dashboard, DashboardFilter, DocumentType, JsonExporter,
    Language, Priority, ProgressTracker, SampleGenerator, SqlBuilder, SqlSession, Uploader,
    warehouse,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "swiftclaw")]
#[command(author = "SE Community")]
#[command(version = "0.1.0")]
#[command(
    about = "Sample documents, stage uploads and insight dashboards for AI document processing",
    long_about = None
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the multilingual sample PDF set
    Generate {
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show pipeline health, insights, analytics and the review queue
    Dashboard {
        #[arg(long = "doc-type", value_name = "TYPE")]
        doc_types: Vec<DocumentType>,

        #[arg(long = "priority", value_name = "LEVEL")]
        priorities: Vec<Priority>,

        #[arg(long)]
        review_only: bool,

        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<NaiveDate>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<NaiveDate>,

        /// Write the review queue to a timestamped CSV in DIR
        #[arg(long, value_name = "DIR")]
        export_review: Option<PathBuf>,
    },

    /// Upload PDFs to the document stage and register them in the catalog
    Upload {
        #[arg(long = "doc-type", value_name = "TYPE")]
        doc_type: DocumentType,

        #[arg(short, long, value_name = "CODE")]
        language: Language,

        /// Print the statements instead of running them
        #[arg(long)]
        dry_run: bool,

        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// List the most recent catalog rows
    Catalog {
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Export as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Print the worksheet script that runs the AI processing steps
    PipelineScript,

    /// Check warehouse connectivity and the objects the tool reads
    Verify,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    swiftclaw::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Generate { output, seed } => {
            cmd_generate(&config, output, seed, cli.color)?;
        }
        Commands::Dashboard {
            doc_types,
            priorities,
            review_only,
            from,
            to,
            export_review,
        } => {
            let filter =
                DashboardFilter::from_selection(doc_types, priorities, review_only, from, to)
                    .context("Invalid dashboard filter")?;
            cmd_dashboard(&config, &filter, export_review).await?;
        }
        Commands::Upload {
            doc_type,
            language,
            dry_run,
            paths,
        } => {
            cmd_upload(&config, doc_type, language, dry_run, &paths, cli.color).await?;
        }
        Commands::Catalog { export, json } => {
            cmd_catalog(&config, export, json).await?;
        }
        Commands::PipelineScript => {
            cmd_pipeline_script(&config);
        }
        Commands::Verify => {
            cmd_verify(&config).await?;
        }
    }

    Ok(())
}

fn open_session(config: &Config) -> Result<Box<dyn SqlSession>> {
    warehouse::connect(&config.warehouse).context("Failed to open warehouse session")
}

fn cmd_generate(
    config: &Config,
    output: Option<PathBuf>,
    seed: Option<u64>,
    color: bool,
) -> Result<()> {
    let mut settings = config.generator.clone();
    if let Some(output) = output {
        settings.output_dir = output;
    }
    if seed.is_some() {
        settings.seed = seed;
    }

    let start = Instant::now();
    let mut generator =
        SampleGenerator::new(&settings).context("Failed to prepare output directory")?;

    println!(
        "{}",
        format_info(&format!(
            "Generating sample documents in {}",
            generator.output_dir().display()
        ))
    );

    let total = DocumentType::INSIGHT_TYPES.len() * DEFAULT_DISTRIBUTION.len();
    let tracker = ProgressTracker::with_color(total, "Generating", color);

    let summary = generator
        .generate_batch(&DEFAULT_DISTRIBUTION, |doc| {
            tracker.file_completed(doc.size_bytes);
            tracker.println(format_success(&format!("Generated {}", doc.file_name)));
        })
        .context("Sample generation failed")?;
    tracker.finish();

    println!();
    println!(
        "{}",
        format_success(&format!(
            "Generated {} PDFs in {:.2}s",
            summary.len(),
            start.elapsed().as_secs_f64()
        ))
    );
    for (doc_type, count) in summary.by_type() {
        println!("{}", format_summary_line(doc_type.label(), count));
    }
    for (language, count) in summary.by_language() {
        println!("{}", format_summary_line(language.display_name(), count));
    }

    println!();
    println!(
        "{}",
        format_info("Ready for upload. Stage the whole set with:")
    );
    println!(
        "  {}",
        SqlBuilder::new(config.objects.clone()).put_directory_glob(generator.output_dir())
    );

    Ok(())
}

async fn cmd_dashboard(
    config: &Config,
    filter: &DashboardFilter,
    export_review: Option<PathBuf>,
) -> Result<()> {
    let session = open_session(config)?;

    let dashboard = Dashboard::new(
        session.as_ref(),
        config.objects.clone(),
        config.dashboard.clone(),
    );

    let snapshot = dashboard
        .load(filter)
        .await
        .context("Failed to load dashboard data")?;

    println!("{}", dashboard.render(&snapshot));

    if let Some(dir) = export_review {
        if snapshot.review.is_empty() {
            println!("{}", format_warning("Review queue is empty, nothing exported"));
        } else {
            let exporter = CsvExporter::new(dir)?;
            let path = exporter
                .export("review_queue", &dashboard.review_table(&snapshot))
                .context("Failed to export review queue")?;
            println!(
                "{}",
                format_success(&format!("Review queue exported to {}", path.display()))
            );
        }
    }

    Ok(())
}

async fn cmd_upload(
    config: &Config,
    doc_type: DocumentType,
    language: Language,
    dry_run: bool,
    paths: &[PathBuf],
    color: bool,
) -> Result<()> {
    let files = collect_files(paths);
    if files.is_empty() {
        return Err(anyhow::anyhow!("No PDF files found in the given paths"));
    }

    info!(
        "Uploading {} file(s) as {} ({})",
        files.len(),
        doc_type.catalog_code(),
        language.display_name()
    );

    let sql = SqlBuilder::new(config.objects.clone());
    let session = if dry_run {
        None
    } else {
        Some(open_session(config)?)
    };
    let uploader = match &session {
        Some(session) => Uploader::new(session.as_ref(), sql.clone(), config.upload.clone()),
        None => Uploader::offline(sql.clone(), config.upload.clone()),
    };

    let tracker = if dry_run {
        ProgressTracker::hidden(files.len(), "Uploading")
    } else {
        ProgressTracker::with_color(files.len(), "Uploading", color)
    };

    let report = uploader
        .upload(&files, doc_type, language, dry_run, &tracker)
        .await;

    println!();
    for (idx, outcome) in report.outcomes.iter().enumerate() {
        let name = outcome.display_name();
        match &outcome.result {
            Ok(doc) => {
                let verb = if dry_run {
                    "would be cataloged"
                } else {
                    "cataloged successfully"
                };
                println!(
                    "{}",
                    format_step(
                        idx + 1,
                        report.total,
                        &format_success(&format!(
                            "{} {} (ID: {})",
                            name, verb, doc.entry.document_id
                        ))
                    )
                );
                for line in doc.details() {
                    println!("      {}", line);
                }
                if dry_run {
                    for statement in &doc.statements {
                        println!("{};\n", statement);
                    }
                }
            }
            Err(message) => {
                println!(
                    "{}",
                    format_step(
                        idx + 1,
                        report.total,
                        &format_error(&format!("Failed to process {}: {}", name, message))
                    )
                );
            }
        }
    }

    let stats = tracker.stats();
    println!();
    println!("{}", format_summary_line("Total Files", report.total));
    println!("{}", format_summary_line("Successfully Cataloged", report.uploaded));
    println!("{}", format_summary_line("Failed", report.failed));
    println!(
        "{}",
        format_summary_line("Data", format!("{:.2} MB", stats.total_mb()))
    );

    if report.any_uploaded() && !dry_run {
        println!();
        println!(
            "{}",
            format_success("Files uploaded to stage. Run the AI processing pipeline below.")
        );
        println!("\n{}", sql.pipeline_script(&config.pipeline));
    }

    if report.failed > 0 {
        error!("{} of {} file(s) failed", report.failed, report.total);
    }

    Ok(())
}

async fn cmd_catalog(config: &Config, export: Option<PathBuf>, json: bool) -> Result<()> {
    let session = open_session(config)?;
    let sql = SqlBuilder::new(config.objects.clone());
    let listing = CatalogListing::new(session.as_ref(), &sql, config.dashboard.catalog_limit);

    let records = listing.fetch().await.context("Failed to query the catalog")?;

    if records.is_empty() {
        println!(
            "{}",
            format_info("No documents in catalog yet. Upload some files to get started!")
        );
        return Ok(());
    }

    println!("{}", CatalogListing::header(records.len()));
    println!("{}", render::render_table(&catalog_table(&records, true)));

    if let Some(dir) = export {
        let table = catalog_table(&records, false);
        let path = if json {
            JsonExporter::new(dir, true)?.export("document_catalog", &table)?
        } else {
            CsvExporter::new(dir)?.export("document_catalog", &table)?
        };
        println!(
            "{}",
            format_success(&format!("Catalog exported to {}", path.display()))
        );
    }

    Ok(())
}

fn cmd_pipeline_script(config: &Config) {
    let sql = SqlBuilder::new(config.objects.clone());
    println!("{}", sql.pipeline_script(&config.pipeline));
}

async fn cmd_verify(config: &Config) -> Result<()> {
    let session = open_session(config)?;

    if !session.ping().await.context("Warehouse ping failed")? {
        error!("Warehouse returned no version row");
        return Err(anyhow::anyhow!("Warehouse connection failed"));
    }
    println!(
        "{}",
        format_success(&format!("Connected using the {} backend", session.backend_name()))
    );

    let sql = SqlBuilder::new(config.objects.clone());
    let checks = [
        (config.objects.catalog_ref(), sql.catalog_listing(1)),
        (config.objects.metrics_ref(), sql.processing_metrics()),
        (config.objects.insights_ref(), sql.review_queue(1)),
    ];

    let mut failures = 0;
    for (object, statement) in checks {
        match session.query(&statement).await {
            Ok(_) => println!("{}", format_success(&format!("{} is readable", object))),
            Err(e) => {
                failures += 1;
                println!("{}", format_error(&format!("{}: {}", object, e)));
            }
        }
    }

    if failures > 0 {
        return Err(anyhow::anyhow!("{} object check(s) failed", failures));
    }

    info!("Verification complete");
    Ok(())
}
