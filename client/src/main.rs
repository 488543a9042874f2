//! Farm LCA command-line client
//!
//! Submits assessment drafts to the backend, fetches results, and drives
//! report generation and export.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farm_lca_client::render::{render_impact_table, render_report};
use farm_lca_client::{AssessmentApiClient, Config};
use shared::models::ReportType;
use shared::submission::build_submission;
use shared::validation::validate_draft;
use shared::AssessmentDraft;

#[derive(Parser)]
#[command(name = "flca", about = "Farm LCA assessment client", version)]
struct Cli {
    /// Backend base URL (overrides configuration)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a draft file and submit it as an assessment
    Submit {
        /// Path to an assessment draft JSON file
        draft: PathBuf,
        /// Only validate and print the request, do not send it
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch a stored assessment by id
    Get { assessment_id: String },
    /// List stored assessments
    List,
    /// Generate a report for an assessment
    Report {
        assessment_id: String,
        /// comprehensive, executive, or farmer_friendly
        #[arg(long, default_value = "farmer_friendly")]
        report_type: ReportType,
    },
    /// List reports generated for an assessment
    Reports { assessment_id: String },
    /// Export a report as markdown, HTML, or PDF
    Export {
        report_id: String,
        /// markdown, json, html, or pdf
        #[arg(long, default_value = "markdown")]
        format: String,
        /// Output file (defaults to stdout; required for pdf)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print backend reference options (countries, categories, farm types)
    Options,
    /// Check backend and report service health
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flca=debug,farm_lca_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load()?;
    let base_url = cli.base_url.unwrap_or(config.api.base_url);
    let client = AssessmentApiClient::new(base_url);

    match cli.command {
        Command::Submit { draft, dry_run } => {
            let raw = std::fs::read_to_string(&draft)?;
            let draft: AssessmentDraft = serde_json::from_str(&raw)?;

            let violations = validate_draft(&draft);
            if !violations.is_empty() {
                eprintln!("Draft has {} validation issue(s):", violations.len());
                for violation in &violations {
                    eprintln!("  {violation}");
                }
                anyhow::bail!("draft is not valid");
            }

            let request = build_submission(&draft);
            if dry_run {
                println!("{}", serde_json::to_string_pretty(&request)?);
                return Ok(());
            }

            let result = if draft.is_comprehensive() {
                client.create_comprehensive_assessment(&request).await?
            } else {
                client.create_assessment(&request).await?
            };
            println!("Assessment created: {}", result.id);
            println!("Single score: {:.2}", result.single_score.value());
            print!("{}", render_impact_table(&result));
        }
        Command::Get { assessment_id } => {
            let result = client.get_assessment(&assessment_id).await?;
            println!(
                "{} | {} | {}",
                result.id, result.company_name, result.assessment_date
            );
            print!("{}", render_impact_table(&result));
        }
        Command::List => {
            let list = client.list_assessments().await?;
            for assessment in &list.assessments {
                println!(
                    "{} | {} | {} | {}",
                    assessment.id,
                    assessment.company_name,
                    assessment.country,
                    assessment.assessment_date
                );
            }
            println!("{} assessment(s)", list.total);
        }
        Command::Report {
            assessment_id,
            report_type,
        } => {
            let response = client.generate_report(&assessment_id, report_type).await?;
            println!("{}: {}", response.status, response.message);
            println!("Report id: {}", response.report_id);
        }
        Command::Reports { assessment_id } => {
            let list = client.list_reports(&assessment_id).await?;
            for report in &list.reports {
                println!(
                    "{} | {} | {}",
                    report.report_id, report.report_type, report.generated_at
                );
            }
            println!("{} report(s)", list.total);
        }
        Command::Export {
            report_id,
            format,
            out,
        } => match format.as_str() {
            "markdown" => {
                let export = client.export_markdown(&report_id).await?;
                write_output(out, export.content.as_bytes())?;
            }
            "json" => {
                let value = client.export_json(&report_id).await?;
                write_output(out, serde_json::to_string_pretty(&value)?.as_bytes())?;
            }
            "html" => {
                let report = client.get_report(&report_id).await?;
                write_output(out, render_report(&report).as_bytes())?;
            }
            "pdf" => {
                let out =
                    out.ok_or_else(|| anyhow::anyhow!("--out is required for pdf export"))?;
                let bytes = client.download_pdf(&report_id).await?;
                std::fs::write(&out, bytes)?;
                println!("Wrote {}", out.display());
            }
            other => anyhow::bail!("unknown export format '{other}'"),
        },
        Command::Options => {
            let countries = client.countries().await?;
            println!("Countries: {}", countries.countries.join(", "));
            let categories = client.food_categories().await?;
            println!("Food categories: {}", categories.categories.join(", "));
            let farm_types = client.farm_types().await?;
            println!("Farm types: {}", farm_types.farm_types.join(", "));
            let management = client.management_options().await?;
            println!("Soil types: {}", management.soil_types.join(", "));
            let impacts = client.impact_categories().await?;
            println!("Midpoint impacts: {}", impacts.midpoint.join(", "));
        }
        Command::Health => {
            let health = client.health().await?;
            println!("Backend: {}", health.status);
            match client.report_service_health().await {
                Ok(reports) => println!("Report service: {}", reports.status),
                Err(err) => println!("Report service: unavailable ({err})"),
            }
        }
    }

    Ok(())
}

fn write_output(out: Option<PathBuf>, bytes: &[u8]) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, bytes)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", String::from_utf8_lossy(bytes)),
    }
    Ok(())
}
