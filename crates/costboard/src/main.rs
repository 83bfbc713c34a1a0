//! costboard - Cost-Center Reporting CLI

mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use costboard_core::{
    export::write_report, filter, ApiConfig, BillingClient, Dataset, DocumentParser, ListQuery,
    ReportStore,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "costboard",
    version,
    about = "Cost-center reporting for enterprise billing data",
    long_about = "Validates cost-center documents, computes summary aggregates,\n\
                  renders searchable/filterable tables, and exports JSON/CSV reports.\n\
                  \n\
                  Input is a local JSON document or a direct call to the enterprise\n\
                  billing API (costboard fetch).\n\
                  \n\
                  Examples:\n\
                    costboard summary cost-centers.json\n\
                    costboard list cost-centers.json --search platform --sort repos\n\
                    costboard list cost-centers.json --kind org --presence with-resources\n\
                    costboard export cost-centers.json --format csv\n\
                    costboard login --enterprise acme --token $TOKEN\n\
                    costboard fetch --export json\n\
                  \n\
                  Environment Variables:\n\
                    COSTBOARD_CONFIG_DIR             # Override credential directory\n\
                    COSTBOARD_ENTERPRISE             # Enterprise slug for fetch/login\n\
                    COSTBOARD_TOKEN                  # API token for fetch/login\n\
                    COSTBOARD_NO_COLOR               # Disable ANSI colors\n\
                    COSTBOARD_LOG                    # Tracing filter (e.g. debug)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    /// Directory holding saved API credentials (default: user config dir)
    #[arg(long, env = "COSTBOARD_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "COSTBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Validate a document and print its summary
    Summary {
        /// Cost-center JSON document
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List active cost centers with filters and sorting
    List {
        /// Cost-center JSON document
        input: PathBuf,
        /// Case-insensitive substring over name, id, and resource names
        #[arg(long, short = 's', default_value = "")]
        search: String,
        /// Resource-kind filter: all, org, repo, user
        #[arg(long, short = 'k', default_value = "all")]
        kind: String,
        /// Emptiness filter: all, with-resources, empty
        #[arg(long, short = 'p', default_value = "all")]
        presence: String,
        /// Sort order: name, total-resources, orgs, repos, users
        #[arg(long, default_value = "name")]
        sort: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a report artifact (JSON or CSV)
    Export {
        /// Cost-center JSON document
        input: PathBuf,
        /// Export format: json, csv
        #[arg(long, short = 'f', default_value = "json")]
        format: String,
        /// Destination path (default: cost-center-report-<date>.<ext>)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Fetch cost centers from the billing API
    Fetch {
        /// Enterprise slug (falls back to saved credentials)
        #[arg(long, env = "COSTBOARD_ENTERPRISE")]
        enterprise: Option<String>,
        /// API token (falls back to saved credentials)
        #[arg(long, env = "COSTBOARD_TOKEN")]
        token: Option<String>,
        /// Also export the fetched data: json, csv
        #[arg(long)]
        export: Option<String>,
        /// Destination for --export (default: cost-center-report-<date>.<ext>)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save API credentials
    Login {
        /// Enterprise slug
        #[arg(long, env = "COSTBOARD_ENTERPRISE")]
        enterprise: String,
        /// API token
        #[arg(long, env = "COSTBOARD_TOKEN")]
        token: String,
    },
    /// Delete saved API credentials
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("COSTBOARD_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => ApiConfig::default_dir()?,
    };
    let no_color = args.no_color;

    match args.mode {
        Mode::Summary { input, json } => run_summary(input, json).await,
        Mode::List {
            input,
            search,
            kind,
            presence,
            sort,
            json,
        } => run_list(input, search, kind, presence, sort, json, no_color).await,
        Mode::Export {
            input,
            format,
            output,
        } => run_export(input, format, output).await,
        Mode::Fetch {
            enterprise,
            token,
            export,
            output,
            json,
        } => run_fetch(config_dir, enterprise, token, export, output, json, no_color).await,
        Mode::Login { enterprise, token } => run_login(config_dir, enterprise, token),
        Mode::Logout => run_logout(config_dir),
    }
}

async fn load_dataset(input: &Path) -> Result<Dataset> {
    let centers = DocumentParser::new().parse_path(input).await?;
    Ok(Dataset::from_cost_centers(centers))
}

async fn run_summary(input: PathBuf, json: bool) -> Result<()> {
    let dataset = load_dataset(&input).await?;
    println!("{}", cli::format_summary(&dataset.summary, json));
    Ok(())
}

async fn run_list(
    input: PathBuf,
    search: String,
    kind: String,
    presence: String,
    sort: String,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let query = ListQuery {
        search,
        kind: cli::parse_kind(&kind)?,
        presence: cli::parse_presence(&presence)?,
        sort: cli::parse_sort(&sort)?,
    };

    let dataset = load_dataset(&input).await?;
    let visible = filter::apply(&dataset.active, &query);

    println!("{}", cli::format_cost_center_table(&visible, json, no_color));

    if !json {
        eprintln!(
            "\n{} of {} active cost centers",
            visible.len(),
            dataset.active.len()
        );
    }

    Ok(())
}

async fn run_export(input: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    let format = cli::parse_format(&format)?;
    let dataset = load_dataset(&input).await?;

    let exported_at = Utc::now();
    let path = output.unwrap_or_else(|| {
        PathBuf::from(costboard_core::report_file_name(
            format,
            exported_at.date_naive(),
        ))
    });

    write_report(&dataset, format, exported_at, &path)?;

    println!(
        "Exported {} cost centers to {}",
        dataset.len(),
        path.display()
    );
    Ok(())
}

async fn run_fetch(
    config_dir: PathBuf,
    enterprise: Option<String>,
    token: Option<String>,
    export: Option<String>,
    output: Option<PathBuf>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    // Parse the export format up front so a typo fails before the network call
    let export_format = export.as_deref().map(cli::parse_format).transpose()?;

    let saved = ApiConfig::load(&config_dir);
    let config = match (enterprise, token, saved) {
        (Some(enterprise), Some(token), _) => ApiConfig { token, enterprise },
        (enterprise, token, Some(saved)) => ApiConfig {
            token: token.unwrap_or(saved.token),
            enterprise: enterprise.unwrap_or(saved.enterprise),
        },
        _ => anyhow::bail!(
            "no API credentials: pass --enterprise and --token, or run `costboard login`"
        ),
    };

    let spinner = if json {
        None
    } else {
        let spinner = indicatif::ProgressBar::new_spinner();
        if let Ok(style) =
            indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Fetching cost centers for {}...", config.enterprise));
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Some(spinner)
    };

    let store = ReportStore::new();
    let fetch_token = store.begin_fetch();

    let result = BillingClient::new().fetch_cost_centers(&config).await;

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let centers = result.context("Fetch failed")?;
    let dataset = Dataset::from_cost_centers(centers);
    if !store.install_fetched(dataset.clone(), fetch_token) {
        anyhow::bail!("fetch superseded by a newer request");
    }

    if json {
        println!("{}", cli::format_summary(&dataset.summary, true));
    } else {
        println!("{}", cli::format_summary(&dataset.summary, false));
        println!();
        println!(
            "{}",
            cli::format_cost_center_table(&store.visible(), false, no_color)
        );
    }

    if let Some(format) = export_format {
        let exported_at = Utc::now();
        let path = output.unwrap_or_else(|| {
            PathBuf::from(costboard_core::report_file_name(
                format,
                exported_at.date_naive(),
            ))
        });
        write_report(&dataset, format, exported_at, &path)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

fn run_login(config_dir: PathBuf, enterprise: String, token: String) -> Result<()> {
    let config = ApiConfig { token, enterprise };
    config.save(&config_dir)?;
    println!(
        "Saved credentials for '{}' to {}",
        config.enterprise,
        config_dir.display()
    );
    Ok(())
}

fn run_logout(config_dir: PathBuf) -> Result<()> {
    if ApiConfig::clear(&config_dir)? {
        println!("Credentials deleted.");
    } else {
        println!("No saved credentials.");
    }
    Ok(())
}
