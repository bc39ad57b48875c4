//! # DiscoverEase Dashboard Entry Point
//!
//! ## Startup Sequence
//! 1. Parse the command line
//! 2. Resolve configuration (flags > `DISCOVEREASE_*` > defaults)
//! 3. Initialize tracing
//! 4. Open the database & run migrations
//! 5. Run one command and print its result

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use discoverease_core::catalog::DEFAULT_MIN_RATING;
use discoverease_core::{AppCommand, CatalogFilter, NewAppForm, UpdateAppForm, TOP_DEVELOPERS_LIMIT};
use discoverease_dashboard::commands::{catalog, crud, report, status};
use discoverease_dashboard::config::DashboardConfig;
use discoverease_dashboard::error::ApiError;
use discoverease_dashboard::{init_tracing, open_database, render};
use discoverease_db::Database;

/// DiscoverEase - app catalog dashboard
#[derive(Parser, Debug)]
#[command(name = "discoverease", version, about, long_about = None)]
struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "DISCOVEREASE_DB_PATH")]
    db: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "info,sqlx=warn"
    #[arg(long, global = true, env = "DISCOVEREASE_LOG")]
    log: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an app with its developer and pricing records
    Create(CreateArgs),

    /// Show an app by exact name
    Read {
        #[arg(long = "app-name")]
        app_name: String,
    },

    /// Change name, genre, developer name and price of an app
    Update(UpdateArgs),

    /// Delete an app and its related records
    Delete {
        #[arg(long = "app-id")]
        app_id: String,
    },

    /// Browse the catalog with filters
    Browse(BrowseArgs),

    /// List genres in catalog order
    Genres,

    /// Developers ranked by number of apps
    TopDevelopers {
        #[arg(long, default_value_t = TOP_DEVELOPERS_LIMIT)]
        limit: u32,
    },

    /// Free apps of a genre
    FreeApps {
        #[arg(long)]
        genre: String,
    },

    /// Highest-rated apps of a genre
    TopRated {
        #[arg(long)]
        genre: String,
    },

    /// Database diagnostics
    Status,
}

/// Create form. Blank fields are reported by validation, not by clap.
#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long = "app-id", default_value = "")]
    app_id: String,
    #[arg(long = "app-name", default_value = "")]
    app_name: String,
    #[arg(long = "developer-id", default_value = "")]
    developer_id: String,
    #[arg(long, default_value = "")]
    genre: String,
    /// Size in MB
    #[arg(long, default_value = "")]
    size: String,
    #[arg(long = "app-version", default_value = "")]
    app_version: String,
    #[arg(long = "ios-version", default_value = "")]
    ios_version: String,
    /// YYYY-MM-DD
    #[arg(long = "released-date", default_value = "")]
    released_date: String,
    /// YYYY-MM-DD (optional)
    #[arg(long = "updated-date", default_value = "")]
    updated_date: String,
    /// 0 to 5 (optional)
    #[arg(long, default_value = "")]
    rating: String,
    #[arg(long = "age-group", default_value = "")]
    age_group: String,
    /// Developer display name
    #[arg(long, default_value = "")]
    developer: String,
    #[arg(long, default_value = "")]
    price: String,
    #[arg(long, default_value = "")]
    currency: String,
}

impl From<CreateArgs> for NewAppForm {
    fn from(args: CreateArgs) -> Self {
        NewAppForm {
            app_id: args.app_id,
            app_name: args.app_name,
            developer_id: args.developer_id,
            genre: args.genre,
            size: args.size,
            app_version: args.app_version,
            ios_version: args.ios_version,
            released_date: args.released_date,
            updated_date: args.updated_date,
            avg_user_rating: args.rating,
            age_group: args.age_group,
            developer_name: args.developer,
            price: args.price,
            currency: args.currency,
        }
    }
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(long = "app-id")]
    app_id: String,
    #[arg(long = "app-name", default_value = "")]
    app_name: String,
    #[arg(long, default_value = "")]
    genre: String,
    #[arg(long, default_value = "")]
    price: String,
    /// New developer name; omit to keep the current one
    #[arg(long)]
    developer: Option<String>,
}

impl From<UpdateArgs> for UpdateAppForm {
    fn from(args: UpdateArgs) -> Self {
        UpdateAppForm {
            app_id: args.app_id,
            app_name: args.app_name,
            genre: args.genre,
            price: args.price,
            developer_name: args.developer,
        }
    }
}

#[derive(Args, Debug)]
struct BrowseArgs {
    /// Genre to filter by (defaults to the first genre in the catalog)
    #[arg(long)]
    genre: Option<String>,

    /// Minimum average user rating, 0 to 5
    #[arg(long = "min-rating", default_value_t = DEFAULT_MIN_RATING)]
    min_rating: f64,

    /// Minimum size in MB, 0 to 500
    #[arg(long = "min-size", default_value_t = 0.0)]
    min_size: f64,

    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,
}

impl From<BrowseArgs> for CatalogFilter {
    fn from(args: BrowseArgs) -> Self {
        CatalogFilter {
            genre: args.genre,
            min_rating: args.min_rating,
            min_size_mb: args.min_size,
            search: args.search,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match DashboardConfig::resolve(cli.db.clone(), cli.log.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error[CONFIG]: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter);

    let json = cli.json;
    let result = match open_database(&config).await {
        Ok(db) => {
            let result = run(&db, cli.command, json).await;
            db.close().await;
            result
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if json {
                match render::to_json(&e) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("{}", e),
                }
            } else {
                eprintln!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Runs one command and renders its output.
async fn run(db: &Database, command: Command, json: bool) -> Result<String, ApiError> {
    match command {
        Command::Create(args) => {
            let outcome = crud::handle(db, AppCommand::Create(args.into())).await?;
            output(&outcome, json, render::outcome)
        }
        Command::Read { app_name } => {
            let outcome = crud::handle(db, AppCommand::Read { app_name }).await?;
            output(&outcome, json, render::outcome)
        }
        Command::Update(args) => {
            let outcome = crud::handle(db, AppCommand::Update(args.into())).await?;
            output(&outcome, json, render::outcome)
        }
        Command::Delete { app_id } => {
            let outcome = crud::handle(db, AppCommand::Delete { app_id }).await?;
            output(&outcome, json, render::outcome)
        }
        Command::Browse(args) => {
            let report = catalog::browse(db, &args.into()).await?;
            output(&report, json, render::browse)
        }
        Command::Genres => {
            let genres = catalog::genres(db).await?;
            output(&genres, json, |g| {
                g.iter().map(|genre| format!("{}\n", genre)).collect()
            })
        }
        Command::TopDevelopers { limit } => {
            let rows = report::top_developers(db, Some(limit)).await?;
            output(&rows, json, |r| render::developer_chart(r))
        }
        Command::FreeApps { genre } => {
            let rows = report::free_apps(db, &genre).await?;
            output(&rows, json, |r| render::free_apps_table(r))
        }
        Command::TopRated { genre } => {
            let rows = report::top_rated(db, &genre).await?;
            output(&rows, json, |r| render::top_rated_table(r))
        }
        Command::Status => {
            let report = status::status(db).await?;
            output(&report, json, render::status)
        }
    }
}

fn output<T, F>(value: &T, json: bool, text: F) -> Result<String, ApiError>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if json {
        render::to_json(value).map(|body| body + "\n")
    } else {
        Ok(text(value))
    }
}
