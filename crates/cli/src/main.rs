//! Urvann CLI - terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! urvann plants list --search fern --category Indoor --sort price-asc
//! urvann plants categories
//!
//! # Manage the cart (persisted in URVANN_DATA_DIR)
//! urvann cart add 64f1c0ffee
//! urvann cart set 64f1c0ffee 3
//! urvann cart show
//!
//! # Admin
//! urvann login -u admin -p admin123
//! urvann plants add --name "Peace Lily" --price 349 --stock 10 \
//!     --description "Glossy leaves" --category Indoor --image lily.jpg
//! urvann logout
//! ```
//!
//! # Commands
//!
//! - `plants` - List, search, and add plants
//! - `cart` - Show and edit the cart
//! - `login` / `logout` / `whoami` - Admin session

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use urvann_core::ItemId;
use urvann_storefront::catalog::{AvailabilityFilter, SortOrder};
use urvann_storefront::config::StorefrontConfig;
use urvann_storefront::state::AppState;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "urvann")]
#[command(author, version, about = "Urvann plant storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage the plant catalog
    Plants {
        #[command(subcommand)]
        action: PlantsAction,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in as the admin
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// End the admin session (the cart is kept)
    Logout,
    /// Show the logged-in user
    Whoami,
}

#[derive(Subcommand)]
enum PlantsAction {
    /// List plants
    List {
        /// Search name and description
        #[arg(short, long)]
        search: Option<String>,

        /// Category label
        #[arg(short, long)]
        category: Option<String>,

        /// `all`, `in-stock`, or `out-of-stock`
        #[arg(short, long, default_value = "all")]
        availability: AvailabilityFilter,

        /// `newest`, `name`, `price-asc`, `price-desc`, `popular`, or `rating`
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },
    /// List category labels
    Categories,
    /// Add a plant (admin only)
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        price: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        stock: String,

        /// Mark the plant out of stock
        #[arg(long)]
        unavailable: bool,

        /// Category label; repeat for several
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Image file (under 5MB)
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a plant
    Add { id: ItemId },
    /// Remove a plant's line
    Remove { id: ItemId },
    /// Set a line's quantity (0 or less removes it)
    Set {
        id: ItemId,

        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "urvann=info,urvann_core=info,urvann_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        match &e {
            CliError::App(app) => app.report(),
            CliError::Io(_) => {}
        }
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    let mut state = AppState::open(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Plants { action } => match action {
            PlantsAction::List {
                search,
                category,
                availability,
                sort,
            } => {
                let query = urvann_storefront::catalog::CatalogQuery {
                    search,
                    category,
                    availability,
                    sort,
                };
                commands::plants::list(&state, &query, &mut out).await?;
            }
            PlantsAction::Categories => commands::plants::categories(&state, &mut out).await?,
            PlantsAction::Add {
                name,
                price,
                description,
                stock,
                unavailable,
                categories,
                image,
            } => {
                let form = urvann_storefront::catalog::PlantForm {
                    name,
                    price,
                    description,
                    stock_count: stock,
                    availability: !unavailable,
                    categories,
                    image,
                };
                commands::plants::add(&state, &form, &mut out).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state, &mut out)?,
            CartAction::Add { id } => commands::cart::add(&mut state, &id, &mut out).await?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id, &mut out)?,
            CartAction::Set { id, quantity } => {
                commands::cart::set(&mut state, &id, &quantity, &mut out)?;
            }
            CartAction::Clear => commands::cart::clear(&mut state, &mut out)?,
        },
        Commands::Login { username, password } => {
            commands::session::login(&mut state, &username, &password, &mut out)?;
        }
        Commands::Logout => commands::session::logout(&mut state, &mut out)?,
        Commands::Whoami => commands::session::whoami(&state, &mut out)?,
    }
    Ok(())
}
