//! Boutique CLI - drive the storefront state from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! boutique products --category deco
//! boutique product 42
//!
//! # Fill the cart and check out
//! boutique login -e marie@boutique.fr -p secret
//! boutique cart add 42 --quantity 2
//! boutique checkout --address "1 rue de Paris"
//!
//! # Print HTML fragments
//! boutique render cart
//! ```
//!
//! State is mirrored under `BOUTIQUE_DATA_DIR`, so the session, cart and
//! wishlist carry over from one invocation to the next.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use boutique_storefront::Storefront;
use boutique_storefront::config::StorefrontConfig;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "boutique")]
#[command(author, version, about = "Boutique storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an existing account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "BOUTIQUE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "BOUTIQUE_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },
    /// End the session
    Logout,
    /// Show the current session
    Whoami,
    /// List products
    Products {
        /// Restrict to a category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Product { id: String },
    /// List categories
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Place an order for the cart contents
    Checkout {
        /// Shipping address
        #[arg(short, long, default_value = "")]
        address: String,
    },
    /// List your orders
    Orders,
    /// Print an HTML fragment
    Render {
        #[command(subcommand)]
        fragment: RenderTarget,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add a product
    Add {
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove { id: String },
    /// Set a line's quantity (0 or less removes it)
    Set {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlist entries
    Show,
    /// Add or remove a product
    Toggle { id: String },
}

#[derive(Subcommand)]
enum RenderTarget {
    /// Cart lines and summary
    Cart,
    /// A product card
    Product { id: String },
    /// Every category card
    Categories,
    /// Cart and wishlist badges
    Badges,
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
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "boutique_storefront=info,boutique_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, &config).await {
        e.report();
        let _ = writeln!(std::io::stderr().lock(), "error: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), commands::CliError> {
    let mut storefront = Storefront::from_config(config)?;
    let mut notices = storefront.subscribe_notices();
    let mut out = std::io::stdout().lock();

    let result = dispatch(cli.command, &mut storefront, &mut out).await;

    // Surface notices on stderr so stdout stays machine-readable.
    let mut err = std::io::stderr().lock();
    while let Ok(notice) = notices.try_recv() {
        let _ = writeln!(err, "[{}] {}", notice.level, notice.message);
    }

    result
}

async fn dispatch<S: boutique_storefront::services::TableServices>(
    command: Commands,
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
) -> Result<(), commands::CliError> {
    match command {
        Commands::Login { email, password } => {
            commands::session::login(storefront, out, &email, password).await?;
        }
        Commands::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            commands::session::register(storefront, out, email, password, first_name, last_name)
                .await?;
        }
        Commands::Logout => commands::session::logout(storefront, out)?,
        Commands::Whoami => commands::session::whoami(storefront, out)?,
        Commands::Products { category } => {
            commands::catalog::products(storefront, out, category).await?;
        }
        Commands::Product { id } => commands::catalog::product(storefront, out, id.into()).await?,
        Commands::Categories => commands::catalog::categories(storefront, out).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(storefront, out)?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(storefront, out, id.into(), quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(storefront, out, &id.into())?,
            CartAction::Set { id, quantity } => {
                commands::cart::set(storefront, out, &id.into(), quantity)?;
            }
            CartAction::Clear => commands::cart::clear(storefront, out)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::cart::show_wishlist(storefront, out)?,
            WishlistAction::Toggle { id } => {
                commands::cart::toggle_wishlist(storefront, out, &id.into()).await?;
            }
        },
        Commands::Checkout { address } => commands::orders::checkout(storefront, out, &address).await?,
        Commands::Orders => commands::orders::list(storefront, out).await?,
        Commands::Render { fragment } => match fragment {
            RenderTarget::Cart => commands::render::cart(storefront, out)?,
            RenderTarget::Product { id } => {
                commands::render::product(storefront, out, id.into()).await?;
            }
            RenderTarget::Categories => commands::render::categories(storefront, out).await?,
            RenderTarget::Badges => commands::render::badges(storefront, out)?,
        },
    }
    Ok(())
}
