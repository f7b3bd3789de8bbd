use anyhow::Result;
use clap::{Parser, Subcommand};
use foodie::store::{Recipe, RecipeStore, now_timestamp};
use foodie_recipe::{
    ClassificationContext, DietFilter, RECYCLE_MULTIPLIER, SortKey, ViewState, browse_category,
    builtin_dataset,
};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions};
use tower_http::trace::TraceLayer;

/// foodie - recipe browsing demo
#[derive(Parser)]
#[command(name = "foodie")]
#[command(about = "Recipe API service and browsing tools", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load the built-in dataset into the store
    Seed,
    /// Browse recipes from the configured source
    Browse {
        /// Browse a single category
        #[arg(long)]
        category: Option<String>,

        /// Free-text search instead of a listing
        #[arg(long)]
        search: Option<String>,

        /// Diet filter: All, Veg or NonVeg
        #[arg(long, default_value = "All")]
        filter: String,

        /// Sort key: default, price-asc, price-desc, rating-desc,
        /// name-asc, name-desc or category
        #[arg(long, default_value = "default")]
        sort: String,

        /// Replicate the result list (stress-testing aid)
        #[arg(long)]
        recycle: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = foodie::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodie::observability::init_observability(
        "foodie",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
        Commands::Seed => seed_command(config).await,
        Commands::Browse {
            category,
            search,
            filter,
            sort,
            recycle,
        } => browse_command(config, category, search, filter, sort, recycle).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: foodie::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting foodie server...");

    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let app = foodie::create_app(db_pool).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: foodie::config::Config) -> Result<()> {
    tracing::info!("Running database migrations...");
    let db_pool = migrated_pool(&config).await?;
    db_pool.close().await;
    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: foodie::config::Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate_command(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn seed_command(config: foodie::config::Config) -> Result<()> {
    let db_pool = migrated_pool(&config).await?;
    let store = RecipeStore::new(db_pool);

    let now = now_timestamp();
    let records: Vec<Recipe> = builtin_dataset()
        .into_iter()
        .map(|detail| Recipe {
            category: detail
                .category
                .as_deref()
                .and_then(|c| c.parse().ok())
                .unwrap_or_default(),
            id: detail.id,
            name: detail.name,
            thumbnail: detail.thumbnail,
            area: detail.area.unwrap_or_else(|| "India".to_string()),
            tags: detail.tags,
            instructions: detail.instructions,
            ingredients: detail.ingredients,
            youtube_url: detail.youtube_url,
            source_url: detail.source_url,
            created_at: now,
            updated_at: now,
        })
        .collect();

    store.replace_all(&records).await?;
    tracing::info!(count = records.len(), "Seeded recipe collection");

    Ok(())
}

/// Creates the database if needed, connects and applies migrations.
async fn migrated_pool(config: &foodie::config::Config) -> Result<sqlx::SqlitePool> {
    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    Ok(db_pool)
}

#[tracing::instrument(skip(config))]
async fn browse_command(
    config: foodie::config::Config,
    category: Option<String>,
    search: Option<String>,
    filter: String,
    sort: String,
    recycle: bool,
) -> Result<()> {
    let filter: DietFilter = filter
        .parse()
        .map_err(|_| anyhow::anyhow!("filter must be one of: All, Veg, NonVeg"))?;
    let sort: SortKey = sort.parse().map_err(|_| {
        anyhow::anyhow!(
            "sort must be one of: default, price-asc, price-desc, rating-desc, name-asc, \
             name-desc, category"
        )
    })?;

    let source = config
        .source
        .kind
        .build(config.source.base_url.as_deref())?;

    let recipes = if let Some(term) = &search {
        source.search(term).await?
    } else if let Some(category) = &category {
        browse_category(source.as_ref(), category).await?
    } else {
        source.list().await?
    };

    let ctx = ClassificationContext::build(source.as_ref()).await;
    let view = ViewState {
        filter,
        sort,
        category: None,
        recycle: recycle.then_some(RECYCLE_MULTIPLIER),
    };

    let rows = view.transform(recipes, &ctx);
    if rows.is_empty() {
        println!("No recipes found");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{:<40} ${:>6}  *{}",
            row.recipe.name, row.attrs.price, row.attrs.rating
        );
    }
    println!("{} recipes", rows.len());

    Ok(())
}
