use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use tracing::info;
use tuition_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt().with_target(false).init();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    info!("Connecting to database...");
    let db_pool = tuition_db::create_pool(&database_url).await?;

    initialize_database(&db_pool).await?;

    Ok(())
}
