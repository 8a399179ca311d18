use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::DatabaseManager;

/// Connect to `DATABASE_URL` and create any missing tables
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config().database;
    DatabaseManager::setup(database).await?;
    output_success(output_format, &format!("Schema ready at {}", database.url), None)
}
