use serde_json::json;

use crate::api::NewUser;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::DatabaseManager;
use crate::handlers::users::register::create_account;

pub async fn create(username: String, email: String, password: String, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config();
    let pool = DatabaseManager::setup(&config.database).await?;

    let new_user = NewUser {
        username,
        email,
        password,
    };
    let user = create_account(&pool, &config.security, new_user).await?;

    output_success(
        output_format,
        &format!("Created user {}", user.username),
        Some(json!({ "user": { "id": user.id, "username": user.username, "email": user.email } })),
    )
}
