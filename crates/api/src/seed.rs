//! Startup seeding of the administrator account.

use towertrack_db::models::user::CreateUser;
use towertrack_db::repositories::UserRepo;
use towertrack_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminSeed;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to hash admin password: {0}")]
    Hash(String),

    #[error("Failed to seed admin user: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the configured admin user unless one with that email exists.
///
/// Returns `true` when a user was created.
pub async fn seed_admin(pool: &DbPool, admin: &AdminSeed) -> Result<bool, SeedError> {
    if UserRepo::find_by_email(pool, &admin.email).await?.is_some() {
        tracing::debug!(email = %admin.email, "Admin user already present");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password).map_err(|e| SeedError::Hash(e.to_string()))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Seeded admin user");
    Ok(true)
}
