//! Startup data seeding.

use store_core::services::mask_email;

use crate::config::AdminSeed;
use crate::state::AppState;

/// Make sure the configured administrator account exists.
///
/// Failures are logged; the server still starts so read endpoints stay up.
pub async fn seed_admin(state: &AppState, seed: &AdminSeed) {
    match state
        .auth
        .ensure_admin(&seed.name, &seed.email, &seed.password)
        .await
    {
        Ok(user) => tracing::info!(
            user_id = ?user.id,
            user_email = %mask_email(&user.email),
            "Administrator account ready"
        ),
        Err(e) => tracing::error!("Failed to seed administrator account: {}", e),
    }
}
