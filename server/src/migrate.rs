use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use platform_db::DbPool;

/// Fail when migrations are pending, unless `allow_dirty` is set.
pub async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if pending.is_empty() {
        return Ok(());
    }
    if !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `employee-api migrate up` or pass --allow-dirty"
        );
    }
    tracing::warn!(pending = pending.len(), "starting with pending migrations");
    Ok(())
}
