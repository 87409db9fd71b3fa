use std::sync::Arc;

use engine::{EngineBuilder, MemoryStore};
use migration::{Migrator, MigratorTrait};

use error::Result;
use settings::{Database, Settings};

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "pocketbook={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let mut builder = with_database(engine::Engine::builder(), &settings.server.database).await?;
    match settings.auth {
        Some(auth) => {
            builder = builder.credentials(engine::Credentials::new(auth.email, auth.password));
        }
        None => tracing::warn!("no [auth] section found, every login will be rejected"),
    }
    let engine = builder.build().await?;

    server::run(engine, settings.server.options()).await?;

    Ok(())
}

async fn with_database(builder: EngineBuilder, config: &Database) -> Result<EngineBuilder> {
    match config {
        Database::Memory => {
            tracing::info!("keeping transactions in memory, data is lost on exit");
            Ok(builder.store(Arc::new(MemoryStore::new())))
        }
        Database::Sqlite(path) => {
            let database = sea_orm::Database::connect(format!("sqlite:{path}?mode=rwc")).await?;
            Migrator::up(&database, None).await?;
            tracing::info!("using SQLite database at {path}");
            Ok(builder.database(database))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_setting_uses_memory_store() {
        let engine = with_database(engine::Engine::builder(), &Database::Memory)
            .await
            .unwrap()
            .build()
            .await
            .unwrap();

        assert!(format!("{engine:?}").contains("MemoryStore"));
        assert!(engine.list_transactions().await.unwrap().is_empty());
    }
}
