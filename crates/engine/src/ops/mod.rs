use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    ResultEngine,
    auth::Credentials,
    store::{MemoryStore, SqlStore, TransactionStore},
};

mod auth;
mod transactions;

/// Entry point for every stateful operation.
///
/// The engine owns the store handle and the configured credentials; it is
/// cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct Engine {
    store: Arc<dyn TransactionStore>,
    credentials: Option<Credentials>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn TransactionStore>>,
    credentials: Option<Credentials>,
}

impl EngineBuilder {
    /// Persist transactions in the given database.
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.store = Some(Arc::new(SqlStore::new(db)));
        self
    }

    /// Use a custom store. Overrides [`database`](Self::database).
    pub fn store(mut self, store: Arc<dyn TransactionStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Account accepted by [`Engine::login`]. Without it every login fails.
    pub fn credentials(mut self, credentials: Credentials) -> EngineBuilder {
        self.credentials = Some(credentials);
        self
    }

    /// Construct `Engine`. Falls back to an empty [`MemoryStore`] when no store
    /// was given.
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = self.store.unwrap_or_else(|| {
            tracing::warn!("no store configured, transactions will be kept in memory");
            Arc::new(MemoryStore::new())
        });
        Ok(Engine {
            store,
            credentials: self.credentials,
        })
    }
}
