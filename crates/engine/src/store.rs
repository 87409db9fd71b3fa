//! Persistence seam for transactions.
//!
//! The engine never talks to a database directly: it goes through a
//! [`TransactionStore`], so the same rules run whether records live in SQLite
//! ([`SqlStore`]) or in memory ([`MemoryStore`]).

use async_trait::async_trait;
use uuid::Uuid;

use crate::{NewTransaction, ResultEngine, Transaction, TransactionPatch};

mod memory;
mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

/// Decides, from the record currently stored, which patch to apply. An error
/// aborts the update and leaves the record untouched.
pub type PatchCheck<'a> =
    &'a (dyn Fn(&Transaction) -> ResultEngine<TransactionPatch> + Send + Sync);

/// CRUD over stored transactions.
///
/// Stores perform no business-rule validation of their own. Updates receive a
/// [`PatchCheck`] that they must run on the current record inside the same
/// atomic step as the write, so a concurrent update can never slip between the
/// check and the write.
#[async_trait]
pub trait TransactionStore: Send + Sync + std::fmt::Debug {
    async fn create(&self, new: NewTransaction) -> ResultEngine<Transaction>;

    /// All records, oldest first.
    async fn list(&self) -> ResultEngine<Vec<Transaction>>;

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<Transaction>>;

    /// Returns `None` when no record has this id.
    async fn update_by_id(
        &self,
        id: Uuid,
        check: PatchCheck<'_>,
    ) -> ResultEngine<Option<Transaction>>;

    /// Returns `false` when no record has this id.
    async fn delete_by_id(&self, id: Uuid) -> ResultEngine<bool>;
}
