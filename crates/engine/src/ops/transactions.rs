use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Transaction, TransactionDraft, TransactionPatch, validate_new,
    validate_patch,
};

use super::Engine;

fn parse_transaction_id(raw: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

fn not_found() -> EngineError {
    EngineError::KeyNotFound("transaction not exists".to_string())
}

impl Engine {
    /// Validates `draft` and stores it.
    pub async fn create_transaction(&self, draft: &TransactionDraft) -> ResultEngine<Transaction> {
        let new = validate_new(draft)?;
        let tx = self.store.create(new).await?;
        tracing::info!(id = %tx.id, kind = tx.kind.as_str(), "transaction created");
        Ok(tx)
    }

    /// Every stored transaction, oldest first.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        self.store.list().await
    }

    /// Applies the fields present in `draft` to the transaction `id`.
    ///
    /// The draft is validated against the record as stored at write time.
    ///
    /// Unknown or malformed ids are reported as [`EngineError::KeyNotFound`].
    pub async fn update_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let id = parse_transaction_id(id)?;
        let check = |existing: &Transaction| -> ResultEngine<TransactionPatch> {
            Ok(validate_patch(existing, draft)?)
        };
        let tx = self
            .store
            .update_by_id(id, &check)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(id = %tx.id, "transaction updated");
        Ok(tx)
    }

    /// Deletes the transaction `id` and returns its id.
    pub async fn delete_transaction(&self, id: &str) -> ResultEngine<Uuid> {
        let id = parse_transaction_id(id)?;
        if !self.store.delete_by_id(id).await? {
            return Err(not_found());
        }
        tracing::info!(%id, "transaction deleted");
        Ok(id)
    }
}
