use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{NewTransaction, ResultEngine, Transaction};

use super::{PatchCheck, TransactionStore};

/// [`TransactionStore`] keeping records in process memory.
///
/// Records are keyed by insertion sequence so `list` returns them in creation
/// order. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    records: BTreeMap<u64, Transaction>,
}

impl Inner {
    fn seq_of(&self, id: Uuid) -> Option<u64> {
        self.records
            .iter()
            .find_map(|(seq, tx)| (tx.id == id).then_some(*seq))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn create(&self, new: NewTransaction) -> ResultEngine<Transaction> {
        let tx = Transaction::new(new);
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(seq, tx.clone());
        Ok(tx)
    }

    async fn list(&self) -> ResultEngine<Vec<Transaction>> {
        Ok(self.inner.read().await.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<Transaction>> {
        let inner = self.inner.read().await;
        Ok(inner.records.values().find(|tx| tx.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        check: PatchCheck<'_>,
    ) -> ResultEngine<Option<Transaction>> {
        let mut inner = self.inner.write().await;
        let Some(seq) = inner.seq_of(id) else {
            return Ok(None);
        };
        let Some(tx) = inner.records.get_mut(&seq) else {
            return Ok(None);
        };
        let patch = check(tx)?;
        tx.apply(&patch);
        Ok(Some(tx.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> ResultEngine<bool> {
        let mut inner = self.inner.write().await;
        let Some(seq) = inner.seq_of(id) else {
            return Ok(false);
        };
        Ok(inner.records.remove(&seq).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{EngineError, TransactionKind, TransactionPatch, ValidationError};

    fn apply(
        patch: TransactionPatch,
    ) -> impl Fn(&Transaction) -> ResultEngine<TransactionPatch> + Send + Sync {
        move |_| Ok(patch.clone())
    }

    fn new_tx(title: &str, amount: f64, kind: TransactionKind) -> NewTransaction {
        NewTransaction {
            title: title.to_string(),
            description: format!("{title} description"),
            amount,
            kind,
            category: None,
        }
    }

    #[tokio::test]
    async fn list_keeps_creation_order() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            store
                .create(new_tx(title, 1.0, TransactionKind::Income))
                .await
                .unwrap();
        }

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|tx| tx.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert_eq!(
            store
                .update_by_id(id, &apply(TransactionPatch::default()))
                .await
                .unwrap(),
            None
        );
        assert!(!store.delete_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = MemoryStore::new();
        let keep = store
            .create(new_tx("keep", -5.0, TransactionKind::Expense))
            .await
            .unwrap();
        let drop = store
            .create(new_tx("drop", -6.0, TransactionKind::Expense))
            .await
            .unwrap();

        assert!(store.delete_by_id(drop.id).await.unwrap());
        assert!(!store.delete_by_id(drop.id).await.unwrap());

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining, vec![keep]);
    }

    #[tokio::test]
    async fn update_applies_patch() {
        let store = MemoryStore::new();
        let tx = store
            .create(new_tx("rent", -900.0, TransactionKind::Expense))
            .await
            .unwrap();

        let updated = store
            .update_by_id(
                tx.id,
                &apply(TransactionPatch {
                    amount: Some(-950.0),
                    ..Default::default()
                }),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.amount, -950.0);
        assert_eq!(store.find_by_id(tx.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn rejected_check_leaves_record_untouched() {
        let store = MemoryStore::new();
        let tx = store
            .create(new_tx("rent", -900.0, TransactionKind::Expense))
            .await
            .unwrap();

        let refuse = |_: &Transaction| -> ResultEngine<TransactionPatch> {
            Err(EngineError::Validation(ValidationError::PositiveExpense))
        };
        let err = store.update_by_id(tx.id, &refuse).await.unwrap_err();
        assert_eq!(err, EngineError::Validation(ValidationError::PositiveExpense));
        assert_eq!(store.find_by_id(tx.id).await.unwrap(), Some(tx));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn check_sees_the_record_it_writes_over() {
        let store = Arc::new(MemoryStore::new());
        let tx = store
            .create(new_tx("counter", 0.0, TransactionKind::Income))
            .await
            .unwrap();

        let id = tx.id;
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let increment = |current: &Transaction| -> ResultEngine<TransactionPatch> {
                    Ok(TransactionPatch {
                        amount: Some(current.amount + 1.0),
                        ..Default::default()
                    })
                };
                store.update_by_id(id, &increment).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.amount, 50.0);
    }
}
