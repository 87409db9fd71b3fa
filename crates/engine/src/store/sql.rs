use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveValue, DatabaseConnection, QueryOrder, TransactionTrait, prelude::*};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    NewTransaction, ResultEngine, Transaction,
    transactions::{self, normalize_category},
};

use super::{PatchCheck, TransactionStore};

/// [`TransactionStore`] backed by the `transactions` table.
///
/// Updates from this process are serialized, and each one reads, checks and
/// writes inside a single database transaction.
#[derive(Clone, Debug)]
pub struct SqlStore {
    database: DatabaseConnection,
    update_lock: Arc<Mutex<()>>,
}

impl SqlStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            update_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl TransactionStore for SqlStore {
    async fn create(&self, new: NewTransaction) -> ResultEngine<Transaction> {
        let tx = Transaction::new(new);
        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        Ok(tx)
    }

    async fn list(&self) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Option<Transaction>> {
        transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Transaction::try_from)
            .transpose()
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        check: PatchCheck<'_>,
    ) -> ResultEngine<Option<Transaction>> {
        let _guard = self.update_lock.lock().await;
        let db_tx = self.database.begin().await?;

        let Some(model) = transactions::Entity::find_by_id(id.to_string())
            .one(&db_tx)
            .await?
        else {
            return Ok(None);
        };
        let current = Transaction::try_from(model.clone())?;
        let patch = check(&current)?;
        if patch.is_empty() {
            return Ok(Some(current));
        }

        let mut active: transactions::ActiveModel = model.into();
        if let Some(title) = &patch.title {
            active.title = ActiveValue::Set(title.clone());
        }
        if let Some(description) = &patch.description {
            active.description = ActiveValue::Set(description.clone());
        }
        if let Some(amount) = patch.amount {
            active.amount = ActiveValue::Set(amount);
        }
        if let Some(kind) = patch.kind {
            active.kind = ActiveValue::Set(kind.as_str().to_string());
        }
        if let Some(category) = &patch.category {
            active.category = ActiveValue::Set(normalize_category(Some(category.as_str())));
        }

        let updated = active.update(&db_tx).await?;
        db_tx.commit().await?;

        Transaction::try_from(updated).map(Some)
    }

    async fn delete_by_id(&self, id: Uuid) -> ResultEngine<bool> {
        let result = transactions::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
