use async_trait::async_trait;
use domains::{Account, AccountId, AccountRepo, Mutation, Result};

use super::table::Table;

/// Account table. Username uniqueness is not enforced here.
pub struct InMemoryAccountRepo {
    table: Table<Account>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryAccountRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepo for InMemoryAccountRepo {
    async fn save(&self, account: Account) -> Result<Account> {
        let account = self.table.upsert(account);
        tracing::debug!(account_id = %account.id, username = %account.username, "account saved");
        Ok(account)
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        Ok(self.table.snapshot())
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.table.get(id))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.table.first(|account| account.has_username(username)))
    }

    async fn update(&self, account: Account) -> Result<Account> {
        let account = self.table.replace(account)?;
        tracing::debug!(account_id = %account.id, "account updated");
        Ok(account)
    }

    async fn delete(&self, id: AccountId) -> Result<bool> {
        let removed = self.table.remove(id);
        tracing::debug!(account_id = %id, removed, "account delete");
        Ok(removed)
    }

    async fn modify(&self, id: AccountId, change: Mutation<Account>) -> Result<Account> {
        self.table.apply(id, change)
    }
}
