//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! The unique index on `accounts.username` is the final arbiter of duplicate
//! registrations; its violation surfaces as
//! [`AccountRepositoryError::DuplicateUsername`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, PasswordHash, UserId, UserRole, Username};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AccountRepositoryError {
    map_pool_error(error, |message| {
        AccountRepositoryError::connection(message)
    })
}

fn diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let corrupt = |detail: String| {
        AccountRepositoryError::query(format!("stored account {} is invalid: {detail}", row.id))
    };
    let username = Username::new(&row.username).map_err(|err| corrupt(err.to_string()))?;
    let role = row
        .role
        .parse::<UserRole>()
        .map_err(|err| corrupt(err.to_string()))?;
    Ok(Account {
        id: UserId::from_uuid(row.id),
        username,
        password_hash: PasswordHash::new(row.password_hash),
        role,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .find(id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::username.eq(username.as_str()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewAccountRow {
            id: *account.id.as_uuid(),
            username: account.username.as_str(),
            password_hash: account.password_hash.as_str(),
            role: account.role.as_str(),
            created_at: account.created_at,
        };
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AccountRepositoryError::duplicate_username(account.username.as_str())
                } else {
                    diesel_error(err)
                }
            })
    }

    async fn delete(&self, id: &UserId) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(accounts::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
