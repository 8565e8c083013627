//! PostgreSQL-backed `UserDirectory` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Credential, EmailAddress, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserDirectory`] port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain user.
///
/// Rows that violate domain invariants are reported as query errors rather
/// than silently repaired.
fn row_to_user(row: UserRow) -> Result<User, UserDirectoryError> {
    let id = UserId::new(row.id)
        .map_err(|err| UserDirectoryError::query(format!("stored user id {}: {err}", row.id)))?;
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserDirectoryError::query(format!("stored email for user {id}: {err}")))?;
    let credential = Credential::parse(&row.credential).map_err(|err| {
        UserDirectoryError::query(format!("stored credential for user {id}: {err}"))
    })?;
    Ok(User::new(id, email, credential).with_admin(row.admin))
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Vec<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn create(
        &self,
        email: &EmailAddress,
        credential: &Credential,
    ) -> Result<User, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored = credential.to_stored();
        let new_row = NewUserRow {
            email: email.as_ref(),
            credential: stored.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let user = row_to_user(row)?;
        info!(user_id = %user.id(), "inserted user");
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.value()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; query behaviour needs a live database.
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> UserRow {
        UserRow {
            id: 3,
            email: "a@b.com".to_owned(),
            credential: format!("0011223344556677.{}", "cd".repeat(32)),
            admin: false,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_converts_to_domain_user(row: UserRow) {
        let user = row_to_user(row.clone()).expect("valid row");
        assert_eq!(user.id().value(), 3);
        assert_eq!(user.email().as_ref(), "a@b.com");
        assert_eq!(user.credential().to_stored(), row.credential);
        assert!(!user.is_admin());
    }

    #[rstest]
    fn admin_flag_is_preserved(mut row: UserRow) {
        row.admin = true;
        assert!(row_to_user(row).expect("valid row").is_admin());
    }

    #[rstest]
    #[case::zero_id(|row: &mut UserRow| row.id = 0)]
    #[case::bad_email(|row: &mut UserRow| row.email = "nobody".to_owned())]
    #[case::plaintext_credential(|row: &mut UserRow| row.credential = "hunter2".to_owned())]
    fn invalid_rows_are_query_errors(mut row: UserRow, #[case] corrupt: fn(&mut UserRow)) {
        corrupt(&mut row);
        let error = row_to_user(row).expect_err("corrupt row rejected");
        assert!(matches!(error, UserDirectoryError::Query { .. }));
        assert!(!error.to_string().contains("hunter2"));
    }
}
