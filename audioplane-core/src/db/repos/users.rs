//! User repository
//!
//! `User_table(userID, userName)`; full-row replace on update.

use serde::Serialize;
use sqlx::FromRow;

use crate::db::{Database, Fetched, Mutated};
use crate::flash::{EntityKind, FlashAction, Flashable};
use crate::models::{EntityId, NewUser};

/// User record, also the canonical projection returned by writes
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub user_id: i32,
    pub username: String,
}

impl Flashable for User {
    const ENTITY: EntityKind = EntityKind::User;

    fn id(&self) -> i32 {
        self.user_id
    }

    fn label(&self) -> &str {
        &self.username
    }
}

/// User repository
pub struct UserRepo<'a> {
    db: &'a Database,
}

impl<'a> UserRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All users by id. `None` means no row bound.
    pub async fn list(&self, limit: Option<i64>) -> Fetched<User> {
        let query = sqlx::query_as::<_, User>(
            r#"
            SELECT userID AS user_id, userName AS username
            FROM User_table
            ORDER BY userID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("users", query).await
    }

    pub async fn insert(&self, user: &NewUser) -> Mutated<User> {
        let query = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO User_table (userName)
            VALUES ($1)
            RETURNING userID AS user_id, userName AS username
            "#,
        )
        .bind(user.username.as_str());

        self.db.run_mutation(FlashAction::Inserted, query).await
    }

    pub async fn update(&self, id: EntityId, user: &NewUser) -> Mutated<User> {
        let query = sqlx::query_as::<_, User>(
            r#"
            UPDATE User_table
            SET userName = $2
            WHERE userID = $1
            RETURNING userID AS user_id, userName AS username
            "#,
        )
        .bind(id.get())
        .bind(user.username.as_str());

        self.db.run_mutation(FlashAction::Updated, query).await
    }

    pub async fn delete(&self, id: EntityId) -> Mutated<User> {
        let query = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM User_table
            WHERE userID = $1
            RETURNING userID AS user_id, userName AS username
            "#,
        )
        .bind(id.get());

        self.db.run_mutation(FlashAction::Deleted, query).await
    }
}
