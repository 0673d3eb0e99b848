use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Isolated environment for a single rentals test.
///
/// Holds an in-memory SQLite database and a `tower-sessions` session stored in that
/// same database, so repository, service and middleware tests all see one consistent
/// state. Both are created lazily on first access and dropped with the context; no
/// two contexts share data.
///
/// Usually obtained from [`TestBuilder::build`](crate::builder::TestBuilder::build),
/// which also creates the tables a test asks for.
pub struct TestContext {
    /// Connection to the in-memory SQLite instance.
    ///
    /// `None` until `database()` is first called. Accounts, locations, cars and
    /// bookings created by the factories all live here.
    pub db: Option<DatabaseConnection>,

    /// Session used by the auth middleware tests to stand in for a signed-in caller.
    ///
    /// `None` until `session()` is first called. Its store table is created in `db`.
    pub session: Option<Session>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Creates a new empty test context.
    ///
    /// Nothing is connected yet; the database and session are opened on first use.
    ///
    /// # Returns
    /// - New `TestContext` with neither a database connection nor a session
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// The first call connects to a fresh `sqlite::memory:` database; later calls
    /// return the same connection so rows written by one step of a test are visible
    /// to the next.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to in-memory SQLite database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref)
            }
        }
    }

    /// Creates database tables from the provided CREATE TABLE statements.
    ///
    /// Called by `TestBuilder::build()` with the statements collected from
    /// `with_user_tables()`, `with_car_tables()` and friends. Statements run in the
    /// given order, so referenced tables (users before cars, cars before bookings)
    /// must come first.
    ///
    /// # Arguments
    /// - `stmts` - CREATE TABLE statements to execute in order
    ///
    /// # Returns
    /// - `Ok(())` - All tables created successfully
    /// - `Err(TestError::Database)` - Failed to create one or more tables (duplicate
    ///   table, missing referenced table, etc.)
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Gets or creates the test session instance.
    ///
    /// On first call this will:
    /// 1. Open the database connection if not already done
    /// 2. Create the session store table in that database
    /// 3. Create a new session that expires after a week of inactivity
    ///
    /// Subsequent calls return the same session, so a user id stored by one step of a
    /// test is seen by the middleware under test.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Reference to the session instance
    /// - `Err(TestError::Database)` - Failed to open the database or migrate the store
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut test = TestContext::new();
    /// let session = test.session().await?;
    ///
    /// session.insert("auth:user", 123).await?;
    /// ```
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        match self.session {
            Some(ref session) => Ok(session),
            None => {
                let db = self.database().await?;

                let pool = db.get_sqlite_connection_pool();
                let session_store = SqliteStore::new(pool.clone());

                session_store
                    .migrate()
                    .await
                    .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

                let session = Session::new(
                    None,
                    Arc::new(session_store),
                    Some(Expiry::OnInactivity(Duration::days(7))),
                );

                let session_ref = self.session.insert(session);

                Ok(&*session_ref)
            }
        }
    }

    /// Gets or creates both database and session references.
    ///
    /// For tests that seed an account through the factories and then sign it into the
    /// session. Calling `database()` and `session()` one after the other would hold two
    /// mutable borrows of the context at once; this initializes both first and then
    /// hands out shared references.
    ///
    /// # Returns
    /// - `Ok((&DatabaseConnection, &Session))` - References to the database and session
    /// - `Err(TestError::Database)` - Failed to initialize either of them
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.database().await?;
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(sea_orm::DbErr::Custom("test context not initialized".to_string()).into()),
        }
    }
}
