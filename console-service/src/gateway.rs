//! SQL statement gateway.
//!
//! Every operation opens one session against the named database, runs one
//! logical operation, and closes the session on every exit path — success,
//! business error, and query failure alike. Statement construction happens
//! before the session is opened, so a rejected request never touches the
//! database.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Connection, PgConnection, Postgres, Row};
use tracing::info;

use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use common::models::column::ColumnItem;
use common::models::row::RowMap;
use common::utils::pg_types::display_label;

use crate::statements::{self, SqlParam};

/// One open connection scoped to a single database.
#[async_trait]
pub trait SqlSession: Send {
    /// Runs a statement, returning the number of affected rows.
    async fn execute(&mut self, sql: &str, params: Vec<SqlParam>) -> AppResult<u64>;

    /// Runs a catalog query; every selected column decodes as text.
    async fn fetch_text_rows(
        &mut self,
        sql: &str,
        params: Vec<SqlParam>,
    ) -> AppResult<Vec<Vec<String>>>;

    /// Runs a query whose single column is one JSON document per row.
    async fn fetch_json_rows(&mut self, sql: &str, params: Vec<SqlParam>)
        -> AppResult<Vec<Value>>;

    /// Gracefully closes the connection.
    async fn close(self: Box<Self>) -> AppResult<()>;
}

/// Opens sessions against named databases.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self, database: &str) -> AppResult<Box<dyn SqlSession>>;
}

/// Production factory: one `PgConnection` per operation, no pooling.
pub struct PgSessionFactory {
    database_uri: String,
    connect_timeout: Duration,
}

impl PgSessionFactory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            database_uri: config.database_uri.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }
}

#[async_trait]
impl SessionFactory for PgSessionFactory {
    async fn open(&self, database: &str) -> AppResult<Box<dyn SqlSession>> {
        let url = format!("{}/{}?sslmode=require", self.database_uri, database);
        let conn = tokio::time::timeout(self.connect_timeout, PgConnection::connect(&url))
            .await
            .map_err(|_| {
                AppError::DatabaseConnection(format!(
                    "connect to {} timed out after {}s",
                    database,
                    self.connect_timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;
        Ok(Box::new(PgSession { conn }))
    }
}

struct PgSession {
    conn: PgConnection,
}

fn bind_params(
    query: Query<'_, Postgres, PgArguments>,
    params: Vec<SqlParam>,
) -> Query<'_, Postgres, PgArguments> {
    params.into_iter().fold(query, |query, param| match param {
        SqlParam::Text(v) => query.bind(v),
        SqlParam::Int(v) => query.bind(v),
        SqlParam::Float(v) => query.bind(v),
        SqlParam::Bool(v) => query.bind(v),
        SqlParam::Null => query.bind(Option::<String>::None),
    })
}

#[async_trait]
impl SqlSession for PgSession {
    async fn execute(&mut self, sql: &str, params: Vec<SqlParam>) -> AppResult<u64> {
        let result = bind_params(sqlx::query(sql), params)
            .execute(&mut self.conn)
            .await
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;
        Ok(result.rows_affected())
    }

    async fn fetch_text_rows(
        &mut self,
        sql: &str,
        params: Vec<SqlParam>,
    ) -> AppResult<Vec<Vec<String>>> {
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;
        rows.iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| {
                        row.try_get::<String, _>(i)
                            .map_err(|e| AppError::DatabaseQuery(e.to_string()))
                    })
                    .collect()
            })
            .collect()
    }

    async fn fetch_json_rows(
        &mut self,
        sql: &str,
        params: Vec<SqlParam>,
    ) -> AppResult<Vec<Value>> {
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;
        rows.iter()
            .map(|row| {
                row.try_get::<Value, _>(0)
                    .map_err(|e| AppError::DatabaseQuery(e.to_string()))
            })
            .collect()
    }

    async fn close(self: Box<Self>) -> AppResult<()> {
        self.conn
            .close()
            .await
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))
    }
}

/// Propagates the operation's result first; a close failure surfaces only
/// when the operation itself succeeded.
fn settle<T>(result: AppResult<T>, closed: AppResult<()>) -> AppResult<T> {
    let value = result?;
    closed?;
    Ok(value)
}

/// Gateway over per-request SQL sessions.
pub struct SqlGateway {
    sessions: Arc<dyn SessionFactory>,
}

impl SqlGateway {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self { sessions }
    }

    pub async fn list_tables(&self, database: &str) -> AppResult<Vec<String>> {
        let mut session = self.sessions.open(database).await?;
        let result = session.fetch_text_rows(statements::LIST_TABLES, Vec::new()).await;
        let closed = session.close().await;
        let rows = settle(result, closed)?;
        Ok(rows.into_iter().flatten().collect())
    }

    pub async fn create_table(&self, database: &str, table: &str) -> AppResult<()> {
        let sql = statements::create_table(table)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, Vec::new()).await;
        let closed = session.close().await;
        settle(result, closed)?;
        info!(database, table, "table created");
        Ok(())
    }

    pub async fn rename_table(
        &self,
        database: &str,
        old_name: &str,
        new_name: &str,
    ) -> AppResult<()> {
        let sql = statements::rename_table(old_name, new_name)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, Vec::new()).await;
        let closed = session.close().await;
        settle(result, closed)?;
        info!(database, old_name, new_name, "table renamed");
        Ok(())
    }

    pub async fn drop_table(&self, database: &str, table: &str) -> AppResult<()> {
        let sql = statements::drop_table(table)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, Vec::new()).await;
        let closed = session.close().await;
        settle(result, closed)?;
        info!(database, table, "table dropped");
        Ok(())
    }

    pub async fn list_columns(&self, database: &str, table: &str) -> AppResult<Vec<ColumnItem>> {
        let mut session = self.sessions.open(database).await?;
        let result = session
            .fetch_text_rows(
                statements::LIST_COLUMNS,
                vec![SqlParam::Text(table.to_string())],
            )
            .await;
        let closed = session.close().await;
        let rows = settle(result, closed)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let mut fields = row.into_iter();
                let column_name = fields.next()?;
                let data_type = fields.next()?;
                Some(ColumnItem {
                    column_name,
                    display_type: display_label(&data_type).to_string(),
                    data_type,
                })
            })
            .collect())
    }

    pub async fn add_column(
        &self,
        database: &str,
        table: &str,
        column: &str,
        column_type: &str,
    ) -> AppResult<()> {
        let sql = statements::add_column(table, column, column_type)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, Vec::new()).await;
        let closed = session.close().await;
        settle(result, closed)?;
        info!(database, table, column, column_type, "column added");
        Ok(())
    }

    /// Rename and/or retype a column as one logical operation. With neither
    /// a new name nor a new type the request is a no-op that still succeeds,
    /// and no session is opened.
    pub async fn update_column(
        &self,
        database: &str,
        table: &str,
        old_name: &str,
        new_name: Option<&str>,
        new_type: Option<&str>,
    ) -> AppResult<()> {
        let rename = new_name
            .map(|name| statements::rename_column(table, old_name, name))
            .transpose()?;
        let current = new_name.unwrap_or(old_name);
        let retype = new_type
            .map(|ty| statements::alter_column_type(table, current, ty))
            .transpose()?;
        if rename.is_none() && retype.is_none() {
            return Ok(());
        }

        let mut session = self.sessions.open(database).await?;
        let result: AppResult<()> = async {
            if let Some(sql) = &rename {
                session.execute(sql, Vec::new()).await?;
            }
            if let Some(sql) = &retype {
                session.execute(sql, Vec::new()).await?;
            }
            Ok(())
        }
        .await;
        let closed = session.close().await;
        settle(result, closed)?;
        info!(database, table, old_name, "column updated");
        Ok(())
    }

    pub async fn drop_column(&self, database: &str, table: &str, column: &str) -> AppResult<()> {
        let sql = statements::drop_column(table, column)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, Vec::new()).await;
        let closed = session.close().await;
        settle(result, closed)?;
        info!(database, table, column, "column dropped");
        Ok(())
    }

    pub async fn list_rows(&self, database: &str, table: &str) -> AppResult<Vec<Value>> {
        let sql = statements::select_rows(table)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.fetch_json_rows(&sql, Vec::new()).await;
        let closed = session.close().await;
        settle(result, closed)
    }

    pub async fn insert_row(&self, database: &str, table: &str, data: &RowMap) -> AppResult<u64> {
        let (sql, params) = statements::insert_row(table, data)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, params).await;
        let closed = session.close().await;
        let affected = settle(result, closed)?;
        info!(database, table, affected, "row inserted");
        Ok(affected)
    }

    /// Affected count is returned but not inspected by the endpoint; an
    /// update matching zero rows still reports success.
    pub async fn update_rows(
        &self,
        database: &str,
        table: &str,
        data: &RowMap,
        filter: &RowMap,
    ) -> AppResult<u64> {
        let (sql, params) = statements::update_rows(table, data, filter)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, params).await;
        let closed = session.close().await;
        let affected = settle(result, closed)?;
        info!(database, table, affected, "rows updated");
        Ok(affected)
    }

    pub async fn delete_rows(
        &self,
        database: &str,
        table: &str,
        filter: &RowMap,
    ) -> AppResult<u64> {
        let (sql, params) = statements::delete_rows(table, filter)?;
        let mut session = self.sessions.open(database).await?;
        let result = session.execute(&sql, params).await;
        let closed = session.close().await;
        let affected = settle(result, closed)?;
        info!(database, table, affected, "rows deleted");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counters {
        opened: AtomicUsize,
        closed: AtomicUsize,
        executed: AtomicUsize,
    }

    struct MockSession {
        counters: Arc<Counters>,
        fail_queries: bool,
        fail_close: bool,
    }

    #[async_trait]
    impl SqlSession for MockSession {
        async fn execute(&mut self, _sql: &str, _params: Vec<SqlParam>) -> AppResult<u64> {
            self.counters.executed.fetch_add(1, Ordering::SeqCst);
            if self.fail_queries {
                Err(AppError::DatabaseQuery("relation does not exist".into()))
            } else {
                Ok(0)
            }
        }

        async fn fetch_text_rows(
            &mut self,
            _sql: &str,
            _params: Vec<SqlParam>,
        ) -> AppResult<Vec<Vec<String>>> {
            self.counters.executed.fetch_add(1, Ordering::SeqCst);
            if self.fail_queries {
                Err(AppError::DatabaseQuery("catalog query failed".into()))
            } else {
                Ok(vec![
                    vec!["email".into(), "text".into()],
                    vec!["age".into(), "integer".into()],
                ])
            }
        }

        async fn fetch_json_rows(
            &mut self,
            _sql: &str,
            _params: Vec<SqlParam>,
        ) -> AppResult<Vec<Value>> {
            self.counters.executed.fetch_add(1, Ordering::SeqCst);
            Ok(vec![json!({"id": 1})])
        }

        async fn close(self: Box<Self>) -> AppResult<()> {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            if self.fail_close {
                Err(AppError::DatabaseConnection("close failed".into()))
            } else {
                Ok(())
            }
        }
    }

    struct MockFactory {
        counters: Arc<Counters>,
        fail_queries: bool,
        fail_close: bool,
    }

    impl MockFactory {
        fn gateway(counters: Arc<Counters>, fail_queries: bool, fail_close: bool) -> SqlGateway {
            SqlGateway::new(Arc::new(MockFactory {
                counters,
                fail_queries,
                fail_close,
            }))
        }
    }

    #[async_trait]
    impl SessionFactory for MockFactory {
        async fn open(&self, _database: &str) -> AppResult<Box<dyn SqlSession>> {
            self.counters.opened.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockSession {
                counters: self.counters.clone(),
                fail_queries: self.fail_queries,
                fail_close: self.fail_close,
            }))
        }
    }

    #[tokio::test]
    async fn session_closes_exactly_once_on_success() {
        let counters = Arc::new(Counters::default());
        let gateway = MockFactory::gateway(counters.clone(), false, false);
        gateway.create_table("demo", "users").await.unwrap();
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn session_closes_exactly_once_on_query_failure() {
        let counters = Arc::new(Counters::default());
        let gateway = MockFactory::gateway(counters.clone(), true, false);
        let err = gateway.create_table("demo", "users").await.unwrap_err();
        assert_eq!(err.to_string(), "relation does not exist");
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn query_error_wins_over_close_error() {
        let counters = Arc::new(Counters::default());
        let gateway = MockFactory::gateway(counters.clone(), true, true);
        let err = gateway.drop_table("demo", "users").await.unwrap_err();
        assert_eq!(err.to_string(), "relation does not exist");
    }

    #[tokio::test]
    async fn rejected_statement_never_opens_a_session() {
        let counters = Arc::new(Counters::default());
        let gateway = MockFactory::gateway(counters.clone(), false, false);
        assert!(gateway.create_table("demo", "").await.is_err());
        assert!(gateway
            .add_column("demo", "users", "age", "SERIAL")
            .await
            .is_err());
        assert_eq!(counters.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn column_update_without_changes_is_a_sessionless_success() {
        let counters = Arc::new(Counters::default());
        let gateway = MockFactory::gateway(counters.clone(), false, false);
        gateway
            .update_column("demo", "users", "email", None, None)
            .await
            .unwrap();
        assert_eq!(counters.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rename_and_retype_share_one_session() {
        let counters = Arc::new(Counters::default());
        let gateway = MockFactory::gateway(counters.clone(), false, false);
        gateway
            .update_column("demo", "users", "email", Some("mail"), Some("TEXT"))
            .await
            .unwrap();
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.executed.load(Ordering::SeqCst), 2);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn listed_columns_carry_display_labels() {
        let counters = Arc::new(Counters::default());
        let gateway = MockFactory::gateway(counters, false, false);
        let columns = gateway.list_columns("demo", "users").await.unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].column_name, "email");
        assert_eq!(columns[0].display_type, "TEXT");
        assert_eq!(columns[1].data_type, "integer");
        assert_eq!(columns[1].display_type, "INTEGER");
    }
}
