//! Handler模块

pub mod column;
pub mod database;
pub mod row;
pub mod table;

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "console-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::extract::{Query, State};
    use axum::Json;
    use serde_json::{json, Value};

    use common::config::AppConfig;
    use common::errors::AppResult;
    use common::models::row::UpdateRowRequest;
    use common::models::table::{CreateTableRequest, TableListQuery};
    use common::models::CreateDatabaseRequest;

    use crate::gateway::{SessionFactory, SqlGateway, SqlSession};
    use crate::provisioning::ProvisioningApi;
    use crate::state::AppState;
    use crate::statements::SqlParam;

    #[derive(Default)]
    struct StubProvisioning {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProvisioningApi for StubProvisioning {
        async fn list_databases(&self) -> AppResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"databases": []}))
        }

        async fn create_database(&self, name: &str) -> AppResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"database": {"name": name, "owner_name": "neondb_owner"}}))
        }

        async fn rename_database(
            &self,
            _old_name: &str,
            _new_name: Option<&str>,
        ) -> AppResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({}))
        }

        async fn delete_database(&self, _name: &str) -> AppResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({}))
        }
    }

    struct StubSession;

    #[async_trait]
    impl SqlSession for StubSession {
        async fn execute(&mut self, _sql: &str, _params: Vec<SqlParam>) -> AppResult<u64> {
            // Zero affected rows, as for an update whose filter matches nothing.
            Ok(0)
        }

        async fn fetch_text_rows(
            &mut self,
            _sql: &str,
            _params: Vec<SqlParam>,
        ) -> AppResult<Vec<Vec<String>>> {
            Ok(vec![vec!["users".into()]])
        }

        async fn fetch_json_rows(
            &mut self,
            _sql: &str,
            _params: Vec<SqlParam>,
        ) -> AppResult<Vec<Value>> {
            Ok(Vec::new())
        }

        async fn close(self: Box<Self>) -> AppResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubSessions {
        opened: AtomicUsize,
    }

    #[async_trait]
    impl SessionFactory for StubSessions {
        async fn open(&self, _database: &str) -> AppResult<Box<dyn SqlSession>> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(StubSession))
        }
    }

    fn test_state(
        provisioning: Arc<StubProvisioning>,
        sessions: Arc<StubSessions>,
    ) -> AppState {
        AppState {
            config: AppConfig::load_with_service("test"),
            provisioning,
            gateway: Arc::new(SqlGateway::new(sessions)),
        }
    }

    #[tokio::test]
    async fn missing_table_name_never_reaches_the_gateway() {
        let sessions = Arc::new(StubSessions::default());
        let state = test_state(Arc::new(StubProvisioning::default()), sessions.clone());

        let req = CreateTableRequest {
            database_name: Some("demo".into()),
            table_name: None,
        };
        let err = super::table::create_table(State(state), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing databaseName or tableName");
        assert_eq!(sessions.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_database_name_never_reaches_the_provider() {
        let provisioning = Arc::new(StubProvisioning::default());
        let state = test_state(provisioning.clone(), Arc::new(StubSessions::default()));

        let req = CreateDatabaseRequest { name: None };
        let err = super::database::create_database(State(state), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing database name");
        assert_eq!(provisioning.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_table_reports_a_confirmation_message() {
        let state = test_state(
            Arc::new(StubProvisioning::default()),
            Arc::new(StubSessions::default()),
        );
        let req = CreateTableRequest {
            database_name: Some("demo".into()),
            table_name: Some("users".into()),
        };
        let Json(envelope) = super::table::create_table(State(state), Json(req))
            .await
            .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Table users created"));
    }

    #[tokio::test]
    async fn list_tables_returns_catalog_names() {
        let state = test_state(
            Arc::new(StubProvisioning::default()),
            Arc::new(StubSessions::default()),
        );
        let query = TableListQuery {
            database_name: Some("demo".into()),
        };
        let Json(envelope) = super::table::list_tables(State(state), Query(query))
            .await
            .unwrap();
        assert_eq!(envelope.data.unwrap(), vec!["users".to_string()]);
    }

    #[tokio::test]
    async fn update_matching_zero_rows_still_succeeds() {
        let sessions = Arc::new(StubSessions::default());
        let state = test_state(Arc::new(StubProvisioning::default()), sessions.clone());

        let req: UpdateRowRequest = serde_json::from_value(json!({
            "databaseName": "demo",
            "tableName": "users",
            "where": {"id": 3},
            "data": {"name": "Ann"}
        }))
        .unwrap();
        let Json(envelope) = super::row::update_rows(State(state), Json(req))
            .await
            .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Data updated"));
        assert_eq!(sessions.opened.load(Ordering::SeqCst), 1);
    }
}
