//! 托管 API 客户端模块
//!
//! 对接外部托管服务（Neon 兼容）的 REST 接口，负责逻辑数据库的
//! 创建、列表、重命名与删除。所有请求使用 Bearer 认证，失败时
//! 将上游错误原样转发，不做重试。

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use common::config::AppConfig;
use common::errors::{AppError, AppResult};

/// 固定的数据库属主账号
const DEFAULT_OWNER: &str = "neondb_owner";

/// 数据库供给接口
#[async_trait]
pub trait ProvisioningApi: Send + Sync {
    /// 列出分支下的所有数据库
    async fn list_databases(&self) -> AppResult<Value>;

    /// 创建数据库（属主固定）
    async fn create_database(&self, name: &str) -> AppResult<Value>;

    /// 重命名数据库；新名称缺失时由上游校验
    async fn rename_database(&self, old_name: &str, new_name: Option<&str>) -> AppResult<Value>;

    /// 删除数据库
    async fn delete_database(&self, name: &str) -> AppResult<Value>;
}

/// Neon 托管 API 客户端
pub struct NeonClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    project_id: String,
    branch_id: String,
}

#[derive(Serialize)]
struct DatabasePayload<'a> {
    database: DatabaseSpec<'a>,
}

#[derive(Serialize)]
struct DatabaseSpec<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_name: Option<&'a str>,
}

impl NeonClient {
    /// 创建新的客户端实例
    pub fn new(config: &AppConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url: config.neon_api_url.trim_end_matches('/').to_string(),
            api_key: config.neon_api_key.clone(),
            project_id: config.neon_project_id.clone(),
            branch_id: config.neon_branch_id.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/branches/{}/databases",
            self.base_url, self.project_id, self.branch_id
        )
    }

    fn item_url(&self, name: &str) -> String {
        format!("{}/{}", self.collection_url(), name)
    }

    /// 发送请求并统一处理认证与错误
    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<Value> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Provisioning(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body
            };
            return Err(AppError::Provisioning(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provisioning(e.to_string()))
    }
}

#[async_trait]
impl ProvisioningApi for NeonClient {
    async fn list_databases(&self) -> AppResult<Value> {
        self.send(self.http_client.get(self.collection_url())).await
    }

    async fn create_database(&self, name: &str) -> AppResult<Value> {
        let payload = DatabasePayload {
            database: DatabaseSpec {
                name: Some(name),
                owner_name: Some(DEFAULT_OWNER),
            },
        };
        let data = self
            .send(self.http_client.post(self.collection_url()).json(&payload))
            .await?;
        info!(name, "database created");
        Ok(data)
    }

    async fn rename_database(&self, old_name: &str, new_name: Option<&str>) -> AppResult<Value> {
        let payload = DatabasePayload {
            database: DatabaseSpec {
                name: new_name,
                owner_name: None,
            },
        };
        let data = self
            .send(self.http_client.patch(self.item_url(old_name)).json(&payload))
            .await?;
        info!(old_name, new_name, "database renamed");
        Ok(data)
    }

    async fn delete_database(&self, name: &str) -> AppResult<Value> {
        let data = self.send(self.http_client.delete(self.item_url(name))).await?;
        info!(name, "database deleted");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NeonClient {
        let mut config = AppConfig::load_with_service("test");
        config.neon_api_url = "https://console.example.com/api/v2/".into();
        config.neon_project_id = "proj-1".into();
        config.neon_branch_id = "br-main".into();
        NeonClient::new(&config, reqwest::Client::new())
    }

    #[test]
    fn urls_follow_the_provider_layout() {
        let client = client();
        assert_eq!(
            client.collection_url(),
            "https://console.example.com/api/v2/projects/proj-1/branches/br-main/databases"
        );
        assert_eq!(
            client.item_url("demo"),
            "https://console.example.com/api/v2/projects/proj-1/branches/br-main/databases/demo"
        );
    }

    #[test]
    fn create_payload_carries_the_fixed_owner() {
        let payload = DatabasePayload {
            database: DatabaseSpec {
                name: Some("demo"),
                owner_name: Some(DEFAULT_OWNER),
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["database"]["name"], "demo");
        assert_eq!(json["database"]["owner_name"], "neondb_owner");
    }

    #[test]
    fn rename_payload_omits_absent_fields() {
        let payload = DatabasePayload {
            database: DatabaseSpec {
                name: None,
                owner_name: None,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["database"], serde_json::json!({}));
    }
}
