//! 数据库资源端点
//!
//! 数据库级操作全部透传到托管 API，响应数据原样转发。

use axum::{extract::State, Json};
use serde_json::Value;
use validator::Validate;

use common::errors::AppError;
use common::models::database::{CreateDatabaseRequest, DeleteDatabaseRequest, RenameDatabaseRequest};
use common::response::ApiResponse;

use crate::state::AppState;

/// 列出所有数据库
#[utoipa::path(
    get,
    path = "/api/database",
    tag = "database",
    responses(
        (status = 200, description = "数据库列表（上游原始响应）", body = ApiResponse<Value>),
        (status = 500, description = "托管 API 调用失败")
    )
)]
pub async fn list_databases(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let data = state.provisioning.list_databases().await?;
    Ok(Json(ApiResponse::ok(data)))
}

/// 创建数据库（属主固定）
#[utoipa::path(
    post,
    path = "/api/database",
    tag = "database",
    request_body = CreateDatabaseRequest,
    responses(
        (status = 200, description = "数据库已创建", body = ApiResponse<Value>),
        (status = 400, description = "缺少数据库名称"),
        (status = 500, description = "托管 API 调用失败")
    )
)]
pub async fn create_database(
    State(state): State<AppState>,
    Json(req): Json<CreateDatabaseRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    req.validate()?;
    let name = req.name.as_deref().unwrap_or_default();
    let data = state.provisioning.create_database(name).await?;
    Ok(Json(ApiResponse::ok(data)))
}

/// 重命名数据库
#[utoipa::path(
    patch,
    path = "/api/database",
    tag = "database",
    request_body = RenameDatabaseRequest,
    responses(
        (status = 200, description = "数据库已重命名", body = ApiResponse<Value>),
        (status = 400, description = "缺少原名称"),
        (status = 500, description = "托管 API 调用失败")
    )
)]
pub async fn rename_database(
    State(state): State<AppState>,
    Json(req): Json<RenameDatabaseRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    req.validate()?;
    let old_name = req.old_name.as_deref().unwrap_or_default();
    let data = state
        .provisioning
        .rename_database(old_name, req.name.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(data)))
}

/// 删除数据库
#[utoipa::path(
    delete,
    path = "/api/database",
    tag = "database",
    request_body = DeleteDatabaseRequest,
    responses(
        (status = 200, description = "数据库已删除", body = ApiResponse<Value>),
        (status = 400, description = "缺少数据库名称"),
        (status = 500, description = "托管 API 调用失败")
    )
)]
pub async fn delete_database(
    State(state): State<AppState>,
    Json(req): Json<DeleteDatabaseRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    req.validate()?;
    let name = req.name.as_deref().unwrap_or_default();
    let data = state.provisioning.delete_database(name).await?;
    Ok(Json(ApiResponse::ok(data)))
}
