//! 表资源端点
//!
//! 表级操作经由 SQL 网关在指定数据库上执行。

use axum::extract::{Query, State};
use axum::Json;

use common::errors::AppError;
use common::models::table::{
    CreateTableRequest, DeleteTableRequest, RenameTableRequest, TableListQuery,
};
use common::response::ApiResponse;

use crate::state::AppState;

/// 列出 public 模式下的基础表
#[utoipa::path(
    get,
    path = "/api/table",
    tag = "table",
    params(
        ("databaseName" = String, Query, description = "数据库名称")
    ),
    responses(
        (status = 200, description = "表名列表", body = ApiResponse<Vec<String>>),
        (status = 400, description = "缺少 databaseName"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn list_tables(
    State(state): State<AppState>,
    Query(query): Query<TableListQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let database = query.require()?;
    let tables = state.gateway.list_tables(database).await?;
    Ok(Json(ApiResponse::ok(tables)))
}

/// 创建表（自带 id 与 created_at 列）
#[utoipa::path(
    post,
    path = "/api/table",
    tag = "table",
    request_body = CreateTableRequest,
    responses(
        (status = 200, description = "表已创建"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn create_table(
    State(state): State<AppState>,
    Json(req): Json<CreateTableRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table) = req.require()?;
    state.gateway.create_table(database, table).await?;
    Ok(Json(ApiResponse::ok_message(format!("Table {table} created"))))
}

/// 重命名表
#[utoipa::path(
    put,
    path = "/api/table",
    tag = "table",
    request_body = RenameTableRequest,
    responses(
        (status = 200, description = "表已重命名"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn rename_table(
    State(state): State<AppState>,
    Json(req): Json<RenameTableRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, old_name, new_name) = req.require()?;
    state.gateway.rename_table(database, old_name, new_name).await?;
    Ok(Json(ApiResponse::ok_message(format!(
        "Renamed {old_name} to {new_name}"
    ))))
}

/// 删除表（IF EXISTS，幂等）
#[utoipa::path(
    delete,
    path = "/api/table",
    tag = "table",
    request_body = DeleteTableRequest,
    responses(
        (status = 200, description = "表已删除"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn delete_table(
    State(state): State<AppState>,
    Json(req): Json<DeleteTableRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table) = req.require()?;
    state.gateway.drop_table(database, table).await?;
    Ok(Json(ApiResponse::ok_message(format!("Table {table} deleted"))))
}
