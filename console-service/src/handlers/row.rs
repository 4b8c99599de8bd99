//! 行资源端点
//!
//! 行数据为自由键值映射；where 与 data 仅支持等值与 AND 组合。

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use common::errors::AppError;
use common::models::row::{DeleteRowRequest, InsertRowRequest, RowListQuery, UpdateRowRequest};
use common::response::ApiResponse;

use crate::state::AppState;

/// 列出表的全部行
#[utoipa::path(
    get,
    path = "/api/row",
    tag = "row",
    params(
        ("databaseName" = String, Query, description = "数据库名称"),
        ("tableName" = String, Query, description = "表名称")
    ),
    responses(
        (status = 200, description = "行数据列表", body = ApiResponse<Value>),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn list_rows(
    State(state): State<AppState>,
    Query(query): Query<RowListQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let (database, table) = query.require()?;
    let rows = state.gateway.list_rows(database, table).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// 插入一行
#[utoipa::path(
    post,
    path = "/api/row",
    tag = "row",
    request_body = InsertRowRequest,
    responses(
        (status = 200, description = "数据已插入"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn insert_row(
    State(state): State<AppState>,
    Json(req): Json<InsertRowRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table, data) = req.require()?;
    state.gateway.insert_row(database, table, data).await?;
    Ok(Json(ApiResponse::ok_message("Data inserted")))
}

/// 按条件更新行；零行命中仍返回成功
#[utoipa::path(
    put,
    path = "/api/row",
    tag = "row",
    request_body = UpdateRowRequest,
    responses(
        (status = 200, description = "数据已更新"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn update_rows(
    State(state): State<AppState>,
    Json(req): Json<UpdateRowRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table, filter, data) = req.require()?;
    state.gateway.update_rows(database, table, data, filter).await?;
    Ok(Json(ApiResponse::ok_message("Data updated")))
}

/// 按条件删除行
#[utoipa::path(
    delete,
    path = "/api/row",
    tag = "row",
    request_body = DeleteRowRequest,
    responses(
        (status = 200, description = "数据已删除"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn delete_rows(
    State(state): State<AppState>,
    Json(req): Json<DeleteRowRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table, filter) = req.require()?;
    state.gateway.delete_rows(database, table, filter).await?;
    Ok(Json(ApiResponse::ok_message("Data deleted")))
}
