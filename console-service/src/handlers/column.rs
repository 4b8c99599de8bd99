//! 列资源端点
//!
//! 列信息来自 information_schema，列表响应附带固定映射后的显示类型。

use axum::extract::{Query, State};
use axum::Json;

use common::errors::AppError;
use common::models::column::{
    AddColumnRequest, ColumnItem, ColumnListQuery, DeleteColumnRequest, UpdateColumnRequest,
};
use common::response::ApiResponse;

use crate::state::AppState;

/// 列出表的所有列
#[utoipa::path(
    get,
    path = "/api/column",
    tag = "column",
    params(
        ("databaseName" = String, Query, description = "数据库名称"),
        ("tableName" = String, Query, description = "表名称")
    ),
    responses(
        (status = 200, description = "列信息列表", body = ApiResponse<Vec<ColumnItem>>),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn list_columns(
    State(state): State<AppState>,
    Query(query): Query<ColumnListQuery>,
) -> Result<Json<ApiResponse<Vec<ColumnItem>>>, AppError> {
    let (database, table) = query.require()?;
    let columns = state.gateway.list_columns(database, table).await?;
    Ok(Json(ApiResponse::ok(columns)))
}

/// 新增列（类型须在允许列表内）
#[utoipa::path(
    post,
    path = "/api/column",
    tag = "column",
    request_body = AddColumnRequest,
    responses(
        (status = 200, description = "列已新增"),
        (status = 400, description = "缺少必填字段或类型不受支持"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn add_column(
    State(state): State<AppState>,
    Json(req): Json<AddColumnRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table, column, column_type) = req.require()?;
    state
        .gateway
        .add_column(database, table, column, column_type)
        .await?;
    Ok(Json(ApiResponse::ok_message(format!(
        "Column {column} added to {table}"
    ))))
}

/// 重命名或变更列类型
#[utoipa::path(
    put,
    path = "/api/column",
    tag = "column",
    request_body = UpdateColumnRequest,
    responses(
        (status = 200, description = "列已更新"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn update_column(
    State(state): State<AppState>,
    Json(req): Json<UpdateColumnRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table, old_name) = req.require()?;
    state
        .gateway
        .update_column(database, table, old_name, req.new_name(), req.new_type())
        .await?;
    Ok(Json(ApiResponse::ok_message(format!(
        "Column {old_name} updated in {table}"
    ))))
}

/// 删除列（IF EXISTS，幂等）
#[utoipa::path(
    delete,
    path = "/api/column",
    tag = "column",
    request_body = DeleteColumnRequest,
    responses(
        (status = 200, description = "列已删除"),
        (status = 400, description = "缺少必填字段"),
        (status = 500, description = "SQL 执行失败")
    )
)]
pub async fn delete_column(
    State(state): State<AppState>,
    Json(req): Json<DeleteColumnRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let (database, table, column) = req.require()?;
    state.gateway.drop_column(database, table, column).await?;
    Ok(Json(ApiResponse::ok_message(format!(
        "Column {column} deleted from {table}"
    ))))
}
