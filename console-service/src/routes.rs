//! 路由模块

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/database",
            get(handlers::database::list_databases)
                .post(handlers::database::create_database)
                .patch(handlers::database::rename_database)
                .delete(handlers::database::delete_database),
        )
        .route(
            "/api/table",
            get(handlers::table::list_tables)
                .post(handlers::table::create_table)
                .put(handlers::table::rename_table)
                .delete(handlers::table::delete_table),
        )
        .route(
            "/api/column",
            get(handlers::column::list_columns)
                .post(handlers::column::add_column)
                .put(handlers::column::update_column)
                .delete(handlers::column::delete_column),
        )
        .route(
            "/api/row",
            get(handlers::row::list_rows)
                .post(handlers::row::insert_row)
                .put(handlers::row::update_rows)
                .delete(handlers::row::delete_rows),
        )
        .route("/api/health", get(handlers::health_check))
}
