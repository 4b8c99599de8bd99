//! Postgres 托管控制台服务
//!
//! 提供数据库托管控制台的全部后端能力，包括：
//! - 数据库的创建、列表、重命名与删除（透传托管 API）
//! - 表、列、行的 CRUD（逐请求连接执行 SQL）
//! - 内嵌的浏览器管理界面

mod frontend;
mod gateway;
mod handlers;
mod provisioning;
mod routes;
mod state;
mod statements;

use axum::{middleware, routing::get, Json, Router};
use common::config::{load_dotenv, AppConfig};
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "console-service";
const DEFAULT_PORT: u16 = 8090;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postgres 托管控制台 API",
        version = "0.1.0",
        description = "数据库、表、列、行的管理端点"
    ),
    paths(
        handlers::database::list_databases,
        handlers::database::create_database,
        handlers::database::rename_database,
        handlers::database::delete_database,
        handlers::table::list_tables,
        handlers::table::create_table,
        handlers::table::rename_table,
        handlers::table::delete_table,
        handlers::column::list_columns,
        handlers::column::add_column,
        handlers::column::update_column,
        handlers::column::delete_column,
        handlers::row::list_rows,
        handlers::row::insert_row,
        handlers::row::update_rows,
        handlers::row::delete_rows,
        handlers::health_check,
    ),
    components(schemas(
        common::models::CreateDatabaseRequest,
        common::models::RenameDatabaseRequest,
        common::models::DeleteDatabaseRequest,
        common::models::CreateTableRequest,
        common::models::RenameTableRequest,
        common::models::DeleteTableRequest,
        common::models::AddColumnRequest,
        common::models::UpdateColumnRequest,
        common::models::DeleteColumnRequest,
        common::models::ColumnItem,
        common::models::InsertRowRequest,
        common::models::UpdateRowRequest,
        common::models::DeleteRowRequest,
        handlers::HealthResponse,
    )),
    tags(
        (name = "database", description = "数据库管理端点"),
        (name = "table", description = "表管理端点"),
        (name = "column", description = "列管理端点"),
        (name = "row", description = "行数据端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let mut config = AppConfig::load_with_service(SERVICE_NAME);
    config.port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // 创建应用状态
    let state = AppState::new(config.clone());

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr).await.expect("绑定地址失败");
    axum::serve(listener, app).await.expect("服务启动失败");
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .merge(frontend::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
