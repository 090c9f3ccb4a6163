//! # Label Service サーバー
//!
//! ページ付き一覧と NULL 許容の値を返すラベル API。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `LABEL_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `LABEL_PORT` | No | ポート番号（デフォルト: `3100`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `5`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p pagekit-label-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use pagekit_label_service::{
   build_app,
   config::LabelServiceConfig,
   repository::PostgresLabelRepository,
};
use pagekit_shared::observability::{TracingConfig, init_tracing};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   let _tracing_guard = init_tracing(TracingConfig::from_env("label-service")).entered();

   let config = LabelServiceConfig::from_env()?;

   tracing::info!(
      "Label Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   let pool = PgPoolOptions::new()
      .max_connections(config.max_connections)
      .connect(&config.database_url)
      .await?;
   tracing::info!("データベースに接続しました");

   sqlx::migrate!("./migrations").run(&pool).await?;

   let app = build_app(Arc::new(PostgresLabelRepository::new(pool)));

   let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Label Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
