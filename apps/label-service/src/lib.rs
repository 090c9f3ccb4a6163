//! # Label Service ライブラリ
//!
//! ルーター構築とハンドラを公開する。
//! テストから `build_app` にインメモリのリポジトリを渡して使う。

pub mod config;
pub mod handler;
pub mod model;
pub mod repository;

use std::sync::Arc;

use axum::{Router, routing::get};
use handler::{LabelState, get_label, health_check, list_labels, update_label};
use pagekit_shared::observability::{MakeRequestUuidV7, make_request_span};
use repository::LabelRepository;
use tower_http::{
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

/// ルーターを構築する
///
/// レイヤーは下に書いたものが外側になる:
/// 1. SetRequestIdLayer: UUID v7 を採番（クライアント提供値があればそれを使う）
/// 2. TraceLayer: request_id を含むスパンを生成
/// 3. PropagateRequestIdLayer: レスポンスに `X-Request-Id` をコピー
pub fn build_app(repository: Arc<dyn LabelRepository>) -> Router {
   let label_state = Arc::new(LabelState { repository });

   Router::new()
      .route("/health", get(health_check))
      .route("/api/v1/labels", get(list_labels))
      .route("/api/v1/labels/{id}", get(get_label).put(update_label))
      .with_state(label_state)
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
