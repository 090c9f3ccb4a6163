//! # ラベルハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/v1/labels?offset&limit` - ラベル一覧（ページ付き）
//! - `GET /api/v1/labels/{id}` - ラベル詳細
//! - `PUT /api/v1/labels/{id}` - ラベルの値を更新

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State, rejection::JsonRejection},
   http::StatusCode,
};
use pagekit_core::{BackendError, Pageable, Pagination, pageable};

use crate::{
   model::{Label, UpdateLabelRequest},
   repository::LabelRepository,
};

/// パスパラメータ名
const ID_KEY: &str = "id";

/// 更新リクエストのキー
const LABEL_KEY: &str = "label";

/// ラベル API の共有状態
pub struct LabelState {
   pub repository: Arc<dyn LabelRepository>,
}

/// パスの `{id}` を整数として解釈する
fn parse_id(raw: &str) -> Result<i64, BackendError> {
   if raw.is_empty() {
      return Err(BackendError::BadRequestKey {
         key: ID_KEY.to_string(),
      });
   }
   raw.parse().map_err(|e: std::num::ParseIntError| BackendError::BadRequestValue {
      key:    ID_KEY.to_string(),
      value:  Some(raw.to_string()),
      reason: e.to_string(),
   })
}

/// GET /api/v1/labels
///
/// `offset` / `limit` で指定された範囲のラベルを全件数とともに返す。
pub async fn list_labels(
   State(state): State<Arc<LabelState>>,
   pagination: Pagination,
) -> Result<Json<Pageable<Vec<Label>>>, BackendError> {
   let (labels, total) = state.repository.find_page(pagination).await?;

   tracing::debug!(
      offset = pagination.offset(),
      limit = pagination.limit(),
      total,
      returned = labels.len(),
      "ラベル一覧を取得しました"
   );

   Ok(Json(pageable::build(pagination, total, labels)))
}

/// GET /api/v1/labels/{id}
pub async fn get_label(
   State(state): State<Arc<LabelState>>,
   Path(raw_id): Path<String>,
) -> Result<Json<Label>, BackendError> {
   let id = parse_id(&raw_id)?;

   let label = state
      .repository
      .find_by_id(id)
      .await?
      .ok_or_else(BackendError::not_found::<Label>)?;

   Ok(Json(label))
}

/// PUT /api/v1/labels/{id}
///
/// 成功時は 204 No Content を返す。
/// ボディが解釈できない場合は axum の既定の拒否ではなく `BadRequestValue` を返す。
pub async fn update_label(
   State(state): State<Arc<LabelState>>,
   Path(raw_id): Path<String>,
   payload: Result<Json<UpdateLabelRequest>, JsonRejection>,
) -> Result<StatusCode, BackendError> {
   let id = parse_id(&raw_id)?;
   let Json(request) = payload
      .map_err(|rejection| BackendError::bad_request_value(LABEL_KEY, rejection.body_text()))?;

   state.repository.update_label(id, &request.label).await?;

   tracing::info!(%id, "ラベルを更新しました");

   Ok(StatusCode::NO_CONTENT)
}
