//! # ヘルスチェック共通型
//!
//! サービスのヘルスチェックエンドポイントで使用されるレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// 正常稼働を表すステータス文字列
pub const STATUS_HEALTHY: &str = "healthy";

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
///
/// ## 使用例
///
/// ```
/// use pagekit_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   /// 稼働状態（`"healthy"` または `"unhealthy"`）
   pub status:  String,
   /// アプリケーションバージョン
   pub version: String,
}

impl HealthResponse {
   /// 正常稼働のレスポンスを作成する
   pub fn healthy(version: impl Into<String>) -> Self {
      Self {
         status:  STATUS_HEALTHY.to_string(),
         version: version.into(),
      }
   }
}
