//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! API が返す問題の種類は [`ProblemKind`] に列挙し、`type` URI・`title`・
//! `status` の組はすべてそこから導く。
//! axum の `IntoResponse` 変換は core クレート側で行う。

use serde::{Deserialize, Serialize};

/// `type` URI のベースパス
const PROBLEM_TYPE_BASE: &str = "https://pagekit.example.com/errors";

/// 内部エラー時に返す固定の detail
const INTERNAL_ERROR_DETAIL: &str = "内部エラーが発生しました";

/// 問題の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
   /// パス・クエリ・ボディの値が不正
   BadRequest,
   /// 必須のクエリパラメータがない
   MissingParameter,
   /// 対象が存在しない
   NotFound,
   /// サーバー内部の失敗
   InternalError,
}

impl ProblemKind {
   fn slug(self) -> &'static str {
      match self {
         Self::BadRequest => "bad-request",
         Self::MissingParameter => "missing-parameter",
         Self::NotFound => "not-found",
         Self::InternalError => "internal-error",
      }
   }

   fn title(self) -> &'static str {
      match self {
         Self::BadRequest => "Bad Request",
         Self::MissingParameter => "Missing Parameter",
         Self::NotFound => "Not Found",
         Self::InternalError => "Internal Server Error",
      }
   }

   /// HTTP ステータスコード
   pub fn status(self) -> u16 {
      match self {
         Self::BadRequest | Self::MissingParameter => 400,
         Self::NotFound => 404,
         Self::InternalError => 500,
      }
   }
}

/// エラーレスポンス本体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   /// 問題の種類と detail から組み立てる
   ///
   /// [`ProblemKind::InternalError`] の場合、`detail` は捨てて固定文言にする。
   pub fn new(kind: ProblemKind, detail: impl Into<String>) -> Self {
      let detail = match kind {
         ProblemKind::InternalError => INTERNAL_ERROR_DETAIL.to_string(),
         _ => detail.into(),
      };

      Self {
         error_type: format!("{PROBLEM_TYPE_BASE}/{}", kind.slug()),
         title: kind.title().to_string(),
         status: kind.status(),
         detail,
      }
   }

   /// 500 Internal Server Error
   pub fn internal_error() -> Self {
      Self::new(ProblemKind::InternalError, "")
   }
}
