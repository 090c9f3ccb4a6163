//! # バックエンドエラー定義
//!
//! HTTP ハンドラやリポジトリが報告する失敗状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: 失敗の種類を列挙型で明示し、パターンマッチで処理可能に
//! - **コンテキストの保持**: ユースケース名や対象キーなど、調査に必要な値をフィールドに持つ
//! - **HTTP ステータスへのマッピング**: `axum` feature 有効時に `IntoResponse` を実装
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `Repository` | 500 Internal Server Error | リポジトリ層の失敗 |
//! | `DeletePeriod` | 500 Internal Server Error | 期間削除の失敗 |
//! | `RowsAffected` | 500 Internal Server Error | 更新件数が期待値と異なる |
//! | `BadRequestKey` | 400 Bad Request | URL にキーが存在しない |
//! | `BadRequestValue` | 400 Bad Request | キーの値が不正 |
//! | `MissingQueryParameter` | 400 Bad Request | クエリパラメータが存在しない |
//!
//! ## 使用例
//!
//! ```rust
//! use pagekit_core::BackendError;
//!
//! struct Label;
//!
//! let error = BackendError::not_found::<Label>();
//! assert_eq!(error.to_string(), "Label が見つかりません");
//! ```

use thiserror::Error;

/// エラーの原因として保持する汎用エラー型
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// バックエンドで発生するエラー
///
/// 呼び出し元はこのエラーを受け取り、クライアントへの見せ方を決める。
/// リトライは行わない。
#[derive(Debug, Error)]
pub enum BackendError {
   /// エンティティが見つからない
   #[error("{entity} が見つかりません")]
   NotFound {
      /// エンティティの種類（"Label" など）
      entity: &'static str,
   },

   /// リポジトリ層で発生したエラー
   #[error("リポジトリでエラーが発生しました（ユースケース: {usecase}）: {source}")]
   Repository {
      usecase:    String,
      version_id: Option<u64>,
      #[source]
      source:     BoxError,
   },

   /// 期間の削除中に発生したエラー
   #[error(
      "期間の削除に失敗しました（ユースケース: {usecase}、期間 ID: {period_id}）: {source}"
   )]
   DeletePeriod {
      usecase:    String,
      version_id: Option<u64>,
      period_id:  u64,
      #[source]
      source:     BoxError,
   },

   /// 更新件数が期待値と一致しない
   #[error(
      "リポジトリでエラーが発生しました（ユースケース: {usecase}）: 更新件数 {affected} 件（期待値 {expected} 件）"
   )]
   RowsAffected {
      usecase:    String,
      version_id: Option<u64>,
      affected:   u64,
      expected:   u64,
   },

   /// URL にキーが存在しない
   #[error("不正なリクエスト: {key:?} が URL に見つかりません")]
   BadRequestKey { key: String },

   /// キーの値が不正
   ///
   /// `value` があれば値そのものを、なければパース失敗の理由を表示する。
   #[error("{}", bad_request_value_message(.key, .value.as_deref(), .reason))]
   BadRequestValue {
      key:    String,
      value:  Option<String>,
      reason: String,
   },

   /// クエリパラメータが存在しない
   #[error("{}", missing_parameter_message(.key.as_deref()))]
   MissingQueryParameter { key: Option<String> },
}

fn bad_request_value_message(key: &str, value: Option<&str>, reason: &str) -> String {
   match value {
      Some(value) => format!("不正なリクエスト: {value} はキー {key:?} の値として不正です"),
      None => format!("不正なリクエスト: キー {key:?} の値をパースできません: {reason:?}"),
   }
}

fn missing_parameter_message(key: Option<&str>) -> String {
   match key {
      Some(key) if !key.is_empty() => format!("クエリ文字列にキー {key:?} がありません"),
      _ => "URL クエリにキーがありません".to_string(),
   }
}

/// 型名からモジュールパスとジェネリクス引数を除いた短い名前を返す
fn short_type_name<T: ?Sized>() -> &'static str {
   let full = std::any::type_name::<T>();
   let without_generics = full.split('<').next().unwrap_or(full);
   without_generics
      .rsplit("::")
      .next()
      .unwrap_or(without_generics)
}

impl BackendError {
   /// 型 `T` のエンティティが見つからないエラーを生成する
   pub fn not_found<T: ?Sized>() -> Self {
      Self::NotFound {
         entity: short_type_name::<T>(),
      }
   }

   /// リポジトリエラーを生成する
   pub fn repository(usecase: impl Into<String>, source: impl Into<BoxError>) -> Self {
      Self::Repository {
         usecase:    usecase.into(),
         version_id: None,
         source:     source.into(),
      }
   }

   /// 更新件数の不一致エラーを生成する
   pub fn rows_affected(usecase: impl Into<String>, affected: u64, expected: u64) -> Self {
      Self::RowsAffected {
         usecase: usecase.into(),
         version_id: None,
         affected,
         expected,
      }
   }

   /// パースできなかった値のエラーを生成する
   pub fn bad_request_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
      Self::BadRequestValue {
         key:    key.into(),
         value:  None,
         reason: reason.into(),
      }
   }

   /// クエリパラメータ欠落エラーを生成する
   pub fn missing_query_parameter(key: impl Into<String>) -> Self {
      Self::MissingQueryParameter {
         key: Some(key.into()),
      }
   }

   /// クライアント入力に起因するエラーかどうか
   pub fn is_client_error(&self) -> bool {
      matches!(
         self,
         Self::NotFound { .. }
            | Self::BadRequestKey { .. }
            | Self::BadRequestValue { .. }
            | Self::MissingQueryParameter { .. }
      )
   }
}

#[cfg(feature = "axum")]
mod response {
   use axum::{
      Json,
      http::StatusCode,
      response::{IntoResponse, Response},
   };
   use pagekit_shared::{ErrorResponse, ProblemKind};

   use super::BackendError;

   impl BackendError {
      fn problem_kind(&self) -> ProblemKind {
         match self {
            Self::NotFound { .. } => ProblemKind::NotFound,
            Self::BadRequestKey { .. } | Self::BadRequestValue { .. } => ProblemKind::BadRequest,
            Self::MissingQueryParameter { .. } => ProblemKind::MissingParameter,
            Self::Repository { .. } | Self::DeletePeriod { .. } | Self::RowsAffected { .. } => {
               ProblemKind::InternalError
            }
         }
      }

      /// 内部エラーのユースケース名（クライアント起因のエラーでは空）
      fn usecase(&self) -> &str {
         match self {
            Self::Repository { usecase, .. }
            | Self::DeletePeriod { usecase, .. }
            | Self::RowsAffected { usecase, .. } => usecase,
            _ => "",
         }
      }
   }

   impl IntoResponse for BackendError {
      fn into_response(self) -> Response {
         if self.is_client_error() {
            tracing::debug!(error.category = "client", "リクエストエラー: {}", self);
         } else {
            tracing::error!(
               error.category = "infrastructure",
               error.kind = "database",
               usecase = %self.usecase(),
               "リポジトリエラー: {}",
               self
            );
         }

         let body = ErrorResponse::new(self.problem_kind(), self.to_string());
         let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
         (status, Json(body)).into_response()
      }
   }
}

#[cfg(test)]
mod tests {
   use std::error::Error as _;

   use pretty_assertions::assert_eq;

   use super::*;

   struct Label;

   #[test]
   fn test_not_foundが型名をエンティティ名にする() {
      let error = BackendError::not_found::<Label>();

      assert!(matches!(error, BackendError::NotFound { entity: "Label" }));
      assert_eq!(error.to_string(), "Label が見つかりません");
   }

   #[test]
   fn test_not_foundがジェネリクス引数を除いた型名を使う() {
      let error = BackendError::not_found::<Vec<Label>>();

      assert_eq!(error.to_string(), "Vec が見つかりません");
   }

   #[test]
   fn test_repositoryがユースケースと原因を表示する() {
      let error = BackendError::repository("list_labels", "connection refused");

      assert_eq!(
         error.to_string(),
         "リポジトリでエラーが発生しました（ユースケース: list_labels）: connection refused"
      );
      assert!(error.source().is_some());
   }

   #[test]
   fn test_delete_periodが期間idを表示する() {
      let error = BackendError::DeletePeriod {
         usecase:    "delete_period".to_string(),
         version_id: Some(3),
         period_id:  42,
         source:     "timeout".into(),
      };

      assert_eq!(
         error.to_string(),
         "期間の削除に失敗しました（ユースケース: delete_period、期間 ID: 42）: timeout"
      );
   }

   #[test]
   fn test_rows_affectedが件数を表示する() {
      let error = BackendError::rows_affected("update_label", 2, 1);

      assert_eq!(
         error.to_string(),
         "リポジトリでエラーが発生しました（ユースケース: update_label）: 更新件数 2 件（期待値 1 件）"
      );
   }

   #[test]
   fn test_bad_request_keyがキーを表示する() {
      let error = BackendError::BadRequestKey {
         key: "id".to_string(),
      };

      assert_eq!(error.to_string(), "不正なリクエスト: \"id\" が URL に見つかりません");
   }

   #[test]
   fn test_bad_request_valueは値があれば値を表示する() {
      let error = BackendError::BadRequestValue {
         key:    "id".to_string(),
         value:  Some("abc".to_string()),
         reason: String::new(),
      };

      assert_eq!(
         error.to_string(),
         "不正なリクエスト: abc はキー \"id\" の値として不正です"
      );
   }

   #[test]
   fn test_bad_request_valueは値がなければ理由を表示する() {
      let error = BackendError::bad_request_value("offset", "invalid digit found in string");

      assert_eq!(
         error.to_string(),
         "不正なリクエスト: キー \"offset\" の値をパースできません: \"invalid digit found in string\""
      );
   }

   #[test]
   fn test_missing_query_parameterはキーの有無で表示が変わる() {
      assert_eq!(
         BackendError::missing_query_parameter("limit").to_string(),
         "クエリ文字列にキー \"limit\" がありません"
      );
      assert_eq!(
         BackendError::MissingQueryParameter { key: None }.to_string(),
         "URL クエリにキーがありません"
      );
      assert_eq!(
         BackendError::missing_query_parameter("").to_string(),
         "URL クエリにキーがありません"
      );
   }

   #[test]
   fn test_is_client_errorで入力起因のエラーを判定する() {
      assert!(BackendError::not_found::<Label>().is_client_error());
      assert!(BackendError::bad_request_value("limit", "x").is_client_error());
      assert!(!BackendError::rows_affected("update_label", 0, 1).is_client_error());
      assert!(!BackendError::repository("list_labels", "boom").is_client_error());
   }
}
