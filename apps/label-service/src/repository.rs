//! # LabelRepository
//!
//! ラベルの読み込みと更新を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **トレイトで抽象化**: ハンドラは `Arc<dyn LabelRepository>` に依存し、
//!   テストではインメモリ実装に差し替える
//! - **エラーの集約**: `sqlx::Error` はユースケース名を付けて
//!   [`BackendError::Repository`] に包む
//! - **更新件数の検証**: 0 件は NotFound、2 件以上は RowsAffected

use async_trait::async_trait;
use pagekit_core::{BackendError, NullEmptyString, Pagination};
use sqlx::PgPool;

use crate::model::Label;

/// ラベルリポジトリトレイト
#[async_trait]
pub trait LabelRepository: Send + Sync {
   /// ページ範囲のラベルと全件数を取得する
   ///
   /// 並び順は `id` の昇順。
   async fn find_page(&self, pagination: Pagination) -> Result<(Vec<Label>, i64), BackendError>;

   /// ID でラベルを検索する
   async fn find_by_id(&self, id: i64) -> Result<Option<Label>, BackendError>;

   /// ラベルの値を更新する
   ///
   /// 対象の行が存在しない場合は `BackendError::NotFound` を返す。
   async fn update_label(&self, id: i64, label: &NullEmptyString) -> Result<(), BackendError>;
}

/// PostgreSQL 実装の LabelRepository
#[derive(Debug, Clone)]
pub struct PostgresLabelRepository {
   pool: PgPool,
}

impl PostgresLabelRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

/// 更新件数を検証する
///
/// 0 件は対象が存在しない、2 件以上は想定外の更新として扱う。
pub fn ensure_single_row(usecase: &str, affected: u64) -> Result<(), BackendError> {
   match affected {
      0 => Err(BackendError::not_found::<Label>()),
      1 => Ok(()),
      _ => Err(BackendError::rows_affected(usecase, affected, 1)),
   }
}

#[async_trait]
impl LabelRepository for PostgresLabelRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(offset = pagination.offset(), limit = pagination.limit()))]
   async fn find_page(&self, pagination: Pagination) -> Result<(Vec<Label>, i64), BackendError> {
      const USECASE: &str = "find_label_page";
      let repository_error = |e: sqlx::Error| BackendError::repository(USECASE, e);

      // 全件数とページを同じスナップショットから読む
      let mut tx = self.pool.begin().await.map_err(repository_error)?;
      sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
         .execute(&mut *tx)
         .await
         .map_err(repository_error)?;

      let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM labels")
         .fetch_one(&mut *tx)
         .await
         .map_err(repository_error)?;

      let labels: Vec<Label> =
         sqlx::query_as("SELECT id, label FROM labels ORDER BY id ASC LIMIT $1 OFFSET $2")
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(repository_error)?;

      tx.commit().await.map_err(repository_error)?;

      Ok((labels, total))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: i64) -> Result<Option<Label>, BackendError> {
      sqlx::query_as::<_, Label>("SELECT id, label FROM labels WHERE id = $1")
         .bind(id)
         .fetch_optional(&self.pool)
         .await
         .map_err(|e| BackendError::repository("find_label_by_id", e))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn update_label(&self, id: i64, label: &NullEmptyString) -> Result<(), BackendError> {
      const USECASE: &str = "update_label";

      let result = sqlx::query("UPDATE labels SET label = $1 WHERE id = $2")
         .bind(label)
         .bind(id)
         .execute(&self.pool)
         .await
         .map_err(|e| BackendError::repository(USECASE, e))?;

      ensure_single_row(USECASE, result.rows_affected())
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_ensure_single_row_1件なら成功() {
      assert!(ensure_single_row("update_label", 1).is_ok());
   }

   #[test]
   fn test_ensure_single_row_0件ならnot_found() {
      let error = ensure_single_row("update_label", 0).unwrap_err();

      assert!(matches!(error, BackendError::NotFound { entity: "Label" }));
   }

   #[test]
   fn test_ensure_single_row_2件以上ならrows_affected() {
      let error = ensure_single_row("update_label", 3).unwrap_err();

      match error {
         BackendError::RowsAffected {
            usecase,
            affected,
            expected,
            ..
         } => {
            assert_eq!(usecase, "update_label");
            assert_eq!((affected, expected), (3, 1));
         }
         other => panic!("RowsAffected を期待したが {other:?} だった"),
      }
   }
}
