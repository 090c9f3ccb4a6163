//! # NULL 許容スカラー型
//!
//! PostgreSQL の NULL と JSON の null を橋渡しするラッパー型群。
//!
//! ## 設計方針
//!
//! - **`Option<T>` の Newtype**: `None` が「無効（NULL）」を表す。無効なときに
//!   値が残ることは構造上ありえない
//! - **表示上の規約**: 一部の型は「有効だがゼロ値」（0、0.0、空文字列、ゼロ時刻）を
//!   JSON では null として出力し、DB から読み込む際も無効として扱う。
//!   これは表示上の規約であり、DB の NULL と同一視するものではない
//! - **DB 読み込み規則の分離**: 各型の `from_scanned` が読み込み時の規則を持ち、
//!   sqlx の `Decode` 実装（`postgres` feature）はそれに委譲する
//!
//! ## 型一覧
//!
//! | 型 | 値 | ゼロ値を null 扱い |
//! |---|---|---|
//! | [`NullBool`] | `bool` | しない |
//! | [`NullInt`] | `i64` | する（0） |
//! | [`NullFloat`] | `f64` | する（0.0） |
//! | [`NullString`] | `String` | する（空文字列） |
//! | [`NullEmptyString`] | `String` | しない（無効は `""` として出力） |
//! | [`NullTime`] | `DateTime<Utc>` | する（ゼロ時刻） |
//! | [`JsonNullInt64`] | `i64` | しない |
//! | [`JsonNullFloat64`] | `f64` | しない |
//!
//! ## 構造体のフィールドとして使う場合
//!
//! JSON にキー自体が存在しない場合も無効として扱いたいときは
//! `#[serde(default)]` を付ける。

use thiserror::Error;

/// NULL 許容ラッパーの共通メソッドを生成する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - `Option<$Inner>` をラップする Newtype 構造体
/// - `derive(Debug, Clone, PartialEq, Default)`（`Default` は無効）
/// - `new()` / `null()` / `is_valid()` / `into_inner()`
/// - `From<$Inner>` / `From<Option<$Inner>>` / `From<$Name> for Option<$Inner>`
macro_rules! define_null_wrapper {
   (
      $(#[$meta:meta])*
      $vis:vis struct $Name:ident($Inner:ty);
   ) => {
      $(#[$meta])*
      #[derive(Debug, Clone, PartialEq, Default)]
      $vis struct $Name(pub(super) Option<$Inner>);

      impl $Name {
         /// 有効な値を持つラッパーを作成する
         pub fn new(value: impl Into<$Inner>) -> Self {
            Self(Some(value.into()))
         }

         /// 無効（NULL）のラッパーを作成する
         pub const fn null() -> Self {
            Self(None)
         }

         /// 値が有効かどうか
         pub const fn is_valid(&self) -> bool {
            self.0.is_some()
         }

         /// 内部の `Option` を取り出す
         pub fn into_inner(self) -> Option<$Inner> {
            self.0
         }
      }

      impl From<$Inner> for $Name {
         fn from(value: $Inner) -> Self {
            Self(Some(value))
         }
      }

      impl From<Option<$Inner>> for $Name {
         fn from(value: Option<$Inner>) -> Self {
            Self(value)
         }
      }

      impl From<$Name> for Option<$Inner> {
         fn from(value: $Name) -> Self {
            value.0
         }
      }
   };
}

mod boolean;
mod float;
mod integer;
mod json;
#[cfg(feature = "postgres")]
mod postgres;
mod string;
mod time;

pub use boolean::NullBool;
pub use float::NullFloat;
pub use integer::NullInt;
pub use json::{JsonNullFloat64, JsonNullInt64};
pub use string::{NullEmptyString, NullString};
pub use time::NullTime;

/// 有効な値を別の型に変換するときのエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NullValueError {
   /// 変換先の型の範囲外
   #[error("{value} は {target} の範囲外のため変換できません")]
   OutOfRange {
      value:  String,
      target: &'static str,
   },
}
