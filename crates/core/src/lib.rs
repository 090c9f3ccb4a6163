//! # pagekit コア
//!
//! オフセット方式のページングと、PostgreSQL の NULL を JSON に橋渡しする
//! NULL 許容スカラー型を提供する。
//!
//! ## 設計方針
//!
//! - **ページ範囲**: クエリパラメータ `offset` / `limit` を [`Pagination`] に解析する。
//!   省略時は `offset = 0`、`limit = 500`
//! - **レスポンスエンベロープ**: [`Pageable`] は `{limit, offset, total, data}` を表す
//! - **バックエンドエラー**: [`BackendError`] はリポジトリ・リクエスト起因の失敗を
//!   構造化して保持する
//! - **NULL 許容型**: [`null`] モジュールの各型は `Option<T>` の Newtype
//!
//! ## feature
//!
//! | feature | 内容 |
//! |---|---|
//! | `axum` | `Pagination` のエクストラクタ、`BackendError` の `IntoResponse` |
//! | `postgres` | NULL 許容型の sqlx `Type` / `Decode` / `Encode` |
//! | `test-support` | [`mock`] モジュール |
//!
//! ## 使用例
//!
//! ```rust
//! use pagekit_core::{Pagination, pageable};
//!
//! let pagination = Pagination::from_query_str(Some("offset=20&limit=10")).unwrap();
//! let envelope = pageable::build(pagination, 42, vec!["a", "b"]);
//!
//! assert_eq!(envelope.offset, 20);
//! assert_eq!(envelope.limit, 10);
//! assert_eq!(envelope.total, 42);
//! ```

pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod null;
pub mod pageable;
pub mod pagination;

pub use error::{BackendError, BoxError};
pub use null::{
   JsonNullFloat64,
   JsonNullInt64,
   NullBool,
   NullEmptyString,
   NullFloat,
   NullInt,
   NullString,
   NullTime,
   NullValueError,
};
pub use pageable::{Pageable, PageableError};
pub use pagination::Pagination;
