//! # pagekit 共有ユーティリティ
//!
//! pagekit ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（core, label-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は各クレートの責務）

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, ProblemKind};
pub use health::HealthResponse;
