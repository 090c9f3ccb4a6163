//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、永続化はリポジトリに委譲する

pub mod health;
pub mod label;

pub use health::health_check;
pub use label::{LabelState, get_label, list_labels, update_label};
