//! # テスト用モック
//!
//! 依存クレートのテストで使うエンベロープのビルダー。
//! `test-support` feature で公開される。

use serde_json::{Value, json};

use crate::Pageable;

/// モックエンベロープの limit（実質的に無制限）
pub const MOCK_LIMIT: i64 = 999_999;

/// `{"label": ...}` 要素を持つ型なしエンベロープを作成する
///
/// 要素型が消去された状態（JSON をそのまま受け取った状態）を再現する。
pub fn pageable_of_labels(labels: &[&str]) -> Pageable {
   let data: Vec<Value> = labels.iter().map(|label| json!({ "label": label })).collect();

   Pageable {
      limit:  MOCK_LIMIT,
      offset: 0,
      total:  data.len() as i64,
      data:   Value::Array(data),
   }
}
