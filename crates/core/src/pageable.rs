//! # ページ付きレスポンスエンベロープ
//!
//! ページ範囲・全件数・ペイロードをひとつにまとめたレスポンス型。
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "limit": 500,
//!   "offset": 0,
//!   "total": 1234,
//!   "data": [...]
//! }
//! ```
//!
//! `total` は結果集合全体の件数であり、`data` の要素数とは独立している。
//!
//! ## 型付きと型なし
//!
//! - サーバー側は [`build`] で `Pageable<Vec<T>>` を組み立てて返す
//! - クライアント側は `Pageable<Vec<T>>` として直接デシリアライズできる
//! - 要素型が分からない段階で受け取ったエンベロープ（`Pageable<Value>`）は
//!   [`Pageable::decode`] で後から型付きのベクタに変換する

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::Pagination;

/// ページ付きレスポンス
///
/// 型パラメータを省略した `Pageable` はペイロードの型が確定していない
/// エンベロープ（`data` が任意の JSON 値）を表す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pageable<T = Value> {
   pub limit:  i64,
   pub offset: i64,
   pub total:  i64,
   pub data:   T,
}

/// 型なしエンベロープの変換エラー
#[derive(Debug, Error)]
pub enum PageableError {
   /// `data` が配列ではない
   #[error("data フィールドが配列ではありません（実際の型: {found}）")]
   NotASequence { found: &'static str },

   /// 要素を目的の型に変換できない
   #[error("data[{index}] を {type_name} に変換できません: {source}")]
   Element {
      index:     usize,
      type_name: &'static str,
      #[source]
      source:    serde_json::Error,
   },
}

/// ページ範囲・全件数・データからエンベロープを組み立てる
///
/// ## 使用例
///
/// ```
/// use pagekit_core::{Pagination, pageable};
///
/// let page = Pagination::new(47, 12).unwrap();
/// let envelope = pageable::build(page, 1, vec!["hello"]);
///
/// assert_eq!((envelope.offset, envelope.limit, envelope.total), (47, 12, 1));
/// assert_eq!(envelope.data, vec!["hello"]);
/// ```
pub fn build<T>(pagination: Pagination, total: i64, data: Vec<T>) -> Pageable<Vec<T>> {
   Pageable {
      limit: pagination.limit(),
      offset: pagination.offset(),
      total,
      data,
   }
}

impl<T> Pageable<T> {
   /// ページ情報を保ったままペイロードを変換する
   pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Pageable<U> {
      Pageable {
         limit:  self.limit,
         offset: self.offset,
         total:  self.total,
         data:   f(self.data),
      }
   }
}

impl<T: Serialize> Pageable<T> {
   /// ペイロードを JSON 値に変換した型なしエンベロープを返す
   pub fn into_erased(self) -> Result<Pageable, serde_json::Error> {
      let data = serde_json::to_value(&self.data)?;
      Ok(self.map(|_| data))
   }
}

impl Pageable<Value> {
   /// ペイロードを型 `T` のベクタに変換する
   ///
   /// `data` は JSON 配列である必要がある。
   /// ひとつでも変換できない要素があればエラーを返し、途中までの結果は返さない。
   pub fn decode<T: DeserializeOwned>(self) -> Result<Vec<T>, PageableError> {
      let elements = match self.data {
         Value::Array(elements) => elements,
         other => {
            return Err(PageableError::NotASequence {
               found: json_kind(&other),
            });
         }
      };

      elements
         .into_iter()
         .enumerate()
         .map(|(index, element)| {
            serde_json::from_value(element).map_err(|source| PageableError::Element {
               index,
               type_name: std::any::type_name::<T>(),
               source,
            })
         })
         .collect()
   }
}

fn json_kind(value: &Value) -> &'static str {
   match value {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Number(_) => "number",
      Value::String(_) => "string",
      Value::Array(_) => "array",
      Value::Object(_) => "object",
   }
}
