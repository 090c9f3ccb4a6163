//! # ページネーションパラメータ
//!
//! HTTP リクエストのクエリ文字列から `offset` / `limit` を取り出し、検証する。
//!
//! ## ルール
//!
//! - 未指定の場合はデフォルト値（`offset` = 0、`limit` = 500）
//! - 整数として解釈できない値、負の値は [`BackendError::BadRequestValue`]
//! - `limit` の上限は設けない
//! - 空の値（`?offset=`）は「指定あり」として扱い、パースエラーになる
//!
//! ## 使用例
//!
//! ```rust
//! use pagekit_core::pagination::{self, Pagination};
//!
//! let page = pagination::parse(Some("20"), None).unwrap();
//! assert_eq!(page, Pagination::new(20, 500).unwrap());
//!
//! let page = Pagination::from_query_str(Some("limit=10&offset=30")).unwrap();
//! assert_eq!((page.offset(), page.limit()), (30, 10));
//! ```

use crate::BackendError;

/// `offset` のデフォルト値
pub const DEFAULT_OFFSET: i64 = 0;

/// `limit` のデフォルト値
pub const DEFAULT_LIMIT: i64 = 500;

/// `offset` のクエリパラメータ名
pub const OFFSET_KEY: &str = "offset";

/// `limit` のクエリパラメータ名
pub const LIMIT_KEY: &str = "limit";

/// ページ範囲（offset / limit の組）
///
/// リクエストごとに生成され、生成後は変更できない。
///
/// # 不変条件
///
/// - `offset` と `limit` はいずれも 0 以上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
   offset: i64,
   limit:  i64,
}

impl Pagination {
   /// ページ範囲を作成する
   ///
   /// # エラー
   ///
   /// いずれかが負の値の場合は `BackendError::BadRequestValue` を返す。
   pub fn new(offset: i64, limit: i64) -> Result<Self, BackendError> {
      ensure_non_negative(OFFSET_KEY, offset)?;
      ensure_non_negative(LIMIT_KEY, limit)?;
      Ok(Self { offset, limit })
   }

   pub fn offset(&self) -> i64 {
      self.offset
   }

   pub fn limit(&self) -> i64 {
      self.limit
   }

   /// URI のクエリ文字列（`?` より後ろ）からページ範囲を読み取る
   ///
   /// 同じキーが複数回現れた場合は最初の値を使う。
   pub fn from_query_str(query: Option<&str>) -> Result<Self, BackendError> {
      let mut offset = None;
      let mut limit = None;

      for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
         match &*key {
            OFFSET_KEY if offset.is_none() => offset = Some(value),
            LIMIT_KEY if limit.is_none() => limit = Some(value),
            _ => {}
         }
      }

      parse(offset.as_deref(), limit.as_deref())
   }
}

impl Default for Pagination {
   /// offset 0、limit [`DEFAULT_LIMIT`] のページ範囲
   fn default() -> Self {
      Self {
         offset: DEFAULT_OFFSET,
         limit:  DEFAULT_LIMIT,
      }
   }
}

/// 生のパラメータ値からページ範囲を組み立てる
///
/// `offset` を先に検証するため、両方が不正な場合は `offset` のエラーを返す。
pub fn parse(offset: Option<&str>, limit: Option<&str>) -> Result<Pagination, BackendError> {
   let offset = parse_param(OFFSET_KEY, offset, DEFAULT_OFFSET)?;
   let limit = parse_param(LIMIT_KEY, limit, DEFAULT_LIMIT)?;

   Ok(Pagination { offset, limit })
}

fn parse_param(key: &str, raw: Option<&str>, default: i64) -> Result<i64, BackendError> {
   let Some(raw) = raw else {
      return Ok(default);
   };

   let value = raw
      .parse::<i64>()
      .map_err(|e| BackendError::bad_request_value(key, e.to_string()))?;
   ensure_non_negative(key, value)?;

   Ok(value)
}

fn ensure_non_negative(key: &str, value: i64) -> Result<(), BackendError> {
   if value < 0 {
      return Err(BackendError::bad_request_value(
         key,
         format!("{key} ({value}) は負の値にできません"),
      ));
   }
   Ok(())
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Pagination
where
   S: Send + Sync,
{
   type Rejection = BackendError;

   async fn from_request_parts(
      parts: &mut axum::http::request::Parts,
      _state: &S,
   ) -> Result<Self, Self::Rejection> {
      Self::from_query_str(parts.uri.query())
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[test]
   fn test_defaultはoffset0_limit500を返す() {
      let page = Pagination::default();

      assert_eq!(page.offset(), 0);
      assert_eq!(page.limit(), 500);
   }

   #[test]
   fn test_newは負の値を拒否する() {
      assert!(Pagination::new(-1, 10).is_err());
      assert!(Pagination::new(0, -1).is_err());
      assert_eq!(Pagination::new(47, 12).unwrap().offset(), 47);
   }

   #[test]
   fn test_parse_未指定の場合はデフォルト値を返す() {
      assert_eq!(parse(None, None).unwrap(), Pagination::default());
   }

   #[rstest]
   #[case::offsetが整数でない(Some("pouet"), Some("100"), OFFSET_KEY)]
   #[case::limitが整数でない(Some("100"), Some("pouet"), LIMIT_KEY)]
   #[case::offsetが負の値(Some("-2"), Some("100"), OFFSET_KEY)]
   #[case::limitが負の値(Some("100"), Some("-2"), LIMIT_KEY)]
   #[case::offsetが空文字(Some(""), None, OFFSET_KEY)]
   #[case::両方不正ならoffsetを報告する(Some("-1"), Some("-1"), OFFSET_KEY)]
   fn test_parse_不正な値はbad_request_valueを返す(
      #[case] offset: Option<&str>,
      #[case] limit: Option<&str>,
      #[case] expected_key: &str,
   ) {
      let result = parse(offset, limit);

      assert!(matches!(
         result,
         Err(BackendError::BadRequestValue { ref key, value: None, .. }) if key == expected_key
      ));
   }

   #[rstest]
   #[case::通常(Some("0"), Some("100"), 0, 100)]
   #[case::offsetのみ指定(Some("30"), None, 30, DEFAULT_LIMIT)]
   #[case::limitのみ指定(None, Some("10"), DEFAULT_OFFSET, 10)]
   #[case::limitの上限はない(None, Some("1000000"), 0, 1_000_000)]
   #[case::limit0を許可する(None, Some("0"), 0, 0)]
   fn test_parse_正しい値を受け付ける(
      #[case] offset: Option<&str>,
      #[case] limit: Option<&str>,
      #[case] expected_offset: i64,
      #[case] expected_limit: i64,
   ) {
      let page = parse(offset, limit).unwrap();

      assert_eq!(page, Pagination::new(expected_offset, expected_limit).unwrap());
   }

   #[test]
   fn test_負の値のエラーメッセージに値が含まれる() {
      let error = parse(Some("-1"), None).unwrap_err();

      assert_eq!(
         error.to_string(),
         "不正なリクエスト: キー \"offset\" の値をパースできません: \"offset (-1) は負の値にできません\""
      );
   }

   #[rstest]
   #[case::クエリなし(None, 0, 500)]
   #[case::空のクエリ(Some(""), 0, 500)]
   #[case::空のペアを無視する(Some("offset=10&&limit=20"), 10, 20)]
   #[case::無関係なキーを無視する(Some("sort=name&limit=5"), 0, 5)]
   #[case::重複したキーは最初の値を使う(Some("limit=5&limit=-1"), 0, 5)]
   fn test_from_query_strでクエリ文字列を解釈する(
      #[case] query: Option<&str>,
      #[case] expected_offset: i64,
      #[case] expected_limit: i64,
   ) {
      let page = Pagination::from_query_str(query).unwrap();

      assert_eq!((page.offset(), page.limit()), (expected_offset, expected_limit));
   }

   #[test]
   fn test_from_query_strで負の値を拒否する() {
      assert!(Pagination::from_query_str(Some("offset=-1")).is_err());
      assert!(Pagination::from_query_str(Some("limit=-1")).is_err());
   }
}
