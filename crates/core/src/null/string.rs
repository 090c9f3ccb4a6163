use serde::{Deserialize, Deserializer, Serialize, Serializer};

define_null_wrapper! {
   /// NULL 許容の文字列
   ///
   /// 空文字列は JSON では null として出力し、DB から読み込んだ場合は無効として扱う。
   #[derive(Eq)]
   pub struct NullString(String);
}

define_null_wrapper! {
   /// 空文字列を有効な値として扱う NULL 許容の文字列
   ///
   /// - 無効な値は JSON では `""` として出力する
   /// - JSON の null は有効な空文字列として読み込む
   /// - DB の NULL は無効として読み込む（空文字列は有効のまま）
   #[derive(Eq)]
   pub struct NullEmptyString(String);
}

impl NullString {
   /// 有効な値を返す
   pub fn as_str(&self) -> Option<&str> {
      self.0.as_deref()
   }

   /// 有効な値の複製を返す
   pub fn map_to_string(&self) -> Option<String> {
      self.0.clone()
   }

   /// 無効、または空文字列の場合に true
   pub fn is_empty(&self) -> bool {
      self.0.as_deref().is_none_or(str::is_empty)
   }

   /// DB から読み込んだ値を変換する（空文字列は無効になる）
   pub fn from_scanned(value: Option<String>) -> Self {
      Self(value.filter(|v| !v.is_empty()))
   }
}

impl NullEmptyString {
   /// 有効な値を返す
   pub fn as_str(&self) -> Option<&str> {
      self.0.as_deref()
   }

   /// 有効な値の複製を返す
   pub fn map_to_string(&self) -> Option<String> {
      self.0.clone()
   }

   /// 無効、または空文字列の場合に true
   pub fn is_empty(&self) -> bool {
      self.0.as_deref().is_none_or(str::is_empty)
   }

   /// DB から読み込んだ値を変換する
   ///
   /// 空文字列は有効な値のまま保持する。
   pub fn from_scanned(value: Option<String>) -> Self {
      Self(value)
   }
}

impl Serialize for NullString {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      match self.0.as_deref() {
         Some(value) if !value.is_empty() => serializer.serialize_str(value),
         _ => serializer.serialize_none(),
      }
   }
}

impl<'de> Deserialize<'de> for NullString {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      Option::<String>::deserialize(deserializer).map(Self)
   }
}

impl Serialize for NullEmptyString {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      serializer.serialize_str(self.0.as_deref().unwrap_or_default())
   }
}

impl<'de> Deserialize<'de> for NullEmptyString {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      let value = Option::<String>::deserialize(deserializer)?;
      Ok(Self(Some(value.unwrap_or_default())))
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   // ===== NullString =====

   #[rstest]
   #[case::文字列(NullString::new("abc"), r#""abc""#)]
   #[case::空文字列はnull(NullString::new(""), "null")]
   #[case::無効はnull(NullString::null(), "null")]
   fn test_null_string_serialize(#[case] value: NullString, #[case] expected: &str) {
      assert_eq!(serde_json::to_string(&value).unwrap(), expected);
   }

   #[rstest]
   #[case::文字列(r#""abc""#, Some("abc"))]
   #[case::空文字列は有効(r#""""#, Some(""))]
   #[case::null("null", None)]
   fn test_null_string_deserialize(#[case] json: &str, #[case] expected: Option<&str>) {
      let value: NullString = serde_json::from_str(json).unwrap();

      assert_eq!(value.as_str(), expected);
   }

   #[test]
   fn test_null_string_deserialize_文字列以外はエラーになる() {
      assert!(serde_json::from_str::<NullString>("1").is_err());
   }

   #[test]
   fn test_null_string_jsonを経由すると空文字列は無効になる() {
      let json = serde_json::to_string(&NullString::new("")).unwrap();
      let value: NullString = serde_json::from_str(&json).unwrap();

      assert_eq!(value, NullString::null());
   }

   #[test]
   fn test_null_string_from_scannedは空文字列を無効にする() {
      assert_eq!(NullString::from_scanned(Some(String::new())), NullString::null());
      assert_eq!(NullString::from_scanned(None), NullString::null());
      assert_eq!(
         NullString::from_scanned(Some("x".to_string())),
         NullString::new("x")
      );
   }

   #[test]
   fn test_null_string_is_emptyは無効または空文字列でtrue() {
      assert!(NullString::null().is_empty());
      assert!(NullString::new("").is_empty());
      assert!(!NullString::new("a").is_empty());
   }

   #[test]
   fn test_null_string_map_to_stringは有効な値を複製する() {
      assert_eq!(NullString::new("a").map_to_string(), Some("a".to_string()));
      assert_eq!(NullString::null().map_to_string(), None);
   }

   // ===== NullEmptyString =====

   #[rstest]
   #[case::文字列(NullEmptyString::new("abc"), r#""abc""#)]
   #[case::空文字列(NullEmptyString::new(""), r#""""#)]
   #[case::無効は空文字列(NullEmptyString::null(), r#""""#)]
   fn test_null_empty_string_serialize(#[case] value: NullEmptyString, #[case] expected: &str) {
      assert_eq!(serde_json::to_string(&value).unwrap(), expected);
   }

   #[rstest]
   #[case::文字列(r#""abc""#, Some("abc"))]
   #[case::空文字列(r#""""#, Some(""))]
   #[case::nullは有効な空文字列("null", Some(""))]
   fn test_null_empty_string_deserialize(#[case] json: &str, #[case] expected: Option<&str>) {
      let value: NullEmptyString = serde_json::from_str(json).unwrap();

      assert_eq!(value.as_str(), expected);
   }

   #[test]
   fn test_null_empty_string_deserialize_文字列以外はエラーになる() {
      assert!(serde_json::from_str::<NullEmptyString>("false").is_err());
   }

   #[test]
   fn test_null_empty_string_from_scannedは空文字列を有効のまま保持する() {
      assert_eq!(
         NullEmptyString::from_scanned(Some(String::new())),
         NullEmptyString::new("")
      );
      assert!(!NullEmptyString::from_scanned(None).is_valid());
   }
}
