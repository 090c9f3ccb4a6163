//! ゼロ値を null に畳み込まない数値ラッパー
//!
//! 0 や 0.0 を有効な値としてそのまま JSON に出力したい項目で使う。

use serde::{Deserialize, Deserializer, Serialize, Serializer};

define_null_wrapper! {
   /// ゼロ値をそのまま出力する NULL 許容の整数
   #[derive(Copy, Eq)]
   pub struct JsonNullInt64(i64);
}

define_null_wrapper! {
   /// ゼロ値をそのまま出力する NULL 許容の浮動小数点数
   #[derive(Copy)]
   pub struct JsonNullFloat64(f64);
}

impl JsonNullInt64 {
   pub fn get(&self) -> Option<i64> {
      self.0
   }

   /// リクエストパラメータ用の値
   pub fn map_for_request(&self) -> Option<i64> {
      self.0
   }

   pub fn is_empty(&self) -> bool {
      self.0.is_none()
   }

   /// DB から読み込んだ値を変換する（ゼロ値の畳み込みなし）
   pub fn from_scanned(value: Option<i64>) -> Self {
      Self(value)
   }
}

impl JsonNullFloat64 {
   pub fn get(&self) -> Option<f64> {
      self.0
   }

   /// リクエストパラメータ用の値
   pub fn map_for_request(&self) -> Option<f64> {
      self.0
   }

   pub fn is_empty(&self) -> bool {
      self.0.is_none()
   }

   /// DB から読み込んだ値を変換する（ゼロ値の畳み込みなし）
   pub fn from_scanned(value: Option<f64>) -> Self {
      Self(value)
   }
}

impl Serialize for JsonNullInt64 {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      self.0.serialize(serializer)
   }
}

impl<'de> Deserialize<'de> for JsonNullInt64 {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      Option::<i64>::deserialize(deserializer).map(Self)
   }
}

impl Serialize for JsonNullFloat64 {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      self.0.serialize(serializer)
   }
}

impl<'de> Deserialize<'de> for JsonNullFloat64 {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      Option::<f64>::deserialize(deserializer).map(Self)
   }
}
