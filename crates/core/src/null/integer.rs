use std::fmt;

use serde::{
   Deserialize,
   Deserializer,
   Serialize,
   Serializer,
   de::{self, Unexpected, Visitor},
};

use super::NullValueError;

define_null_wrapper! {
   /// NULL 許容の整数
   ///
   /// 0 は JSON では null として出力し、DB から読み込んだ場合は無効として扱う。
   #[derive(Copy, Eq)]
   pub struct NullInt(i64);
}

impl NullInt {
   /// 有効な値を返す
   pub fn get(&self) -> Option<i64> {
      self.0
   }

   /// 無効、または 0 の場合に true
   pub fn is_empty(&self) -> bool {
      matches!(self.0, None | Some(0))
   }

   /// `i32` に変換する
   ///
   /// # エラー
   ///
   /// 値が `i32` の範囲外の場合は `NullValueError::OutOfRange` を返す。
   pub fn to_i32(self) -> Result<Option<i32>, NullValueError> {
      self.0
         .map(|value| {
            i32::try_from(value).map_err(|_| NullValueError::OutOfRange {
               value:  value.to_string(),
               target: "i32",
            })
         })
         .transpose()
   }

   /// DB から読み込んだ値を変換する（0 は無効になる）
   pub fn from_scanned(value: Option<i64>) -> Self {
      Self(value.filter(|v| *v != 0))
   }
}

impl Serialize for NullInt {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      match self.0 {
         Some(value) if value != 0 => serializer.serialize_i64(value),
         _ => serializer.serialize_none(),
      }
   }
}

/// JSON の数値を受け付ける Visitor
///
/// 小数は 0 方向に切り捨てる（`3.7` → 3）。
struct NullIntVisitor;

impl<'de> Visitor<'de> for NullIntVisitor {
   type Value = NullInt;

   fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("数値または null")
   }

   fn visit_none<E: de::Error>(self) -> Result<NullInt, E> {
      Ok(NullInt::null())
   }

   fn visit_unit<E: de::Error>(self) -> Result<NullInt, E> {
      Ok(NullInt::null())
   }

   fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NullInt, D::Error> {
      deserializer.deserialize_any(self)
   }

   fn visit_i64<E: de::Error>(self, value: i64) -> Result<NullInt, E> {
      Ok(NullInt::new(value))
   }

   fn visit_u64<E: de::Error>(self, value: u64) -> Result<NullInt, E> {
      i64::try_from(value)
         .map(NullInt::new)
         .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
   }

   fn visit_f64<E: de::Error>(self, value: f64) -> Result<NullInt, E> {
      if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
         return Err(E::invalid_value(Unexpected::Float(value), &self));
      }
      Ok(NullInt::new(value.trunc() as i64))
   }
}

impl<'de> Deserialize<'de> for NullInt {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      deserializer.deserialize_option(NullIntVisitor)
   }
}
