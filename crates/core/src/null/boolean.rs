use serde::{Deserialize, Deserializer, Serialize, Serializer};

define_null_wrapper! {
   /// NULL 許容の真偽値
   ///
   /// `false` は有効な値として JSON に出力する（null にしない）。
   #[derive(Copy, Eq)]
   pub struct NullBool(bool);
}

impl NullBool {
   /// 有効な値を返す
   pub fn get(&self) -> Option<bool> {
      self.0
   }

   /// 無効、または `false` の場合に true
   pub fn is_empty(&self) -> bool {
      !self.0.unwrap_or(false)
   }

   /// リクエストパラメータ用の整数表現（`true` → 1、`false` → 0）
   pub fn map_for_request(&self) -> Option<i32> {
      self.0.map(i32::from)
   }

   /// DB から読み込んだ値を変換する
   ///
   /// 真偽値はゼロ値の畳み込みを行わない。
   pub fn from_scanned(value: Option<bool>) -> Self {
      Self(value)
   }
}

impl Serialize for NullBool {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      match self.0 {
         Some(value) => serializer.serialize_bool(value),
         None => serializer.serialize_none(),
      }
   }
}

impl<'de> Deserialize<'de> for NullBool {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      Option::<bool>::deserialize(deserializer).map(Self)
   }
}
