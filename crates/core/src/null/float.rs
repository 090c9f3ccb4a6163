use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::NullValueError;

/// DB から読み込んだ値を丸める桁の倍率（小数点以下 4 桁）
const SCAN_PRECISION: f64 = 10_000.0;

define_null_wrapper! {
   /// NULL 許容の浮動小数点数
   ///
   /// 0.0 は JSON では null として出力し、DB から読み込んだ場合は無効として扱う。
   #[derive(Copy)]
   pub struct NullFloat(f64);
}

impl NullFloat {
   /// 有効な値を返す
   pub fn get(&self) -> Option<f64> {
      self.0
   }

   /// 無効、または 0.0 の場合に true
   pub fn is_empty(&self) -> bool {
      self.0.is_none_or(|value| value == 0.0)
   }

   /// `f32` に変換する
   ///
   /// # エラー
   ///
   /// 絶対値が `f32::MAX` を超える場合は `NullValueError::OutOfRange` を返す。
   pub fn to_f32(self) -> Result<Option<f32>, NullValueError> {
      self.0
         .map(|value| {
            if value.abs() > f64::from(f32::MAX) {
               return Err(NullValueError::OutOfRange {
                  value:  value.to_string(),
                  target: "f32",
               });
            }
            Ok(value as f32)
         })
         .transpose()
   }

   /// DB から読み込んだ値を変換する
   ///
   /// - NaN と 0.0 は無効になる
   /// - 小数点以下 4 桁より下は 0 方向に切り捨てる
   pub fn from_scanned(value: Option<f64>) -> Self {
      let value = value
         .filter(|v| !v.is_nan())
         .map(|v| (v * SCAN_PRECISION).trunc() / SCAN_PRECISION)
         .filter(|v| *v != 0.0);
      Self(value)
   }
}

impl Serialize for NullFloat {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      match self.0 {
         Some(value) if value != 0.0 => serializer.serialize_f64(value),
         _ => serializer.serialize_none(),
      }
   }
}

impl<'de> Deserialize<'de> for NullFloat {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      Option::<f64>::deserialize(deserializer).map(Self)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case::小数(NullFloat::new(1.5), "1.5")]
   #[case::ゼロはnull(NullFloat::new(0.0), "null")]
   #[case::無効はnull(NullFloat::null(), "null")]
   fn test_serialize(#[case] value: NullFloat, #[case] expected: &str) {
      assert_eq!(serde_json::to_string(&value).unwrap(), expected);
   }

   #[rstest]
   #[case::小数("2.25", Some(2.25))]
   #[case::整数("3", Some(3.0))]
   #[case::null("null", None)]
   fn test_deserialize(#[case] json: &str, #[case] expected: Option<f64>) {
      let value: NullFloat = serde_json::from_str(json).unwrap();

      assert_eq!(value.get(), expected);
   }

   #[test]
   fn test_deserialize_数値以外はエラーになる() {
      assert!(serde_json::from_str::<NullFloat>("\"1.5\"").is_err());
   }

   #[test]
   fn test_jsonを経由すると有効な値が保たれゼロは無効になる() {
      let round_trip = |value: NullFloat| -> NullFloat {
         serde_json::from_str(&serde_json::to_string(&value).unwrap()).unwrap()
      };

      assert_eq!(round_trip(NullFloat::new(0.125)), NullFloat::new(0.125));
      assert_eq!(round_trip(NullFloat::null()), NullFloat::null());
      assert_eq!(round_trip(NullFloat::new(0.0)), NullFloat::null());
   }

   #[rstest]
   #[case::小数点以下4桁に切り捨てる(Some(1.234_56), Some(1.2345))]
   #[case::負の値も0方向に切り捨てる(Some(-1.234_56), Some(-1.2345))]
   #[case::切り捨ててゼロになれば無効(Some(0.000_01), None)]
   #[case::ゼロは無効(Some(0.0), None)]
   #[case::nanは無効(Some(f64::NAN), None)]
   #[case::nullは無効(None, None)]
   fn test_from_scanned(#[case] scanned: Option<f64>, #[case] expected: Option<f64>) {
      assert_eq!(NullFloat::from_scanned(scanned).get(), expected);
   }

   #[test]
   fn test_is_emptyは無効またはゼロでtrue() {
      assert!(NullFloat::null().is_empty());
      assert!(NullFloat::new(0.0).is_empty());
      assert!(!NullFloat::new(0.5).is_empty());
   }

   #[test]
   fn test_to_f32は範囲内の値を変換する() {
      assert_eq!(NullFloat::new(1.5).to_f32(), Ok(Some(1.5_f32)));
      assert_eq!(NullFloat::null().to_f32(), Ok(None));
   }

   #[test]
   fn test_to_f32は範囲外の値でエラーを返す() {
      assert!(NullFloat::new(f64::MAX).to_f32().is_err());
      assert!(NullFloat::new(-f64::MAX).to_f32().is_err());
   }
}
