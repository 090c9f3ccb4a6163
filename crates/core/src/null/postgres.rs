//! PostgreSQL との相互変換（sqlx）
//!
//! `Decode` は NULL を無効として受け取り、それ以外は各型の `from_scanned` に委譲する。
//! `Encode` は無効な値を NULL として書き込む。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{
   Decode,
   Encode,
   Type,
   TypeInfo,
   ValueRef,
   encode::IsNull,
   error::BoxDynError,
   postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres},
};

use super::{
   JsonNullFloat64,
   JsonNullInt64,
   NullBool,
   NullEmptyString,
   NullFloat,
   NullInt,
   NullString,
   NullTime,
};

/// `Type` と `Encode` を内部の型に委譲して実装する
///
/// `compatible` には読み込みを受け付ける追加の型を並べる。
macro_rules! impl_pg_type {
   ($Name:ty => $Inner:ty $(, $Compat:ty)*) => {
      impl Type<Postgres> for $Name {
         fn type_info() -> PgTypeInfo {
            <$Inner as Type<Postgres>>::type_info()
         }

         fn compatible(ty: &PgTypeInfo) -> bool {
            <$Inner as Type<Postgres>>::compatible(ty)
               $(|| <$Compat as Type<Postgres>>::compatible(ty))*
         }
      }

      impl<'q> Encode<'q, Postgres> for $Name {
         fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
            <Option<$Inner> as Encode<'q, Postgres>>::encode_by_ref(&self.0, buf)
         }
      }
   };
}

impl_pg_type!(NullBool => bool);
impl_pg_type!(NullInt => i64, i32, i16);
impl_pg_type!(NullFloat => f64, f32);
impl_pg_type!(NullString => String);
impl_pg_type!(NullEmptyString => String);
impl_pg_type!(NullTime => DateTime<Utc>, NaiveDateTime, NaiveDate);
impl_pg_type!(JsonNullInt64 => i64, i32, i16);
impl_pg_type!(JsonNullFloat64 => f64, f32);

/// 列の型名（`INT4` など）
fn column_type_name(value: &PgValueRef<'_>) -> String {
   value.type_info().name().to_owned()
}

fn decode_integer(value: PgValueRef<'_>) -> Result<i64, BoxDynError> {
   match column_type_name(&value).as_str() {
      "INT2" => Ok(i64::from(<i16 as Decode<Postgres>>::decode(value)?)),
      "INT4" => Ok(i64::from(<i32 as Decode<Postgres>>::decode(value)?)),
      _ => <i64 as Decode<Postgres>>::decode(value),
   }
}

fn decode_float(value: PgValueRef<'_>) -> Result<f64, BoxDynError> {
   match column_type_name(&value).as_str() {
      "FLOAT4" => Ok(f64::from(<f32 as Decode<Postgres>>::decode(value)?)),
      _ => <f64 as Decode<Postgres>>::decode(value),
   }
}

impl<'r> Decode<'r, Postgres> for NullBool {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      let scanned = <bool as Decode<Postgres>>::decode(value)?;
      Ok(Self::from_scanned(Some(scanned)))
   }
}

impl<'r> Decode<'r, Postgres> for NullInt {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      Ok(Self::from_scanned(Some(decode_integer(value)?)))
   }
}

impl<'r> Decode<'r, Postgres> for NullFloat {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      Ok(Self::from_scanned(Some(decode_float(value)?)))
   }
}

impl<'r> Decode<'r, Postgres> for NullString {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      let scanned = <String as Decode<Postgres>>::decode(value)?;
      Ok(Self::from_scanned(Some(scanned)))
   }
}

impl<'r> Decode<'r, Postgres> for NullEmptyString {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      let scanned = <String as Decode<Postgres>>::decode(value)?;
      Ok(Self::from_scanned(Some(scanned)))
   }
}

impl<'r> Decode<'r, Postgres> for NullTime {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      match column_type_name(&value).as_str() {
         "DATE" => {
            let scanned = <NaiveDate as Decode<Postgres>>::decode(value)?;
            Ok(Self::from_scanned_date(Some(scanned)))
         }
         "TIMESTAMP" => {
            let scanned = <NaiveDateTime as Decode<Postgres>>::decode(value)?;
            Ok(Self::from_scanned_naive(Some(scanned)))
         }
         _ => {
            let scanned = <DateTime<Utc> as Decode<Postgres>>::decode(value)?;
            Ok(Self::from_scanned(Some(scanned)))
         }
      }
   }
}

impl<'r> Decode<'r, Postgres> for JsonNullInt64 {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      Ok(Self::from_scanned(Some(decode_integer(value)?)))
   }
}

impl<'r> Decode<'r, Postgres> for JsonNullFloat64 {
   fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
      if value.is_null() {
         return Ok(Self::null());
      }
      Ok(Self::from_scanned(Some(decode_float(value)?)))
   }
}
