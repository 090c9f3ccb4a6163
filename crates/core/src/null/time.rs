use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};
use serde::{
   Deserialize,
   Deserializer,
   Serialize,
   Serializer,
   de::{self, Visitor},
};

/// JSON の日付フォーマット
const DATE_FORMAT: &str = "%Y-%m-%d";

define_null_wrapper! {
   /// NULL 許容の日時（UTC）
   ///
   /// ゼロ時刻（`0001-01-01T00:00:00Z`）は JSON では null として出力し、
   /// DB から読み込んだ場合は無効として扱う。
   /// JSON には日付部分（`YYYY-MM-DD`）のみを出力する。
   #[derive(Copy, Eq)]
   pub struct NullTime(DateTime<Utc>);
}

/// ゼロ時刻かどうか
fn is_zero_time(value: &DateTime<Utc>) -> bool {
   value.year() == 1
      && value.ordinal() == 1
      && value.num_seconds_from_midnight() == 0
      && value.nanosecond() == 0
}

/// 日付を UTC の 0 時に変換する
fn date_to_utc_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
   date.and_hms_opt(0, 0, 0).map(|value| value.and_utc())
}

/// ゼロ埋めされた `YYYY-MM-DD` のみを日付として解釈する
///
/// `NaiveDate::parse_from_str` は桁不足や前置空白を許すため、形を先に確かめる。
fn parse_date(value: &str) -> Option<NaiveDate> {
   let bytes = value.as_bytes();
   let well_formed = bytes.len() == 10
      && bytes.iter().enumerate().all(|(i, b)| match i {
         4 | 7 => *b == b'-',
         _ => b.is_ascii_digit(),
      });
   if !well_formed {
      return None;
   }
   NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

impl NullTime {
   /// 有効な値を返す
   pub fn get(&self) -> Option<DateTime<Utc>> {
      self.0
   }

   /// 有効かつゼロ時刻の場合に true
   pub fn is_zero(&self) -> bool {
      self.0.as_ref().is_some_and(is_zero_time)
   }

   /// 無効、またはゼロ時刻の場合に true
   pub fn is_empty(&self) -> bool {
      self.0.as_ref().is_none_or(is_zero_time)
   }

   /// RFC 3339 形式（秒精度、`Z` 表記）の文字列を返す
   pub fn map_to_string(&self) -> Option<String> {
      self.0
         .map(|value| value.to_rfc3339_opts(SecondsFormat::Secs, true))
   }

   /// 自身が `other` 以降かどうか
   ///
   /// 無効な値はゼロ時刻として扱う。
   /// 両方ゼロなら true、どちらか一方だけがゼロなら false。
   pub fn after_or_equal(&self, other: &NullTime) -> bool {
      match (self.non_zero(), other.non_zero()) {
         (None, None) => true,
         (Some(_), None) | (None, Some(_)) => false,
         (Some(lhs), Some(rhs)) => lhs >= rhs,
      }
   }

   /// 自身が `other` 以前かどうか
   ///
   /// 無効な値はゼロ時刻として扱う。
   /// 両方ゼロなら true、自身だけがゼロなら false、`other` だけがゼロなら true。
   pub fn before_or_equal(&self, other: &NullTime) -> bool {
      match (self.non_zero(), other.non_zero()) {
         (None, None) | (Some(_), None) => true,
         (None, Some(_)) => false,
         (Some(lhs), Some(rhs)) => lhs <= rhs,
      }
   }

   /// TIMESTAMPTZ から読み込んだ値を変換する（ゼロ時刻は無効になる）
   pub fn from_scanned(value: Option<DateTime<Utc>>) -> Self {
      Self(value.filter(|v| !is_zero_time(v)))
   }

   /// TIMESTAMP から読み込んだ値を変換する
   ///
   /// 時刻部分は捨て、日付の UTC 0 時として扱う。
   pub fn from_scanned_naive(value: Option<NaiveDateTime>) -> Self {
      Self::from_scanned_date(value.map(|v| v.date()))
   }

   /// DATE から読み込んだ値を変換する（日付の UTC 0 時として扱う）
   pub fn from_scanned_date(value: Option<NaiveDate>) -> Self {
      Self::from_scanned(value.and_then(date_to_utc_midnight))
   }

   fn non_zero(&self) -> Option<DateTime<Utc>> {
      self.0.filter(|v| !is_zero_time(v))
   }
}

impl Serialize for NullTime {
   fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      match self.non_zero() {
         Some(value) => serializer.collect_str(&value.format(DATE_FORMAT)),
         None => serializer.serialize_none(),
      }
   }
}

/// `YYYY-MM-DD`、次いで RFC 3339 として解釈する Visitor
struct NullTimeVisitor;

impl<'de> Visitor<'de> for NullTimeVisitor {
   type Value = NullTime;

   fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("YYYY-MM-DD または RFC 3339 形式の文字列、もしくは null")
   }

   fn visit_none<E: de::Error>(self) -> Result<NullTime, E> {
      Ok(NullTime::null())
   }

   fn visit_unit<E: de::Error>(self) -> Result<NullTime, E> {
      Ok(NullTime::null())
   }

   fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NullTime, D::Error> {
      deserializer.deserialize_str(self)
   }

   fn visit_str<E: de::Error>(self, value: &str) -> Result<NullTime, E> {
      if let Some(date) = parse_date(value).and_then(date_to_utc_midnight)
      {
         return Ok(NullTime::new(date));
      }

      DateTime::parse_from_rfc3339(value)
         .map(|parsed| NullTime::new(parsed.with_timezone(&Utc)))
         .map_err(|e| E::custom(format!("日時として解釈できません: {value} ({e})")))
   }
}

impl<'de> Deserialize<'de> for NullTime {
   fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      deserializer.deserialize_option(NullTimeVisitor)
   }
}
