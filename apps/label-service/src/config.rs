//! # Label Service 設定
//!
//! 環境変数から Label Service サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// `LABEL_HOST` 未設定時のバインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";

/// `LABEL_PORT` 未設定時のポート番号
const DEFAULT_PORT: u16 = 3100;

/// `DATABASE_MAX_CONNECTIONS` 未設定時の最大接続数
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// 設定の読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
   /// 必須の環境変数が設定されていない
   #[error("{0} が設定されていません")]
   Missing(&'static str),

   /// 環境変数の値を解釈できない
   #[error("{key} の値が不正です: {value:?}")]
   Invalid { key: &'static str, value: String },
}

/// Label Service サーバーの設定
#[derive(Debug, Clone)]
pub struct LabelServiceConfig {
   /// バインドアドレス
   pub host:            String,
   /// ポート番号
   pub port:            u16,
   /// データベース接続 URL
   pub database_url:    String,
   /// 接続プールの最大接続数
   pub max_connections: u32,
}

impl LabelServiceConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意の取得関数から設定を読み込む
   ///
   /// `from_env` の実体。テストでは環境変数を書き換えずに値を差し込める。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let host = lookup("LABEL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
      let port = parse_or("LABEL_PORT", lookup("LABEL_PORT"), DEFAULT_PORT)?;
      let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
      let max_connections = parse_or(
         "DATABASE_MAX_CONNECTIONS",
         lookup("DATABASE_MAX_CONNECTIONS"),
         DEFAULT_MAX_CONNECTIONS,
      )?;

      Ok(Self {
         host,
         port,
         database_url,
         max_connections,
      })
   }
}

fn parse_or<T: std::str::FromStr>(
   key: &'static str,
   value: Option<String>,
   default: T,
) -> Result<T, ConfigError> {
   match value {
      None => Ok(default),
      Some(value) => value
         .parse()
         .map_err(|_| ConfigError::Invalid { key, value }),
   }
}
