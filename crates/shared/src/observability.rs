//! # Observability 基盤
//!
//! subscriber の初期化と、HTTP リクエストごとのスパン・Request ID を扱う。

/// Request ID を運ぶヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ログ出力形式を選ぶ環境変数
const LOG_FORMAT_KEY: &str = "LOG_FORMAT";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// 1 行 1 イベントの JSON
   Json,
   #[default]
   Pretty,
}

impl LogFormat {
   /// `json` / `pretty` を解釈する（大文字小文字と前後の空白は無視）
   pub fn parse(value: &str) -> Option<Self> {
      match value.trim().to_ascii_lowercase().as_str() {
         "json" => Some(Self::Json),
         "pretty" => Some(Self::Pretty),
         _ => None,
      }
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
   /// ルートスパンの `service` フィールドに入るサービス名
   pub service_name:        String,
   pub log_format:          LogFormat,
   /// 解釈できなかった `LOG_FORMAT` の値。初期化後に警告として出力する
   pub rejected_log_format: Option<String>,
}

impl TracingConfig {
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name: service_name.into(),
         log_format,
         rejected_log_format: None,
      }
   }

   /// 環境変数から設定を読み取る
   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self::from_lookup(service_name, |key| std::env::var(key).ok())
   }

   /// 任意の参照関数から設定を読み取る
   ///
   /// `LOG_FORMAT` が未設定なら Pretty。解釈できない値も Pretty にして値を残す。
   pub fn from_lookup(
      service_name: impl Into<String>,
      lookup: impl Fn(&str) -> Option<String>,
   ) -> Self {
      let raw = lookup(LOG_FORMAT_KEY);
      let parsed = raw.as_deref().map(LogFormat::parse);

      Self {
         service_name: service_name.into(),
         log_format: parsed.flatten().unwrap_or_default(),
         rejected_log_format: match parsed {
            Some(None) => raw,
            _ => None,
         },
      }
   }
}

/// トレーシングを初期化し、サービスのルートスパンを返す
///
/// `RUST_LOG` が未設定の場合は `"info,pagekit=debug"` を使う。
/// `ErrorLayer` を登録するため、`SpanTrace::capture()` でエラー発生時のスパンを取得できる。
/// 返したスパンを `entered()` しておくと、以降のログに `service` が付く。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) -> tracing::Span {
   use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| "info,pagekit=debug".into());

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_target(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .with(tracing_error::ErrorLayer::default())
      .init();

   if let Some(rejected) = &config.rejected_log_format {
      tracing::warn!(value = %rejected, "{LOG_FORMAT_KEY} を解釈できないため pretty で出力します");
   }

   tracing::info_span!("app", service = %config.service_name)
}

/// HTTP リクエスト単位のスパンを生成する
///
/// `TraceLayer::make_span_with` に渡して使う。
/// `SetRequestIdLayer` の内側に置くと `request_id` に採番済みの ID が入る。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
   let request_id = request
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .unwrap_or("-");

   tracing::info_span!(
      "request",
      method = %request.method(),
      uri = %request.uri(),
      request_id = %request_id,
   )
}

/// UUID v7 で Request ID を採番する
///
/// 時刻順にソート可能な ID になるため、ログの時系列調査がしやすい。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
   fn make_request_id<B>(
      &mut self,
      _request: &http::Request<B>,
   ) -> Option<tower_http::request_id::RequestId> {
      let id = uuid::Uuid::now_v7().to_string();
      http::HeaderValue::from_str(&id)
         .ok()
         .map(tower_http::request_id::RequestId::new)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case::json("json", Some(LogFormat::Json))]
   #[case::大文字と空白("  JSON ", Some(LogFormat::Json))]
   #[case::pretty("pretty", Some(LogFormat::Pretty))]
   #[case::不明な値("yaml", None)]
   #[case::空文字列("", None)]
   fn test_parse(#[case] value: &str, #[case] expected: Option<LogFormat>) {
      assert_eq!(LogFormat::parse(value), expected);
   }

   #[test]
   fn test_from_lookup_未設定ならprettyで警告もしない() {
      let config = TracingConfig::from_lookup("label-service", |_| None);

      assert_eq!(config, TracingConfig::new("label-service", LogFormat::Pretty));
   }

   #[test]
   fn test_from_lookup_jsonを読み取る() {
      let config = TracingConfig::from_lookup("label-service", |key| {
         (key == "LOG_FORMAT").then(|| "json".to_string())
      });

      assert_eq!(config.log_format, LogFormat::Json);
      assert_eq!(config.rejected_log_format, None);
   }

   #[test]
   fn test_from_lookup_解釈できない値はprettyにして値を残す() {
      let config = TracingConfig::from_lookup("label-service", |_| Some("xml".to_string()));

      assert_eq!(config.log_format, LogFormat::Pretty);
      assert_eq!(config.rejected_log_format.as_deref(), Some("xml"));
   }
}
