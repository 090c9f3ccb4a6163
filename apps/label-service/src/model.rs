//! # ラベル
//!
//! `labels` テーブルの 1 行と、更新リクエストの形を定義する。

use pagekit_core::NullEmptyString;
use serde::{Deserialize, Serialize};

/// ラベル
///
/// `label` が NULL の行は JSON では空文字列として返る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Label {
   pub id:    i64,
   #[serde(default)]
   pub label: NullEmptyString,
}

/// ラベル更新リクエスト
///
/// `label` キーが存在しない場合は NULL で更新する。
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLabelRequest {
   #[serde(default)]
   pub label: NullEmptyString,
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use serde_json::json;

   use super::*;

   #[test]
   fn test_labelが未設定の行は空文字列として出力される() {
      let label = Label {
         id:    1,
         label: NullEmptyString::null(),
      };

      assert_eq!(
         serde_json::to_value(&label).unwrap(),
         json!({ "id": 1, "label": "" })
      );
   }

   #[test]
   fn test_更新リクエストのlabelキー省略は無効になる() {
      let request: UpdateLabelRequest = serde_json::from_str("{}").unwrap();

      assert!(!request.label.is_valid());
   }

   #[test]
   fn test_更新リクエストのnullは空文字列になる() {
      let request: UpdateLabelRequest = serde_json::from_str(r#"{"label": null}"#).unwrap();

      assert_eq!(request.label.as_str(), Some(""));
   }
}
