// タグバリデーション機能のモジュール
// 入力欄レベルの制約（長さ）はここで扱い、変換処理には持ち込まない

use crate::config::tags;
use crate::errors::{AppError, AppResult};

pub fn is_valid_tag(tag_text: &str) -> bool {
    let trimmed = tag_text.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= tags::MAX_TAG_LENGTH
}

/// タグ名を検証し、違反があれば `tags` フィールドのバリデーションエラーを返す
pub fn validate_tag_name(tag_text: &str) -> AppResult<()> {
    if tag_text.trim().is_empty() {
        return Err(AppError::validation(
            tags::FIELD_NAME,
            "タグ名は空にできません",
        ));
    }
    if !is_valid_tag(tag_text) {
        return Err(AppError::validation(
            tags::FIELD_NAME,
            format!(
                "タグ名「{}」は{}文字以内で入力してください",
                tag_text.trim(),
                tags::MAX_TAG_LENGTH
            ),
        ));
    }
    Ok(())
}
