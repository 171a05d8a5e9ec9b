use log::warn;

use crate::database::Tag;
use crate::errors::AppResult;
use crate::repositories::TagLookup;
use crate::tag_reconciler::TagReconciler;
use crate::tag_validator::validate_tag_name;

/// 記事フォームのタグ入力欄（文字列1つで入出力する）
pub struct TagsInputField<'r, 'a, L: TagLookup + ?Sized> {
    reconciler: &'r TagReconciler<'a, L>,
}

impl<'r, 'a, L: TagLookup + ?Sized> TagsInputField<'r, 'a, L> {
    pub fn new(reconciler: &'r TagReconciler<'a, L>) -> Self {
        Self { reconciler }
    }

    /// 送信された文字列をTag列に変換し、各タグ名を検証する
    pub fn submit(&self, raw: &str) -> AppResult<Vec<Tag>> {
        let tags = self.reconciler.parse(raw)?;
        for tag in &tags {
            if let Err(e) = validate_tag_name(&tag.name) {
                warn!("Rejected tags input: {e}");
                return Err(e);
            }
        }
        Ok(tags)
    }

    pub fn render(&self, tags: &[Tag]) -> String {
        self.reconciler.serialize(tags)
    }
}
