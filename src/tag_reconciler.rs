// タグ入力文字列とTagエンティティ列の相互変換

use log::{debug, error};
use std::collections::HashSet;

use crate::config;
use crate::database::Tag;
use crate::errors::{AppError, AppResult};
use crate::repositories::TagLookup;

/// カンマ区切りの文字列をタグ名の列に正規化する
///
/// 各要素をトリムし、空要素を捨て、最初の出現を残して重複を除く。
pub fn split_tag_names(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    input
        .split(config::tags::DELIMITER)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}

/// 自由入力のタグ文字列を、既存タグを再利用しつつTag列へ変換する
pub struct TagReconciler<'a, L: TagLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: TagLookup + ?Sized> TagReconciler<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// 入力文字列をTag列に変換する
    ///
    /// 既存タグの検索は全候補名で一度だけ行う。見つからなかった名前は
    /// 未採番の新しいTagになる。検索の失敗はそのまま呼び出し元へ返す。
    pub fn parse(&self, input: &str) -> AppResult<Vec<Tag>> {
        let names = split_tag_names(input);
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut existing = self.lookup.find_by_names(&names).map_err(|e| {
            error!("Failed to look up existing tags: {e}");
            AppError::TagLookup(e)
        })?;

        debug!(
            "Reconciled {} tag name(s), {} already persisted",
            names.len(),
            existing.len()
        );

        Ok(names
            .into_iter()
            .map(|name| existing.remove(&name).unwrap_or_else(|| Tag::new(name)))
            .collect())
    }

    /// Tag列を入力欄用の文字列に戻す
    pub fn serialize(&self, tags: &[Tag]) -> String {
        tags.iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(config::tags::JOIN_SEPARATOR)
    }
}
