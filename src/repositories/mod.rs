// Repository Pattern実装
// タグの検索と永続化をストレージ技術から切り離す

pub mod tag_repository;

pub use tag_repository::{SqliteTagRepository, TagLookup, TagRepository};
