// TagRepository - タグの検索・永続化の責務を分離

use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashMap;

use crate::config::database;
use crate::database::Tag;

/// 既存タグを名前でまとめて検索する能力
///
/// 完全一致（大文字小文字を区別）のみ。戻り値の順序は保証しない。
pub trait TagLookup {
    fn find_by_names(&self, names: &[String]) -> Result<HashMap<String, Tag>>;
}

/// タグ操作の責務を持つRepository trait
pub trait TagRepository {
    fn insert(&self, tag: &Tag) -> Result<i64>;
    fn find_by_name(&self, name: &str) -> Result<Option<Tag>>;
    fn find_all(&self) -> Result<Vec<Tag>>;

    /// 未採番のタグだけを保存し、採番されたIDを書き戻す
    ///
    /// 一件でも失敗した場合は何も保存されず、IDも書き戻されない。
    fn persist_new(&self, tags: &mut [Tag]) -> Result<()>;
}

/// SQLite実装のTagRepository
pub struct SqliteTagRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteTagRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

impl<'a> TagRepository for SqliteTagRepository<'a> {
    fn insert(&self, tag: &Tag) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tags (name, created_at) VALUES (?1, datetime('now'))",
            params![tag.name],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM tags WHERE name = ?1")?;

        let tag = stmt.query_row([name], tag_from_row).optional()?;
        Ok(tag)
    }

    fn find_all(&self) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM tags ORDER BY name ASC")?;

        let tag_iter = stmt.query_map([], tag_from_row)?;

        let mut tags = Vec::new();
        for tag in tag_iter {
            tags.push(tag?);
        }
        Ok(tags)
    }

    fn persist_new(&self, tags: &mut [Tag]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        let mut assigned = Vec::new();
        for (index, tag) in tags.iter().enumerate().filter(|(_, tag)| tag.id.is_none()) {
            tx.execute(
                "INSERT INTO tags (name, created_at) VALUES (?1, datetime('now'))",
                params![tag.name],
            )?;
            assigned.push((index, tx.last_insert_rowid()));
        }

        tx.commit()?;

        for (index, id) in assigned {
            tags[index].id = Some(id);
        }
        Ok(())
    }
}

impl<'a> TagLookup for SqliteTagRepository<'a> {
    fn find_by_names(&self, names: &[String]) -> Result<HashMap<String, Tag>> {
        let mut found = HashMap::new();

        // SQLiteのバインド変数上限を超えないよう分割して問い合わせる
        for chunk in names.chunks(database::LOOKUP_CHUNK_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let query = format!(
                "SELECT id, name, created_at FROM tags WHERE name IN ({placeholders})"
            );

            let mut stmt = self.conn.prepare(&query)?;
            let tag_iter = stmt.query_map(params_from_iter(chunk.iter()), tag_from_row)?;

            for tag in tag_iter {
                let tag = tag?;
                found.insert(tag.name.clone(), tag);
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use tempfile::NamedTempFile;

    fn create_test_db() -> (NamedTempFile, Database) {
        let db_file = NamedTempFile::new().unwrap();
        let db = Database::new(&db_file.path().to_string_lossy()).unwrap();
        (db_file, db)
    }

    #[test]
    fn test_insert_and_find_by_name() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        let tag_id = repo.insert(&Tag::new("Rust")).expect("Failed to insert tag");
        assert!(tag_id > 0);

        let tag = repo
            .find_by_name("Rust")
            .expect("Failed to find tag")
            .expect("Tag should exist");
        assert_eq!(tag.id, Some(tag_id));
        assert_eq!(tag.name, "Rust");
        assert!(tag.created_at.is_some());

        assert!(repo.find_by_name("rust").unwrap().is_none());
    }

    #[test]
    fn test_find_all_is_sorted_by_name() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        assert!(repo.find_all().unwrap().is_empty());

        repo.insert(&Tag::new("World")).unwrap();
        repo.insert(&Tag::new("Hello")).unwrap();

        let names: Vec<String> = repo.find_all().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Hello", "World"]);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        repo.insert(&Tag::new("Hello")).unwrap();
        assert!(repo.insert(&Tag::new("Hello")).is_err());
    }

    #[test]
    fn test_find_by_names_returns_exact_matches_only() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        let hello_id = repo.insert(&Tag::new("Hello")).unwrap();
        let world_id = repo.insert(&Tag::new("World")).unwrap();
        repo.insert(&Tag::new("Unrelated")).unwrap();

        let names = vec![
            "Hello".to_string(),
            "World".to_string(),
            "hello".to_string(),
            "Hell".to_string(),
            "Missing".to_string(),
        ];
        let found = repo.find_by_names(&names).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found["Hello"].id, Some(hello_id));
        assert_eq!(found["World"].id, Some(world_id));
        assert!(!found.contains_key("hello"));
        assert!(!found.contains_key("Unrelated"));
    }

    #[test]
    fn test_find_by_names_with_no_names() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        assert!(repo.find_by_names(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_names_spans_multiple_chunks() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        let first_id = repo.insert(&Tag::new("t0")).unwrap();
        let last_name = format!("t{}", database::LOOKUP_CHUNK_SIZE * 3);
        let last_id = repo.insert(&Tag::new(last_name.as_str())).unwrap();

        let names: Vec<String> = (0..=database::LOOKUP_CHUNK_SIZE * 3)
            .map(|i| format!("t{i}"))
            .collect();
        let found = repo.find_by_names(&names).expect("Lookup should not hit the variable limit");

        assert_eq!(found.len(), 2);
        assert_eq!(found["t0"].id, Some(first_id));
        assert_eq!(found[&last_name].id, Some(last_id));
    }

    #[test]
    fn test_persist_new_rolls_back_on_failure() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        repo.insert(&Tag::new("B")).unwrap();

        let mut tags = vec![Tag::new("A"), Tag::new("B")];
        assert!(repo.persist_new(&mut tags).is_err());

        assert_eq!(tags[0].id, None);
        assert_eq!(tags[1].id, None);
        assert!(repo.find_by_name("A").unwrap().is_none());
        assert_eq!(db.get_tag_count().unwrap(), 1);
    }

    #[test]
    fn test_persist_new_assigns_ids_to_new_tags_only() {
        let (_db_file, db) = create_test_db();
        let repo = SqliteTagRepository::new(db.connection());

        let existing_id = repo.insert(&Tag::new("Hello")).unwrap();
        let existing = repo.find_by_name("Hello").unwrap().unwrap();

        let mut tags = vec![existing.clone(), Tag::new("Demo"), Tag::new("How")];
        repo.persist_new(&mut tags).expect("Failed to persist tags");

        assert_eq!(tags[0], existing);
        assert_eq!(tags[0].id, Some(existing_id));
        assert!(tags.iter().all(Tag::is_persisted));
        assert_eq!(repo.find_by_name("Demo").unwrap().unwrap().id, tags[1].id);
        assert_eq!(db.get_tag_count().unwrap(), 3);
    }
}
