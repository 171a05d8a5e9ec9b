use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod tag_reconciler;
mod tag_validator;
pub mod tags_input;

use crate::config::app;
use database::Database;
pub use database::Tag;
pub use errors::{AppError, AppResult};
pub use repositories::{SqliteTagRepository, TagLookup, TagRepository};
pub use tag_reconciler::{split_tag_names, TagReconciler};
pub use tags_input::TagsInputField;

// アプリケーション状態管理
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new() -> AppResult<Self> {
        let app_data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app::DATA_DIR_NAME);

        // ディレクトリが存在しない場合は作成
        if !app_data_dir.exists() {
            std::fs::create_dir_all(&app_data_dir)?;
        }

        Self::open(&app_data_dir.join(app::DATABASE_FILENAME))
    }

    pub fn open(db_path: &Path) -> AppResult<Self> {
        let db = Database::new(&db_path.to_string_lossy())?;
        log::info!("Opened tag database at {}", db_path.display());

        Ok(AppState {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// 入力欄の文字列を既存タグと照合してTag列にする
    pub fn reconcile_tags(&self, raw: &str) -> AppResult<Vec<Tag>> {
        let db = self
            .db
            .lock()
            .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")))?;

        let repo = SqliteTagRepository::new(db.connection());
        let reconciler = TagReconciler::new(&repo);
        let field = TagsInputField::new(&reconciler);
        field.submit(raw)
    }

    /// 未採番のタグを保存する
    pub fn save_tags(&self, tags: &mut [Tag]) -> AppResult<()> {
        let db = self
            .db
            .lock()
            .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")))?;

        let repo = SqliteTagRepository::new(db.connection());
        repo.persist_new(tags)
            .map_err(|e| AppError::tag_operation(format!("Failed to persist tags: {e}")))
    }
}

/// `RUST_LOG` で制御されるロガーを初期化（複数回呼んでも安全）
pub fn init_logging() {
    let _ = env_logger::try_init();
}
