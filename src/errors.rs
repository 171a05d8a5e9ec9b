use thiserror::Error;

/// アプリケーション全体で使用する統一エラー型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tag lookup failed: {0}")]
    TagLookup(#[source] anyhow::Error),

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    DatabaseLock(String),

    #[error("{0}")]
    TagOperation(String),
}

impl AppError {
    /// バリデーションエラーを作成
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// データベースロックエラーを作成
    pub fn database_lock(message: impl Into<String>) -> Self {
        Self::DatabaseLock(message.into())
    }

    /// タグ操作エラーを作成
    pub fn tag_operation(message: impl Into<String>) -> Self {
        Self::TagOperation(message.into())
    }
}

/// アプリケーション全体で使用するResult型
pub type AppResult<T> = Result<T, AppError>;

/// エラーのカテゴリ分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// ユーザー操作エラー（修正可能）
    UserError,
    /// システムエラー
    SystemError,
    /// 重大なエラー（呼び出し元へそのまま伝播）
    FatalError,
}

impl AppError {
    /// エラーのカテゴリを取得
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation { .. } => ErrorCategory::UserError,
            AppError::TagLookup(_) => ErrorCategory::FatalError,
            AppError::Database(_) => ErrorCategory::SystemError,
            AppError::Io(_) => ErrorCategory::SystemError,
            AppError::DatabaseLock(_) => ErrorCategory::SystemError,
            AppError::TagOperation(_) => ErrorCategory::SystemError,
        }
    }

    /// ユーザー向けメッセージを取得
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => {
                "データベースエラーが発生しました。アプリケーションを再起動してください。"
                    .to_string()
            }
            AppError::Io(_) => {
                "ファイル操作中にエラーが発生しました。ファイルの権限を確認してください。"
                    .to_string()
            }
            AppError::TagLookup(_) => {
                "既存タグの検索に失敗しました。しばらくしてから再度お試しください。".to_string()
            }
            AppError::Validation { field, message } => format!("{field}: {message}"),
            AppError::DatabaseLock(msg) => msg.clone(),
            AppError::TagOperation(msg) => msg.clone(),
        }
    }
}
