//! Memo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four data-access operations the view model depends on:
//!   load-all, insert, update-by-id, delete-by-id.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The store mints `id` and `created_at`; write paths return the canonical
//!   row by read-back, never a hand-merged record.
//! - Zero rows affected by update/delete maps to `RepoError::NotFound`.
//! - Write paths validate drafts before any SQL mutation.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::memo::{Memo, MemoDraft, MemoId, MemoValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const MEMO_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    content,
    created_at,
    updated_at
FROM memos";

const REQUIRED_MEMO_COLUMNS: &[&str] = &["uuid", "title", "content", "created_at", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for memo persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MemoValidationError),
    Db(DbError),
    NotFound(MemoId),
    InvalidData(String),
    /// Connection schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "memo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted memo data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemoValidationError> for RepoError {
    fn from(value: MemoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for the memo store.
///
/// The view model owns one implementation, injected at construction, so
/// tests can substitute a double for the external service.
pub trait MemoRepository {
    /// Fetches every memo ordered newest-first by `created_at`.
    fn load_all(&self) -> RepoResult<Vec<Memo>>;
    /// Inserts a new record; the store mints `id`/`created_at` and the
    /// canonical row is returned.
    fn insert(&self, draft: &MemoDraft) -> RepoResult<Memo>;
    /// Replaces title/content and stamps a fresh `updated_at` on the record
    /// matching `id`. Missing ids surface as `NotFound`.
    fn update_by_id(&self, id: MemoId, draft: &MemoDraft) -> RepoResult<Memo>;
    /// Hard-deletes the record matching `id`. Missing ids surface as
    /// `NotFound`.
    fn delete_by_id(&self, id: MemoId) -> RepoResult<()>;
}

/// SQLite-backed memo repository.
pub struct SqliteMemoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// Rejects connections whose schema version or shape does not match this
    /// binary instead of failing later inside an operation.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MemoRepository for SqliteMemoRepository<'_> {
    fn load_all(&self) -> RepoResult<Vec<Memo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMO_SELECT_SQL} ORDER BY created_at DESC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut memos = Vec::new();
        while let Some(row) = rows.next()? {
            memos.push(parse_memo_row(row)?);
        }

        Ok(memos)
    }

    fn insert(&self, draft: &MemoDraft) -> RepoResult<Memo> {
        draft.validate()?;

        let id: MemoId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO memos (uuid, title, content) VALUES (?1, ?2, ?3);",
            params![id.to_string(), draft.title.as_str(), draft.content.as_str()],
        )?;

        get_memo(self.conn, id)?.ok_or_else(|| {
            RepoError::InvalidData("inserted memo missing in read-back".to_string())
        })
    }

    fn update_by_id(&self, id: MemoId, draft: &MemoDraft) -> RepoResult<Memo> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE memos
             SET
                title = ?2,
                content = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), draft.title.as_str(), draft.content.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        get_memo(self.conn, id)?
            .ok_or_else(|| RepoError::InvalidData("updated memo missing in read-back".to_string()))
    }

    fn delete_by_id(&self, id: MemoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM memos WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn get_memo(conn: &Connection, id: MemoId) -> RepoResult<Option<Memo>> {
    let mut stmt = conn.prepare(&format!("{MEMO_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;

    if let Some(row) = rows.next()? {
        return Ok(Some(parse_memo_row(row)?));
    }

    Ok(None)
}

fn parse_memo_row(row: &Row<'_>) -> RepoResult<Memo> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in memos.uuid"))
    })?;

    Ok(Memo {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("PRAGMA table_info(memos);")?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable("memos"));
    }

    for &required in REQUIRED_MEMO_COLUMNS {
        if !columns.iter().any(|column| column.as_str() == required) {
            return Err(RepoError::MissingRequiredColumn {
                table: "memos",
                column: required,
            });
        }
    }

    Ok(())
}
