//! Preference repository contract and SQLite implementation.

use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for preference reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored value could not be decoded or encoded.
    InvalidData(String),
    /// Connection was not migrated before use.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
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

/// Names of persisted board values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Notes,
    Positions,
    SizeFactor,
    CellWidth,
    Sort,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Positions => "positions",
            Self::SizeFactor => "sizeFactor",
            Self::CellWidth => "cellWidth",
            Self::Sort => "sort",
        }
    }
}

/// Key/value persistence provider for board state.
pub trait PreferenceRepository {
    /// Raw stored JSON text for `key`.
    fn get_value(&self, key: PreferenceKey) -> RepoResult<Option<String>>;
    /// Writes all entries atomically.
    fn set_values(&self, entries: &[(PreferenceKey, String)]) -> RepoResult<()>;
    /// Deletes `key`; returns whether a value existed.
    fn remove_value(&self, key: PreferenceKey) -> RepoResult<bool>;

    /// Decodes the stored value for `key`.
    fn get_json<T: DeserializeOwned>(&self, key: PreferenceKey) -> RepoResult<Option<T>> {
        match self.get_value(key)? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|err| {
                warn!(
                    "event=preference_decode module=repo status=error key={} error={}",
                    key.as_str(),
                    err
                );
                RepoError::InvalidData(format!("`{}`: {err}", key.as_str()))
            }),
            None => Ok(None),
        }
    }

    /// Encodes and writes one value.
    fn set_json<T: Serialize>(&self, key: PreferenceKey, value: &T) -> RepoResult<()> {
        let encoded = encode_json(key, value)?;
        self.set_values(&[(key, encoded)])
    }
}

/// Encodes `value` for storage under `key`.
pub fn encode_json<T: Serialize>(key: PreferenceKey, value: &T) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("`{}`: {err}", key.as_str())))
}

/// SQLite-backed preference repository.
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'preferences'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable("preferences"));
        }
        Ok(Self { conn })
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn get_value(&self, key: PreferenceKey) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_values(&self, entries: &[(PreferenceKey, String)]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO preferences (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now') * 1000)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key.as_str(), value.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_value(&self, key: PreferenceKey) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?1;", [key.as_str()])?;
        Ok(changed > 0)
    }
}
