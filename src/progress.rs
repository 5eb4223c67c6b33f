/**
 * The log of round results over time, used for showing trends.
 *
 * Version: October 2026
 */
use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::common::{QuizError, Result};


/// The result of one round at a particular time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// RFC 3339 timestamp of when the round's summary was first shown.
    pub timestamp: String,
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}


impl ProgressEntry {
    pub fn new(timestamp: &str, correct: usize, total: usize) -> Self {
        Self {
            timestamp: String::from(timestamp),
            correct,
            total,
            percentage: percentage(correct, total),
        }
    }
}


/// Return `correct` as a percentage of `total`, or 0 if `total` is 0.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total > 0 {
        100.0 * (correct as f64) / (total as f64)
    } else {
        0.0
    }
}


/// Somewhere to send round results. Failures are reported but never interrupt a quiz.
/// Rounds without any answers are never appended.
pub trait ProgressLog {
    fn append(&mut self, correct: usize, total: usize, timestamp: &str) -> Result<()>;

    /// Return every entry, oldest first.
    fn list_all(&self) -> Result<Vec<ProgressEntry>>;
}


pub struct SqliteProgressLog {
    connection: Connection,
}


impl SqliteProgressLog {
    pub fn open(path: &Path) -> Result<Self> {
        let connection = Connection::open(path).map_err(QuizError::Sql)?;
        Self::with_connection(connection)
    }

    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(QuizError::Sql)?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .execute(
                "
            CREATE TABLE IF NOT EXISTS progress(
              id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
              timestamp TEXT NOT NULL CHECK(timestamp != ''),
              correct INTEGER NOT NULL CHECK(correct >= 0),
              total INTEGER NOT NULL CHECK(total >= correct),
              percentage REAL NOT NULL
            )
            ",
                [],
            )
            .map_err(QuizError::Sql)?;
        Ok(Self { connection })
    }
}


impl ProgressLog for SqliteProgressLog {
    fn append(&mut self, correct: usize, total: usize, timestamp: &str) -> Result<()> {
        self.connection
            .execute(
                "
            INSERT INTO
              progress(timestamp, correct, total, percentage)
            VALUES
              (?1, ?2, ?3, ?4)
            ",
                params![timestamp, correct as i64, total as i64, percentage(correct, total)],
            )
            .map_err(QuizError::Sql)?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ProgressEntry>> {
        let sql = "
            SELECT
              timestamp, correct, total, percentage
            FROM
              progress
            ORDER BY
              timestamp, id
        ";

        let mut stmt = self.connection.prepare(sql).map_err(QuizError::Sql)?;
        let mut rows = stmt.query([]).map_err(QuizError::Sql)?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().map_err(QuizError::Sql)? {
            let correct: i64 = row.get(1).map_err(QuizError::Sql)?;
            let total: i64 = row.get(2).map_err(QuizError::Sql)?;
            entries.push(ProgressEntry {
                timestamp: row.get(0).map_err(QuizError::Sql)?,
                correct: correct as usize,
                total: total as usize,
                percentage: row.get(3).map_err(QuizError::Sql)?,
            });
        }
        Ok(entries)
    }
}
