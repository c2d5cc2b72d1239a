//! Chart history persistence
//!
//! Each successful chart is stored as the source identifier plus the
//! parameters that produced it, so it can be regenerated later.

use crate::data::{DataResult, Params};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One stored chart request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub id: i64,
    /// Source identifier the chart was read from
    pub source: String,
    pub parameters: Option<Params>,
}

/// Storage for chart records. Records are created and read, never changed.
pub trait ChartStore {
    fn create(&self, source: &str, parameters: Option<&Params>) -> DataResult<ChartRecord>;

    fn get_by_id(&self, id: i64) -> DataResult<Option<ChartRecord>>;

    /// All records, oldest first
    fn list_all(&self) -> DataResult<Vec<ChartRecord>>;
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS chart_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT NOT NULL,
    extra_data TEXT
)";

/// SQLite-backed store; parameters are kept as JSON text
pub struct SqliteChartStore {
    conn: Mutex<Connection>,
}

impl SqliteChartStore {
    pub fn open(path: &Path) -> DataResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        tracing::debug!("Opened chart history at {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> DataResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> DataResult<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn decode_record(id: i64, source: String, extra: Option<String>) -> DataResult<ChartRecord> {
    let parameters = match extra {
        Some(json) => Some(serde_json::from_str(&json)?),
        None => None,
    };
    Ok(ChartRecord {
        id,
        source,
        parameters,
    })
}

impl ChartStore for SqliteChartStore {
    fn create(&self, source: &str, parameters: Option<&Params>) -> DataResult<ChartRecord> {
        let extra = parameters.map(serde_json::to_string).transpose()?;
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO chart_history (file_name, extra_data) VALUES (?1, ?2)",
            params![source, extra],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!("Saved chart record {} for {}", id, source);

        Ok(ChartRecord {
            id,
            source: source.to_string(),
            parameters: parameters.cloned(),
        })
    }

    fn get_by_id(&self, id: i64) -> DataResult<Option<ChartRecord>> {
        let row: Option<(i64, String, Option<String>)> = self
            .conn
            .lock()
            .query_row(
                "SELECT id, file_name, extra_data FROM chart_history WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        row.map(|(id, source, extra)| decode_record(id, source, extra))
            .transpose()
    }

    fn list_all(&self) -> DataResult<Vec<ChartRecord>> {
        let rows: Vec<(i64, String, Option<String>)> = {
            let conn = self.conn.lock();
            let mut stmt =
                conn.prepare("SELECT id, file_name, extra_data FROM chart_history ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        rows.into_iter()
            .map(|(id, source, extra)| decode_record(id, source, extra))
            .collect()
    }
}

/// Process-local store
#[derive(Default)]
pub struct MemoryChartStore {
    records: Mutex<Vec<ChartRecord>>,
}

impl MemoryChartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartStore for MemoryChartStore {
    fn create(&self, source: &str, parameters: Option<&Params>) -> DataResult<ChartRecord> {
        let mut records = self.records.lock();
        let record = ChartRecord {
            id: records.last().map_or(1, |r| r.id + 1),
            source: source.to_string(),
            parameters: parameters.cloned(),
        };
        records.push(record.clone());
        Ok(record)
    }

    fn get_by_id(&self, id: i64) -> DataResult<Option<ChartRecord>> {
        Ok(self.records.lock().iter().find(|r| r.id == id).cloned())
    }

    fn list_all(&self) -> DataResult<Vec<ChartRecord>> {
        Ok(self.records.lock().clone())
    }
}
