//! The chart workflow a front end drives
//!
//! Begin a session for a source, submit parameters, and get back the chart
//! together with the history record it was saved under. Saved records can be
//! listed with readable labels and regenerated without re-entering anything.

use crate::data::{
    ChartRenderer, ChartSession, DataError, DataResult, FileManager, LineChartRenderer, Params,
};
use crate::history::{ChartRecord, ChartStore, SqliteChartStore};
use crate::settings::AppSettings;
use serde::Serialize;

/// A history record with its display label
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub source: String,
    pub label: String,
}

pub struct ChartWorkbench<S = SqliteChartStore, R = LineChartRenderer> {
    manager: FileManager<R>,
    store: S,
}

impl ChartWorkbench<SqliteChartStore, LineChartRenderer> {
    /// Workbench configured from settings, with history in its SQLite file
    pub fn from_settings(settings: &AppSettings) -> DataResult<Self> {
        let manager = FileManager::new()
            .registry(settings.registry())
            .options(settings.open_options());
        let store = SqliteChartStore::open(&settings.resolved_history_path()?)?;
        Ok(Self::new(manager, store))
    }
}

impl<S: ChartStore, R: ChartRenderer> ChartWorkbench<S, R> {
    pub fn new(manager: FileManager<R>, store: S) -> Self {
        Self { manager, store }
    }

    pub fn manager(&self) -> &FileManager<R> {
        &self.manager
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn begin(&self, identifier: &str) -> DataResult<ChartSession> {
        self.manager.begin(identifier)
    }

    /// Validate, generate, then persist. Nothing is saved when any step fails.
    pub fn submit(
        &self,
        session: &mut ChartSession,
        values: Params,
    ) -> DataResult<(ChartRecord, R::Chart)> {
        session.set_parameters(values)?;
        let chart = self.manager.generate_for(session)?;
        let record = self
            .store
            .create(session.identifier(), session.parameters())?;
        Ok((record, chart))
    }

    /// Every saved chart, oldest first
    pub fn history(&self) -> DataResult<Vec<HistoryEntry>> {
        let records = self.store.list_all()?;
        Ok(records
            .into_iter()
            .map(|record| {
                let label = self
                    .manager
                    .describe_source(&record.source, record.parameters.as_ref())
                    .unwrap_or_else(|e| {
                        tracing::warn!("Cannot describe history record {}: {}", record.id, e);
                        record.source.clone()
                    });
                HistoryEntry {
                    id: record.id,
                    source: record.source,
                    label,
                }
            })
            .collect())
    }

    /// Rebuild a saved chart from its stored parameters
    pub fn regenerate(&self, id: i64) -> DataResult<R::Chart> {
        let record = self
            .store
            .get_by_id(id)?
            .ok_or(DataError::RecordNotFound(id))?;
        let params = record.parameters.unwrap_or_default();
        self.manager.generate_chart(&record.source, &params)
    }
}
