use std::collections::BTreeMap;

use crate::view::{self, ExportFile};
use crate::{
    FormInputs, FormSession, PartnershipRecord, PartnershipType, RecordStore, RenderError, Ugx,
    ValidationError,
};

/// Whether a session has recorded anything yet
///
/// A session only ever moves from [`SessionState::Empty`] to
/// [`SessionState::HasRecords`], since records can not be deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    HasRecords,
}

/// The state of one interactive session
///
/// Everything a session records lives in here and is gone once the session
/// is dropped.
#[derive(Debug, Default)]
pub struct Session {
    form: FormSession,
    store: RecordStore,
}

impl Session {
    /// Starts a new session with a blank form and no records
    pub fn new() -> Self {
        tracing::debug!("session started");
        Self {
            form: FormSession::new(),
            store: RecordStore::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.store.is_empty() {
            true => SessionState::Empty,
            false => SessionState::HasRecords,
        }
    }

    pub fn form(&self) -> &FormSession {
        &self.form
    }

    pub fn inputs_mut(&mut self) -> &mut FormInputs {
        self.form.inputs_mut()
    }

    /// Submits the current form inputs
    ///
    /// See [`FormSession::submit`].
    pub fn submit(&mut self) -> Result<PartnershipRecord, ValidationError> {
        let record = self.form.submit(&mut self.store)?;
        tracing::info!(
            partnership_type = %record.partnership_type(),
            amount_ugx = %record.amount_ugx(),
            records = self.store.len(),
            "recorded partnership",
        );
        Ok(record)
    }

    /// All records of this session, in submission order
    pub fn records(&self) -> &[PartnershipRecord] {
        self.store.all()
    }

    pub fn totals(&self) -> Result<BTreeMap<PartnershipType, Ugx>, RenderError> {
        self.store.aggregate_by_type()
    }

    /// The table of all records, or the "no data" indicator
    pub fn table(&self) -> String {
        view::render_table(self.store.all())
    }

    /// The bar chart of the totals per type, or the "no data" indicator
    pub fn chart(&self) -> Result<String, RenderError> {
        Ok(view::render_chart(&self.totals()?))
    }

    /// The CSV download of all records
    pub fn export(&self) -> Result<ExportFile, RenderError> {
        Ok(ExportFile::new(self.store.export_csv()?))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!(records = self.store.len(), "session ended, discarding records");
    }
}
