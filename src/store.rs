use std::collections::BTreeMap;

use crate::record::COLUMNS;
use crate::{PartnershipRecord, PartnershipType, Ugx};

/// Possible errors while deriving a view from the stored records
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Could not write the CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not write the CSV export: {0}")]
    Io(#[from] std::io::Error),
    #[error("The CSV export is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("The total amount for {partnership_type} exceeds the supported range")]
    AmountOverflow { partnership_type: PartnershipType },
}

/// The records of one session, in the order they were submitted
///
/// Records can only be appended. They are never reordered, changed or removed.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<PartnershipRecord>,
}

impl RecordStore {
    /// Creates a new, empty record store
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Adds a record to the end of the store
    pub fn append(&mut self, record: PartnershipRecord) {
        self.records.push(record);
    }

    /// All records, in insertion order
    pub fn all(&self) -> &[PartnershipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes all records as CSV
    ///
    /// The header row is always written, even if there are no records yet.
    /// Dates are written as `YYYY-MM-DD`, amounts as plain decimals.
    pub fn export_csv(&self) -> Result<String, RenderError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(COLUMNS)?;
        for record in &self.records {
            writer.serialize(record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| RenderError::Io(std::io::Error::new(err.error().kind(), err.to_string())))?;

        Ok(String::from_utf8(bytes)?)
    }

    /// The summed amount per partnership type
    ///
    /// Types without any record are left out instead of showing up with a
    /// total of zero.
    pub fn aggregate_by_type(&self) -> Result<BTreeMap<PartnershipType, Ugx>, RenderError> {
        let mut totals = BTreeMap::new();

        for record in &self.records {
            let partnership_type = record.partnership_type();
            let total = totals.entry(partnership_type).or_insert_with(|| Ugx::from_num(0));
            *total = total
                .checked_add(record.amount_ugx())
                .ok_or(RenderError::AmountOverflow { partnership_type })?;
        }

        Ok(totals)
    }
}
