use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use fixed::types::U51F13;

/// An amount of Ugandan Shillings
///
/// The amount is an unsigned fixed point number, so a negative amount
/// cannot be represented at all.
pub type Ugx = U51F13;

const MIN_YEAR: i32 = 2000;

/// Possible errors when building a [`DepositDate`] or a [`PartnershipType`]
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("The deposit date {0} lies before 2000-01-01")]
    DateBeforeMinimum(NaiveDate),
    #[error("Unknown partnership type `{0}`, expected one of Individual, Company, Organization, Other")]
    UnknownPartnershipType(String),
}

/// The kind of partner a donation came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum PartnershipType {
    Individual,
    Company,
    Organization,
    Other,
}

impl PartnershipType {
    /// All partnership types, in the order they are offered for selection
    pub const ALL: [PartnershipType; 4] = [
        PartnershipType::Individual,
        PartnershipType::Company,
        PartnershipType::Organization,
        PartnershipType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartnershipType::Individual => "Individual",
            PartnershipType::Company => "Company",
            PartnershipType::Organization => "Organization",
            PartnershipType::Other => "Other",
        }
    }
}

impl fmt::Display for PartnershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnershipType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RecordError::UnknownPartnershipType(s.to_owned()))
    }
}

/// The day a donation was deposited
///
/// Deposit dates can never lie before [`DepositDate::min`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct DepositDate(NaiveDate);

impl DepositDate {
    /// The earliest accepted deposit date, 2000-01-01
    pub fn min() -> NaiveDate {
        NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn new(date: NaiveDate) -> Result<Self, RecordError> {
        match date.year() < MIN_YEAR {
            false => Ok(Self(date)),
            true => Err(RecordError::DateBeforeMinimum(date)),
        }
    }

    /// The deposit date for `today`, clamped to [`DepositDate::min`]
    pub fn on_or_after_min(today: NaiveDate) -> Self {
        Self(today.max(Self::min()))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<NaiveDate> for DepositDate {
    type Error = RecordError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date)
    }
}

impl From<DepositDate> for NaiveDate {
    fn from(date: DepositDate) -> Self {
        date.0
    }
}

impl fmt::Display for DepositDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// The column labels of a record, in display and export order
pub const COLUMNS: [&str; 8] = [
    "Company Name",
    "Location",
    "Amount (UGX)",
    "Date Deposited",
    "Depositor Name",
    "Contact Information",
    "Partnership Type",
    "Notes",
];

/// One donation or partnership event
///
/// Records are only built by a successful form submission and can not be
/// changed afterwards. The serde field names are the [`COLUMNS`] labels, so
/// a record serializes straight into an export row.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PartnershipRecord {
    #[serde(rename = "Company Name")]
    organization_or_individual_name: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Amount (UGX)")]
    amount_ugx: Ugx,
    #[serde(rename = "Date Deposited")]
    date_deposited: DepositDate,
    #[serde(rename = "Depositor Name")]
    depositor_name: String,
    #[serde(rename = "Contact Information")]
    contact_info: String,
    #[serde(rename = "Partnership Type")]
    partnership_type: PartnershipType,
    #[serde(rename = "Notes")]
    notes: String,
}

impl PartnershipRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        organization_or_individual_name: String,
        location: String,
        amount_ugx: Ugx,
        date_deposited: DepositDate,
        depositor_name: String,
        contact_info: String,
        partnership_type: PartnershipType,
        notes: String,
    ) -> Self {
        Self {
            organization_or_individual_name,
            location,
            amount_ugx,
            date_deposited,
            depositor_name,
            contact_info,
            partnership_type,
            notes,
        }
    }

    /// The name of the donating company, organization or individual
    pub fn organization_or_individual_name(&self) -> &str {
        &self.organization_or_individual_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn amount_ugx(&self) -> Ugx {
        self.amount_ugx
    }

    pub fn date_deposited(&self) -> DepositDate {
        self.date_deposited
    }

    /// The person who made the deposit
    pub fn depositor_name(&self) -> &str {
        &self.depositor_name
    }

    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }

    pub fn partnership_type(&self) -> PartnershipType {
        self.partnership_type
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The record's values as display text, in [`COLUMNS`] order
    pub fn cells(&self) -> [String; 8] {
        [
            self.organization_or_individual_name.clone(),
            self.location.clone(),
            self.amount_ugx.to_string(),
            self.date_deposited.to_string(),
            self.depositor_name.clone(),
            self.contact_info.clone(),
            self.partnership_type.to_string(),
            self.notes.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partnership_type_parses_case_insensitively() {
        assert_eq!("company".parse(), Ok(PartnershipType::Company));
        assert_eq!(" Other ".parse(), Ok(PartnershipType::Other));
        assert_eq!(
            "Charity".parse::<PartnershipType>(),
            Err(RecordError::UnknownPartnershipType("Charity".into())),
        );
    }

    #[test]
    fn partnership_types_sort_in_selection_order() {
        let mut types = vec![
            PartnershipType::Other,
            PartnershipType::Company,
            PartnershipType::Individual,
            PartnershipType::Organization,
        ];
        types.sort();
        assert_eq!(types, PartnershipType::ALL);
    }

    #[test]
    fn deposit_date_rejects_dates_before_2000() {
        let early = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(DepositDate::new(early), Err(RecordError::DateBeforeMinimum(early)));
        assert_eq!(DepositDate::new(DepositDate::min()).unwrap().date(), DepositDate::min());
        assert_eq!(DepositDate::on_or_after_min(early).date(), DepositDate::min());
    }

    #[test]
    fn deposit_date_displays_as_iso_8601() {
        let date = DepositDate::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap();
        assert_eq!(date.to_string(), "2024-01-10");
    }

    #[test]
    fn cells_follow_column_order() {
        let record = PartnershipRecord::new(
            "Acme Ltd".into(),
            "Kampala".into(),
            Ugx::from_num(5000),
            DepositDate::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap(),
            "Jane Doe".into(),
            "jane@acme.com".into(),
            PartnershipType::Company,
            "Q1 gift".into(),
        );
        assert_eq!(
            record.cells(),
            [
                "Acme Ltd",
                "Kampala",
                "5000",
                "2024-01-10",
                "Jane Doe",
                "jane@acme.com",
                "Company",
                "Q1 gift",
            ].map(String::from),
        );
    }
}
