use std::fmt;

use chrono::NaiveDate;

use crate::{DepositDate, PartnershipRecord, PartnershipType, RecordError, RecordStore, Ugx};

/// Possible errors when a form widget rejects the entered text
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{field} expects a non-negative number, got `{text}`")]
    InvalidAmount { field: FormField, text: String },
    #[error("{field} expects a date formatted as YYYY-MM-DD, got `{text}`")]
    InvalidDate { field: FormField, text: String },
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// A submission that is missing one or more required fields
///
/// All missing fields are reported at once, in column order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill in all required fields: {}", list_fields(.missing_fields))]
pub struct ValidationError {
    missing_fields: Vec<FormField>,
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[FormField] {
        &self.missing_fields
    }
}

fn list_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|field| field.column())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The input widgets of the partnership form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    OrganizationOrIndividualName,
    Location,
    AmountUgx,
    DateDeposited,
    DepositorName,
    ContactInfo,
    PartnershipType,
    Notes,
}

impl FormField {
    /// All fields, in the order they are filled in and displayed
    pub const ALL: [FormField; 8] = [
        FormField::OrganizationOrIndividualName,
        FormField::Location,
        FormField::AmountUgx,
        FormField::DateDeposited,
        FormField::DepositorName,
        FormField::ContactInfo,
        FormField::PartnershipType,
        FormField::Notes,
    ];

    /// The prompt shown next to the widget
    pub fn label(self) -> &'static str {
        match self {
            FormField::OrganizationOrIndividualName => "Company Name (or Individual Name)",
            FormField::Location => "Location (e.g., City, Country)",
            FormField::AmountUgx => "Amount Donated (UGX)",
            FormField::DateDeposited => "Date Amount Deposited",
            FormField::DepositorName => "Name of Depositor",
            FormField::ContactInfo => "Contact Information (e.g., Email or Phone)",
            FormField::PartnershipType => "Partnership Type",
            FormField::Notes => "Additional Notes (e.g., purpose of donation, special instructions)",
        }
    }

    /// The table and export column this field ends up in
    pub fn column(self) -> &'static str {
        crate::record::COLUMNS[self as usize]
    }

    /// Whether a submission is rejected while this field is blank
    pub fn is_required(self) -> bool {
        matches!(
            self,
            FormField::OrganizationOrIndividualName
                | FormField::Location
                | FormField::DepositorName
                | FormField::PartnershipType
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The values currently entered into the form
///
/// Text fields hold the raw text as typed. Amount, date and type are parsed
/// as soon as they are entered, the same way a number, date or select widget
/// only ever holds a valid value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInputs {
    organization_or_individual_name: String,
    location: String,
    amount_ugx: Ugx,
    date_deposited: Option<DepositDate>,
    depositor_name: String,
    contact_info: String,
    partnership_type: Option<PartnershipType>,
    notes: String,
}

impl FormInputs {
    /// Enters `text` into the widget of `field`
    ///
    /// Blank text resets amount, date and type back to their defaults. On
    /// error the previous value of the field is kept.
    pub fn set(&mut self, field: FormField, text: &str) -> Result<(), InputError> {
        match field {
            FormField::OrganizationOrIndividualName => self.organization_or_individual_name = text.to_owned(),
            FormField::Location => self.location = text.to_owned(),
            FormField::DepositorName => self.depositor_name = text.to_owned(),
            FormField::ContactInfo => self.contact_info = text.to_owned(),
            FormField::Notes => self.notes = text.to_owned(),
            FormField::AmountUgx => {
                self.amount_ugx = match text.trim() {
                    "" => Ugx::from_num(0),
                    trimmed => trimmed
                        .parse::<Ugx>()
                        .map_err(|_| InputError::InvalidAmount { field, text: text.to_owned() })?,
                };
            }
            FormField::DateDeposited => {
                self.date_deposited = match text.trim() {
                    "" => None,
                    trimmed => {
                        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                            .map_err(|_| InputError::InvalidDate { field, text: text.to_owned() })?;
                        Some(DepositDate::new(date)?)
                    }
                };
            }
            FormField::PartnershipType => {
                self.partnership_type = match text.trim() {
                    "" => None,
                    trimmed => Some(trimmed.parse()?),
                };
            }
        }

        Ok(())
    }

    /// The current value of `field` as display text
    pub fn display(&self, field: FormField) -> String {
        match field {
            FormField::OrganizationOrIndividualName => self.organization_or_individual_name.clone(),
            FormField::Location => self.location.clone(),
            FormField::AmountUgx => self.amount_ugx.to_string(),
            FormField::DateDeposited => self.date_deposited.map(|d| d.to_string()).unwrap_or_default(),
            FormField::DepositorName => self.depositor_name.clone(),
            FormField::ContactInfo => self.contact_info.clone(),
            FormField::PartnershipType => self.partnership_type.map(|t| t.to_string()).unwrap_or_default(),
            FormField::Notes => self.notes.clone(),
        }
    }

    /// Blanks every widget
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .filter(|field| match field {
                FormField::OrganizationOrIndividualName => self.organization_or_individual_name.trim().is_empty(),
                FormField::Location => self.location.trim().is_empty(),
                FormField::DepositorName => self.depositor_name.trim().is_empty(),
                FormField::PartnershipType => self.partnership_type.is_none(),
                _ => false,
            })
            .collect()
    }
}

/// Owns the form of one session
///
/// The generation counts successful submissions. Each time it advances, the
/// previous inputs are cleared, so the next entry starts from a blank form.
#[derive(Debug, Default)]
pub struct FormSession {
    generation: u64,
    inputs: FormInputs,
}

impl FormSession {
    /// Creates a blank form at generation 0
    pub fn new() -> Self {
        Self::default()
    }

    /// The generation of the currently displayed form
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut FormInputs {
        &mut self.inputs
    }

    /// Validates the current inputs and appends the resulting record to `store`
    ///
    /// An unset deposit date defaults to today's local date.
    pub fn submit(&mut self, store: &mut RecordStore) -> Result<PartnershipRecord, ValidationError> {
        self.submit_on(chrono::Local::now().date_naive(), store)
    }

    /// Like [`FormSession::submit`], with an explicit date for "today"
    ///
    /// On error neither the inputs, the store nor the generation change.
    pub fn submit_on(
        &mut self,
        today: NaiveDate,
        store: &mut RecordStore,
    ) -> Result<PartnershipRecord, ValidationError> {
        let missing_fields = self.inputs.missing_fields();
        let partnership_type = match (missing_fields.is_empty(), self.inputs.partnership_type) {
            (true, Some(partnership_type)) => partnership_type,
            _ => {
                tracing::warn!(generation = self.generation, ?missing_fields, "rejected incomplete submission");
                return Err(ValidationError { missing_fields });
            }
        };

        let inputs = &self.inputs;
        let record = PartnershipRecord::new(
            inputs.organization_or_individual_name.trim().to_owned(),
            inputs.location.trim().to_owned(),
            inputs.amount_ugx,
            inputs.date_deposited.unwrap_or_else(|| DepositDate::on_or_after_min(today)),
            inputs.depositor_name.trim().to_owned(),
            inputs.contact_info.clone(),
            partnership_type,
            inputs.notes.clone(),
        );
        store.append(record.clone());

        self.inputs.clear();
        self.generation += 1;
        tracing::debug!(generation = self.generation, "form cleared for next entry");

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fill(form: &mut FormSession, values: &[(FormField, &str)]) {
        for (field, text) in values {
            form.inputs_mut().set(*field, text).unwrap();
        }
    }

    fn complete() -> [(FormField, &'static str); 4] {
        [
            (FormField::OrganizationOrIndividualName, "Acme Ltd"),
            (FormField::Location, "Kampala"),
            (FormField::DepositorName, "Jane Doe"),
            (FormField::PartnershipType, "Company"),
        ]
    }

    #[test]
    fn successful_submission_appends_and_advances_generation() {
        let mut store = RecordStore::new();
        let mut form = FormSession::new();

        for expected in 1..=3 {
            fill(&mut form, &complete());
            form.submit_on(date(2024, 1, 10), &mut store).unwrap();
            assert_eq!(store.len(), expected);
            assert_eq!(form.generation(), expected as u64);
        }
    }

    #[test]
    fn submission_clears_inputs() {
        let mut store = RecordStore::new();
        let mut form = FormSession::new();
        fill(&mut form, &complete());
        fill(&mut form, &[(FormField::AmountUgx, "2500"), (FormField::Notes, "for books")]);

        form.submit_on(date(2024, 1, 10), &mut store).unwrap();

        assert_eq!(form.inputs(), &FormInputs::default());
        for field in FormField::ALL {
            let expected = match field {
                FormField::AmountUgx => "0",
                _ => "",
            };
            assert_eq!(form.inputs().display(field), expected, "{field}");
        }
    }

    #[test]
    fn submission_trims_required_names() {
        let mut store = RecordStore::new();
        let mut form = FormSession::new();
        fill(&mut form, &[
            (FormField::OrganizationOrIndividualName, "  Acme Ltd "),
            (FormField::Location, "\tKampala"),
            (FormField::DepositorName, "Jane Doe  "),
            (FormField::PartnershipType, "company"),
            (FormField::ContactInfo, " jane@acme.com "),
        ]);

        let record = form.submit_on(date(2024, 1, 10), &mut store).unwrap();

        assert_eq!(record.organization_or_individual_name(), "Acme Ltd");
        assert_eq!(record.location(), "Kampala");
        assert_eq!(record.depositor_name(), "Jane Doe");
        assert_eq!(record.contact_info(), " jane@acme.com ");
        assert_eq!(record.partnership_type(), PartnershipType::Company);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let mut store = RecordStore::new();
        let mut form = FormSession::new();
        fill(&mut form, &[(FormField::Location, "   "), (FormField::DepositorName, "Jane Doe")]);
        let before = form.inputs().clone();

        let err = form.submit_on(date(2024, 1, 10), &mut store).unwrap_err();

        assert_eq!(
            err.missing_fields(),
            [FormField::OrganizationOrIndividualName, FormField::Location, FormField::PartnershipType],
        );
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Company Name, Location, Partnership Type",
        );
        assert!(store.is_empty());
        assert_eq!(form.generation(), 0);
        assert_eq!(form.inputs(), &before);
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let mut store = RecordStore::new();
        let mut form = FormSession::new();

        let err = form.submit_on(date(2024, 1, 10), &mut store).unwrap_err();

        let required = FormField::ALL.into_iter().filter(|f| f.is_required()).collect::<Vec<_>>();
        assert_eq!(err.missing_fields(), required.as_slice());
    }

    #[test]
    fn unset_date_defaults_to_today() {
        let mut store = RecordStore::new();
        let mut form = FormSession::new();
        fill(&mut form, &complete());

        let record = form.submit_on(date(2026, 10, 18), &mut store).unwrap();

        assert_eq!(record.date_deposited().date(), date(2026, 10, 18));
        assert_eq!(record.amount_ugx(), Ugx::from_num(0));
    }

    #[test]
    fn widgets_reject_invalid_text_and_keep_previous_value() {
        let mut inputs = FormInputs::default();
        inputs.set(FormField::AmountUgx, "5000").unwrap();
        inputs.set(FormField::DateDeposited, "2024-01-10").unwrap();

        assert!(matches!(
            inputs.set(FormField::AmountUgx, "-1"),
            Err(InputError::InvalidAmount { .. }),
        ));
        assert!(matches!(
            inputs.set(FormField::DateDeposited, "10/01/2024"),
            Err(InputError::InvalidDate { .. }),
        ));
        assert_eq!(
            inputs.set(FormField::DateDeposited, "1999-12-31"),
            Err(InputError::Record(RecordError::DateBeforeMinimum(date(1999, 12, 31)))),
        );
        assert!(matches!(
            inputs.set(FormField::PartnershipType, "Charity"),
            Err(InputError::Record(RecordError::UnknownPartnershipType(_))),
        ));

        assert_eq!(inputs.display(FormField::AmountUgx), "5000");
        assert_eq!(inputs.display(FormField::DateDeposited), "2024-01-10");
        assert_eq!(inputs.display(FormField::PartnershipType), "");
    }

    #[test]
    fn blank_text_resets_typed_widgets() {
        let mut inputs = FormInputs::default();
        inputs.set(FormField::AmountUgx, "1500.5").unwrap();
        inputs.set(FormField::DateDeposited, "2024-01-10").unwrap();
        inputs.set(FormField::PartnershipType, "Other").unwrap();

        for field in [FormField::AmountUgx, FormField::DateDeposited, FormField::PartnershipType] {
            inputs.set(field, "  ").unwrap();
        }

        assert_eq!(inputs, FormInputs::default());
    }

    #[test]
    fn columns_line_up_with_fields() {
        assert_eq!(
            FormField::ALL.map(FormField::column),
            crate::record::COLUMNS,
        );
    }
}
