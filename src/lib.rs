pub use self::{
    form::{FormField, FormInputs, FormSession, InputError, ValidationError},
    record::{DepositDate, PartnershipRecord, PartnershipType, RecordError, Ugx, COLUMNS},
    session::{Session, SessionState},
    store::{RecordStore, RenderError},
    view::ExportFile,
};

pub mod logging;
pub mod view;

mod form;
mod record;
mod session;
mod store;
