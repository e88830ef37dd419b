//! Edit form state machine
//!
//! `Closed -> Open -> Submitting -> Closed`. Drafts start blank; a blank draft
//! means "keep the loaded value". A draft that cannot be sent leaves the form
//! open so it can be corrected.

use crate::screen::EditMode;
use gst_client::RecordUpdate;
use gst_types::{CompanyRecord, ComplianceStatus};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("This screen does not allow editing")]
    NotEditable,

    #[error("No record with id {0}")]
    RecordNotFound(i64),

    #[error("Annual turnover '{0}' is not a number")]
    InvalidTurnover(String),

    #[error("A status is required")]
    MissingStatus,

    #[error("The edit form is not open")]
    NotOpen,

    #[error("Turnover cannot be edited on this screen")]
    TurnoverNotEditable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub record: CompanyRecord,
    pub status_draft: Option<ComplianceStatus>,
    pub turnover_draft: String,
}

impl EditForm {
    fn new(record: CompanyRecord) -> Self {
        Self {
            record,
            status_draft: None,
            turnover_draft: String::new(),
        }
    }

    /// Status shown in the form before the user picks one
    pub fn current_status(&self) -> Option<&str> {
        self.record.result.as_deref()
    }

    pub fn current_turnover(&self) -> Option<f64> {
        self.record.annual_turnover
    }

    fn status(&self) -> Result<String, EditError> {
        match (self.status_draft, self.record.result.as_deref()) {
            (Some(status), _) => Ok(status.as_str().to_string()),
            (None, Some(loaded)) if !loaded.trim().is_empty() => Ok(loaded.to_string()),
            _ => Err(EditError::MissingStatus),
        }
    }

    fn turnover(&self) -> Result<Option<f64>, EditError> {
        let draft = self.turnover_draft.trim();
        if draft.is_empty() {
            return Ok(self.record.annual_turnover);
        }
        draft
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| EditError::InvalidTurnover(draft.to_string()))
    }

    /// The update to send, or why it cannot be sent
    pub fn to_update(&self, mode: EditMode) -> Result<RecordUpdate, EditError> {
        let id = self.record.id;
        let gstin = self.record.gstin.clone().unwrap_or_default();
        let status = self.status()?;

        match mode {
            EditMode::Disabled => Err(EditError::NotEditable),
            EditMode::StatusAndTurnover => Ok(RecordUpdate::Full {
                id,
                gstin,
                status,
                annual_turnover: self.turnover()?,
            }),
            EditMode::StatusOnly => Ok(RecordUpdate::StatusOnly { id, gstin, status }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Closed,
    Open(EditForm),
    Submitting(EditForm),
}

#[derive(Debug, Clone)]
pub struct EditWorkflow {
    mode: EditMode,
    state: EditState,
}

impl EditWorkflow {
    pub fn new(mode: EditMode) -> Self {
        Self {
            mode,
            state: EditState::Closed,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditState::Open(_))
    }

    /// Open the form on `record`, replacing any form already open
    pub fn open(&mut self, record: CompanyRecord) -> Result<(), EditError> {
        if self.mode == EditMode::Disabled {
            return Err(EditError::NotEditable);
        }
        self.state = EditState::Open(EditForm::new(record));
        Ok(())
    }

    fn form_mut(&mut self) -> Result<&mut EditForm, EditError> {
        match &mut self.state {
            EditState::Open(form) => Ok(form),
            _ => Err(EditError::NotOpen),
        }
    }

    pub fn set_status(&mut self, status: ComplianceStatus) -> Result<(), EditError> {
        self.form_mut()?.status_draft = Some(status);
        Ok(())
    }

    pub fn set_turnover(&mut self, draft: impl Into<String>) -> Result<(), EditError> {
        if self.mode != EditMode::StatusAndTurnover {
            return Err(EditError::TurnoverNotEditable);
        }
        self.form_mut()?.turnover_draft = draft.into();
        Ok(())
    }

    /// Move to `Submitting` and hand back the update to send.
    ///
    /// On error the form stays open with its drafts intact.
    pub fn begin_submit(&mut self) -> Result<RecordUpdate, EditError> {
        let form = match &self.state {
            EditState::Open(form) => form,
            _ => return Err(EditError::NotOpen),
        };
        let update = form.to_update(self.mode)?;

        if let EditState::Open(form) = std::mem::take(&mut self.state) {
            self.state = EditState::Submitting(form);
        }
        Ok(update)
    }

    /// Close the form after the update call finished, whatever its outcome
    pub fn finish(&mut self) {
        self.state = EditState::Closed;
    }

    pub fn cancel(&mut self) {
        self.state = EditState::Closed;
    }
}
