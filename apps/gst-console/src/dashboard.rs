//! One controller behind the admin, user and checker screens
//!
//! Remote failures are logged and leave the dashboard as it was; only input
//! the user can correct (a malformed GSTIN, a bad edit draft, a disallowed
//! action) comes back as an error.

use crate::edit::{EditError, EditWorkflow};
use crate::error::ConsoleError;
use crate::gate::{self, GateDecision};
use crate::screen::{EditMode, Screen, ScreenProfile};
use gst_client::{wait_for_gstin, CompanyApi, RefreshPolicy};
use gst_summary::{render_summary_pdf, summary_file_name, SummaryError};
use gst_types::{validate_gstin, CompanyRecord, GstinError, Session, SessionProvider};
use gst_view::{FilterField, SortKey, SortSpec, StatusFilter, View, ViewState};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub export_dir: PathBuf,
    pub refresh: RefreshPolicy,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            refresh: RefreshPolicy::default(),
        }
    }
}

/// Generation handed to a record load when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

pub struct Dashboard<A> {
    api: A,
    screen: Screen,
    profile: ScreenProfile,
    session: Session,
    view: ViewState,
    edit: EditWorkflow,
    options: DashboardOptions,
    issued: u64,
    applied: u64,
}

impl<A: CompanyApi> Dashboard<A> {
    /// Run the session gate for `screen` and, if it passes, load the records.
    ///
    /// A failed gate returns [`ConsoleError::Gate`] without touching the backend.
    pub async fn mount<P>(
        api: A,
        provider: &P,
        screen: Screen,
        options: DashboardOptions,
    ) -> Result<Self, ConsoleError>
    where
        P: SessionProvider + ?Sized,
    {
        let profile = screen.profile();
        let session = match gate::check(provider, profile.requirement) {
            GateDecision::Authenticated(session) => session,
            GateDecision::RedirectToLogin(reason) => return Err(ConsoleError::Gate(reason)),
        };

        let mut dashboard = Self {
            api,
            screen,
            profile,
            session,
            view: ViewState::new(profile.page_size),
            edit: EditWorkflow::new(profile.edit_mode),
            options,
            issued: 0,
            applied: 0,
        };
        tracing::info!(%screen, role = %dashboard.session.role, "Screen mounted");
        dashboard.reload().await;
        Ok(dashboard)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn profile(&self) -> &ScreenProfile {
        &self.profile
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &ViewState {
        &self.view
    }

    pub fn view(&self) -> View<'_> {
        self.view.view()
    }

    // ------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------

    /// Start a record load; loads finishing out of order are resolved by ticket
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Install the records of a finished load.
    ///
    /// Returns false and keeps the current records when a newer load has
    /// already been applied.
    pub fn apply_load(&mut self, ticket: LoadTicket, records: Vec<CompanyRecord>) -> bool {
        if ticket.0 < self.applied {
            tracing::debug!(
                ticket = ticket.0,
                applied = self.applied,
                "Discarding stale load"
            );
            return false;
        }
        self.applied = ticket.0;
        self.view.replace_records(records);
        true
    }

    /// Refetch every record; on failure the current records stay
    pub async fn reload(&mut self) -> bool {
        let ticket = self.begin_load();
        match self.api.list_companies().await {
            Ok(records) => self.apply_load(ticket, records),
            Err(err) => {
                tracing::error!(error = %err, "Failed to load company records");
                false
            }
        }
    }

    // ------------------------------------------------------------
    // Pipeline inputs
    // ------------------------------------------------------------

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.view.set_filter(field, value);
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.view.set_status_filter(status);
    }

    /// Apply the search box as a GSTIN substring filter.
    ///
    /// The filter always applies. On a screen that validates its search, a
    /// value that is not a complete GSTIN also yields the message to show
    /// below the field.
    pub fn search(&mut self, input: &str) -> Option<GstinError> {
        self.view.set_search(input.trim());
        if self.profile.validates_search {
            validate_gstin(input).err()
        } else {
            None
        }
    }

    pub fn clear_search(&mut self) {
        self.view.set_search("");
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.view.set_sort(sort);
    }

    /// Column-header click
    pub fn toggle_sort(&mut self, key: SortKey) -> Option<SortSpec> {
        self.view.toggle_sort(key)
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.view.go_to(page)
    }

    pub fn next_page(&mut self) -> usize {
        self.view.next_page()
    }

    pub fn previous_page(&mut self) -> usize {
        self.view.previous_page()
    }

    // ------------------------------------------------------------
    // Row actions
    // ------------------------------------------------------------

    /// Ask the backend to fetch `gstin`, then poll until it is listed.
    ///
    /// Returns whether the GSTIN showed up in the listing.
    pub async fn add_company(&mut self, gstin: &str) -> Result<bool, ConsoleError> {
        if !self.profile.can_add {
            return Err(ConsoleError::Unsupported(format!(
                "adding companies from the {} screen",
                self.screen
            )));
        }
        let gstin = validate_gstin(gstin)?.to_uppercase();

        if let Err(err) = self.api.create_or_refresh(&gstin).await {
            tracing::error!(%gstin, error = %err, "Failed to request GST record");
            return Ok(false);
        }

        let ticket = self.begin_load();
        match wait_for_gstin(&self.api, &gstin, &self.options.refresh).await {
            Ok(settled) => {
                self.apply_load(ticket, settled.records);
                Ok(settled.found)
            }
            Err(err) => {
                tracing::error!(%gstin, error = %err, "Failed to reload after refresh");
                Ok(false)
            }
        }
    }

    /// Write the summary PDF for `gstin` into the export directory.
    ///
    /// Returns the written path, or `None` when nothing was written. Only a
    /// well-formed GSTIN is used to name the file.
    pub async fn export(&self, gstin: &str) -> Option<PathBuf> {
        match self.try_export(gstin).await {
            Ok(path) => {
                tracing::info!(gstin, path = %path.display(), "Exported summary");
                Some(path)
            }
            Err(err) => {
                tracing::error!(gstin, error = %err, "Summary export failed");
                None
            }
        }
    }

    async fn try_export(&self, gstin: &str) -> Result<PathBuf, ConsoleError> {
        let gstin = validate_gstin(gstin)?;
        let records = self.api.get_company(gstin).await?;
        if records.is_empty() {
            return Err(SummaryError::EmptyHistory(gstin.to_string()).into());
        }
        let pdf = render_summary_pdf(gstin, &records, self.profile.export_layout)?;

        tokio::fs::create_dir_all(&self.options.export_dir).await?;
        let path = self.options.export_dir.join(summary_file_name(gstin));
        tokio::fs::write(&path, pdf).await?;
        Ok(path)
    }

    // ------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------

    pub fn edit(&self) -> &EditWorkflow {
        &self.edit
    }

    pub fn edit_mut(&mut self) -> &mut EditWorkflow {
        &mut self.edit
    }

    /// Open the edit form on the loaded record with internal id `id`
    pub fn open_edit(&mut self, id: i64) -> Result<(), ConsoleError> {
        if self.profile.edit_mode == EditMode::Disabled {
            return Err(EditError::NotEditable.into());
        }
        let record = self
            .view
            .find_by_id(id)
            .cloned()
            .ok_or(EditError::RecordNotFound(id))?;
        self.edit.open(record)?;
        Ok(())
    }

    /// Send the open form.
    ///
    /// A draft that cannot be sent is returned as an error with the form
    /// still open. Otherwise the form closes whatever the backend answers,
    /// and a successful update reloads the records.
    pub async fn submit_edit(&mut self) -> Result<bool, ConsoleError> {
        let update = self.edit.begin_submit()?;

        let result = self.api.update_record(&update).await;
        self.edit.finish();

        match result {
            Ok(()) => {
                self.reload().await;
                Ok(true)
            }
            Err(err) => {
                tracing::error!(gstin = update.gstin(), error = %err, "Failed to update record");
                Ok(false)
            }
        }
    }
}
