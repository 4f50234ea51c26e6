//! # Section form controller
//!
//! One [`SectionController`] drives the whole lifecycle of a profile
//! section form: load the saved records on mount, edit a draft, validate
//! and submit, then show the read-only view. The same implementation is
//! instantiated for all nine sections; behavior differences live entirely
//! in the section schema.
//!
//! The controller is sans-IO. Network calls are split into start/finish
//! pairs so the UI can hold the controller in a signal without keeping a
//! borrow alive across an await:
//!
//! ```text
//! let ticket = controller.start_load(user_id);       // sync transition
//! let result = gateway.load_profile(&t.user_id).await;
//! controller.finish_load(ticket, result);            // sync transition
//! ```
//!
//! Tickets carry an epoch stamp. Starting a new operation bumps the epoch,
//! so a completion that races a retry or a teardown is simply ignored —
//! there is no state update from a stale response. `start_submit` is also
//! single-flight: a second submit while one is pending is refused.

use serde_json::Value;

use crate::draft::{parse_section, section_payload, SectionDraft};
use crate::gateway::{GatewayResult, ProfileDocument, ProfileGateway};
use crate::record::Record;
use crate::schema::{SectionKey, SectionSchema};
use crate::validate::{normalize, validate, FieldError};

/// Lifecycle phase of a section form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No session identity yet; no request has been made.
    Idle,
    /// The initial fetch is in flight.
    Loading,
    /// The initial fetch failed; a manual retry re-enters `Loading`.
    Unavailable,
    /// The draft is editable.
    Editing,
    /// A save is in flight; the draft is frozen.
    Submitting,
    /// Saved records are shown read-only.
    Viewing,
}

/// Proof that a load was started; pass back to [`SectionController::finish_load`].
#[derive(Debug)]
pub struct LoadTicket {
    pub user_id: String,
    epoch: u64,
}

/// Proof that a submit was started, carrying the serialized body.
#[derive(Debug)]
pub struct SaveTicket {
    pub user_id: String,
    pub key: SectionKey,
    pub payload: Value,
    epoch: u64,
}

/// Outcome of [`SectionController::start_submit`].
#[derive(Debug)]
pub enum SubmitStart {
    /// Validation passed; perform the save and report back.
    Request(SaveTicket),
    /// Client-side validation failed; no network call is made.
    Invalid,
    /// A submit is already in flight.
    InFlight,
    /// The controller is not in an editable state.
    NotEditing,
}

/// State machine for one profile section form.
pub struct SectionController {
    schema: &'static SectionSchema,
    phase: Phase,
    draft: SectionDraft,
    saved: Vec<Record>,
    error: Option<String>,
    field_errors: Vec<FieldError>,
    user_id: Option<String>,
    epoch: u64,
}

impl SectionController {
    pub fn new(schema: &'static SectionSchema) -> Self {
        Self {
            schema,
            phase: Phase::Idle,
            draft: SectionDraft::blank(schema),
            saved: Vec::new(),
            error: None,
            field_errors: Vec::new(),
            user_id: None,
            epoch: 0,
        }
    }

    pub fn schema(&self) -> &'static SectionSchema {
        self.schema
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Draft rows currently being edited (or frozen during submit).
    pub fn rows(&self) -> &[Record] {
        self.draft.rows()
    }

    /// Records as last acknowledged by the backend.
    pub fn saved(&self) -> &[Record] {
        &self.saved
    }

    /// Root-level error: the load failure in `Unavailable`, or the submit
    /// failure while back in `Editing`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validation message for one field of one row, if any.
    pub fn field_error(&self, row: usize, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.row == row && e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Submitting)
    }

    /// Begin the initial load (or a manual retry).
    ///
    /// Returns `None` when there is no session identity: the controller
    /// stays `Idle` and no request should be made. Otherwise transitions to
    /// `Loading` and invalidates any earlier in-flight operation.
    pub fn start_load(&mut self, user_id: Option<&str>) -> Option<LoadTicket> {
        let user_id = user_id?.to_string();
        self.user_id = Some(user_id.clone());
        self.phase = Phase::Loading;
        self.error = None;
        self.epoch += 1;
        Some(LoadTicket {
            user_id,
            epoch: self.epoch,
        })
    }

    /// Apply the result of a load. Stale tickets are ignored.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: GatewayResult<ProfileDocument>) {
        if ticket.epoch != self.epoch {
            return;
        }
        match result {
            Ok(document) => {
                let section = document.section(self.schema.key).cloned().unwrap_or(Value::Null);
                let records = parse_section(self.schema, &section);
                if records.is_empty() {
                    self.draft = SectionDraft::blank(self.schema);
                    self.saved = Vec::new();
                    self.phase = Phase::Editing;
                } else {
                    self.saved = records.clone();
                    self.draft = SectionDraft::from_records(self.schema, records);
                    self.phase = Phase::Viewing;
                }
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.phase = Phase::Unavailable;
            }
        }
    }

    /// Append a blank row to the draft. Editing only.
    pub fn add_row(&mut self) {
        if self.phase == Phase::Editing {
            self.draft.add_row();
        }
    }

    /// Remove a draft row. A no-op when only one row remains.
    pub fn remove_row(&mut self, index: usize) {
        if self.phase == Phase::Editing && self.draft.remove_row(index) {
            self.field_errors.retain(|e| e.row != index);
            for err in &mut self.field_errors {
                if err.row > index {
                    err.row -= 1;
                }
            }
        }
    }

    /// Update one field of one draft row, clearing its validation message.
    pub fn set_field(&mut self, index: usize, field: &'static str, value: impl Into<String>) {
        if self.phase != Phase::Editing {
            return;
        }
        self.draft.set_field(index, field, value);
        self.field_errors
            .retain(|e| !(e.row == index && e.field == field));
    }

    /// Return to editing with the last-saved records preloaded.
    pub fn edit(&mut self) {
        if self.phase == Phase::Viewing {
            self.draft = SectionDraft::from_records(self.schema, self.saved.clone());
            self.error = None;
            self.field_errors.clear();
            self.phase = Phase::Editing;
        }
    }

    /// Validate and begin a save.
    ///
    /// On a validation failure the per-field errors are recorded and no
    /// request is issued. While a save is pending, further submits are
    /// refused rather than issuing a second write.
    pub fn start_submit(&mut self) -> SubmitStart {
        match self.phase {
            Phase::Submitting => return SubmitStart::InFlight,
            Phase::Editing => {}
            _ => return SubmitStart::NotEditing,
        }
        let Some(user_id) = self.user_id.clone() else {
            return SubmitStart::NotEditing;
        };

        let mut rows = self.draft.rows().to_vec();
        normalize(self.schema, &mut rows);
        // Only non-blank rows go on the wire. Compact the draft to match
        // before validating, so the read-only view, the field error indices,
        // and a fresh load all agree on the same rows. When everything was
        // blank this leaves one blank row, which fails validation below
        // rather than silently clearing the section.
        rows.retain(|row| !row.is_blank());
        self.draft.replace_rows(rows);
        let errors = validate(self.schema, self.draft.rows());
        if !errors.is_empty() {
            self.field_errors = errors;
            return SubmitStart::Invalid;
        }

        self.field_errors.clear();
        self.error = None;
        self.phase = Phase::Submitting;
        self.epoch += 1;
        SubmitStart::Request(SaveTicket {
            user_id,
            key: self.schema.key,
            payload: section_payload(self.schema, self.draft.rows()),
            epoch: self.epoch,
        })
    }

    /// Apply the result of a save. Returns whether the section is now in
    /// `Viewing` (the caller's cue to fire a completion callback). Stale
    /// tickets are ignored.
    pub fn finish_submit(&mut self, ticket: SaveTicket, result: GatewayResult<()>) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        match result {
            Ok(()) => {
                self.saved = self.draft.rows().to_vec();
                self.error = None;
                self.phase = Phase::Viewing;
                true
            }
            Err(err) => {
                // Field values stay untouched; only the root error is set.
                self.error = Some(err.to_string());
                self.phase = Phase::Editing;
                false
            }
        }
    }
}

/// Run a full load against a gateway (tests, native callers).
pub async fn load_via<G: ProfileGateway>(
    controller: &mut SectionController,
    gateway: &G,
    user_id: Option<&str>,
) {
    if let Some(ticket) = controller.start_load(user_id) {
        let result = gateway.load_profile(&ticket.user_id).await;
        controller.finish_load(ticket, result);
    }
}

/// Run a full submit against a gateway. Returns whether the save was
/// acknowledged.
pub async fn submit_via<G: ProfileGateway>(
    controller: &mut SectionController,
    gateway: &G,
) -> bool {
    match controller.start_submit() {
        SubmitStart::Request(ticket) => {
            let result = gateway
                .save_section(&ticket.user_id, ticket.key, ticket.payload.clone())
                .await;
            controller.finish_submit(ticket, result)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use crate::schema::{schema_for, SectionKey};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory backend: stores section payloads keyed like the real
    /// profile document and counts calls.
    #[derive(Default)]
    struct StubGateway {
        document: Mutex<Value>,
        load_error: Mutex<Option<GatewayError>>,
        save_error: Mutex<Option<GatewayError>>,
        loads: AtomicUsize,
        saves: AtomicUsize,
    }

    impl StubGateway {
        fn with_document(document: Value) -> Self {
            Self {
                document: Mutex::new(document),
                ..Default::default()
            }
        }

        fn fail_loads(self, err: GatewayError) -> Self {
            *self.load_error.lock().unwrap() = Some(err);
            self
        }

        fn fail_saves(self, err: GatewayError) -> Self {
            *self.save_error.lock().unwrap() = Some(err);
            self
        }

        fn clear_load_error(&self) {
            *self.load_error.lock().unwrap() = None;
        }
    }

    impl ProfileGateway for StubGateway {
        async fn load_profile(&self, _user_id: &str) -> GatewayResult<ProfileDocument> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.load_error.lock().unwrap().clone() {
                return Err(err);
            }
            Ok(ProfileDocument(self.document.lock().unwrap().clone()))
        }

        async fn save_section(
            &self,
            _user_id: &str,
            key: SectionKey,
            payload: Value,
        ) -> GatewayResult<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.save_error.lock().unwrap().clone() {
                return Err(err);
            }
            let section = match key.payload_key() {
                Some(wrapper) => payload.get(wrapper).cloned().unwrap_or(Value::Null),
                None => payload,
            };
            self.document.lock().unwrap()[key.document_key()] = section;
            Ok(())
        }
    }

    fn achievements() -> SectionController {
        SectionController::new(schema_for(SectionKey::Achievements))
    }

    #[tokio::test]
    async fn stays_idle_without_a_session() {
        let gateway = StubGateway::default();
        let mut controller = achievements();
        load_via(&mut controller, &gateway, None).await;
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(gateway.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_section_opens_a_fresh_editor() {
        let gateway = StubGateway::with_document(json!({ "achievements": [] }));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.rows().len(), 1);
        assert!(controller.rows()[0].is_blank());
        assert_eq!(controller.error(), None);
    }

    #[tokio::test]
    async fn populated_section_opens_in_viewing() {
        let gateway = StubGateway::with_document(json!({
            "achievements": [{
                "title": "Best Paper",
                "description": "RustConf 2024",
                "date": "2024-05-01T00:00:00Z",
            }]
        }));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;
        assert_eq!(controller.phase(), Phase::Viewing);
        assert_eq!(controller.saved().len(), 1);
        // Dates render in edit form shape.
        assert_eq!(controller.saved()[0].get("date"), "2024-05-01");
    }

    #[tokio::test]
    async fn load_failure_is_retryable() {
        let gateway = StubGateway::with_document(json!({ "achievements": [] }))
            .fail_loads(GatewayError::Unreachable);
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;
        assert_eq!(controller.phase(), Phase::Unavailable);
        assert_eq!(
            controller.error(),
            Some("An unexpected error occurred. Please try again.")
        );

        gateway.clear_load_error();
        load_via(&mut controller, &gateway, Some("u1")).await;
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(gateway.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_network() {
        let gateway = StubGateway::with_document(json!({ "achievements": [] }));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;

        controller.set_field(0, "title", "Best Paper");
        // description and date still empty
        assert!(!submit_via(&mut controller, &gateway).await);
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(gateway.saves.load(Ordering::SeqCst), 0);
        assert!(controller.field_error(0, "description").is_some());
        assert!(controller.field_error(0, "date").is_some());
    }

    #[tokio::test]
    async fn save_then_reload_round_trips_the_records() {
        let gateway = StubGateway::with_document(json!({}));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;

        controller.set_field(0, "title", "Best Paper");
        controller.set_field(0, "description", "RustConf 2024");
        controller.set_field(0, "date", "2024-05-01");
        controller.set_field(0, "issuer", "RustConf");
        assert!(submit_via(&mut controller, &gateway).await);
        assert_eq!(controller.phase(), Phase::Viewing);
        let submitted = controller.saved().to_vec();

        let mut fresh = achievements();
        load_via(&mut fresh, &gateway, Some("u1")).await;
        assert_eq!(fresh.phase(), Phase::Viewing);
        assert_eq!(fresh.saved(), submitted.as_slice());
    }

    #[tokio::test]
    async fn blank_trailing_rows_never_reach_the_saved_view() {
        let gateway = StubGateway::with_document(json!({ "achievements": [] }));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;

        controller.set_field(0, "title", "Best Paper");
        controller.set_field(0, "description", "RustConf 2024");
        controller.set_field(0, "date", "2024-05-01");
        controller.add_row();
        assert_eq!(controller.rows().len(), 2);

        assert!(submit_via(&mut controller, &gateway).await);
        assert_eq!(controller.phase(), Phase::Viewing);
        // The blank row was never sent, so the view must not show it either.
        assert_eq!(controller.saved().len(), 1);

        let mut fresh = achievements();
        load_via(&mut fresh, &gateway, Some("u1")).await;
        assert_eq!(fresh.saved(), controller.saved());
    }

    #[tokio::test]
    async fn all_blank_rows_fail_validation_instead_of_clearing() {
        let gateway = StubGateway::with_document(json!({ "achievements": [] }));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;

        controller.add_row();
        assert!(matches!(controller.start_submit(), SubmitStart::Invalid));
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(gateway.saves.load(Ordering::SeqCst), 0);
        assert!(controller.field_error(0, "title").is_some());
    }

    #[tokio::test]
    async fn urls_are_normalized_on_submit() {
        let gateway = StubGateway::with_document(json!({}));
        let mut controller = SectionController::new(schema_for(SectionKey::Socials));
        load_via(&mut controller, &gateway, Some("u1")).await;

        controller.set_field(0, "github", "github.com/ada");
        controller.set_field(0, "website", "https://ada.dev");
        assert!(submit_via(&mut controller, &gateway).await);
        let saved = &gateway.document.lock().unwrap()["socials"];
        assert_eq!(saved["github"], "https://github.com/ada");
        assert_eq!(saved["website"], "https://ada.dev");
        // The normalized value is what the view shows.
        assert_eq!(controller.saved()[0].get("github"), "https://github.com/ada");
    }

    #[tokio::test]
    async fn rejected_save_keeps_the_draft_and_surfaces_the_message() {
        let gateway = StubGateway::with_document(json!({ "achievements": [] }))
            .fail_saves(GatewayError::Rejected("Profile is locked".to_string()));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;

        controller.set_field(0, "title", "Best Paper");
        controller.set_field(0, "description", "RustConf 2024");
        controller.set_field(0, "date", "2024-05-01");
        assert!(!submit_via(&mut controller, &gateway).await);
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.error(), Some("Profile is locked"));
        assert_eq!(controller.rows()[0].get("title"), "Best Paper");
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_refused() {
        let gateway = StubGateway::with_document(json!({ "achievements": [] }));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;

        controller.set_field(0, "title", "Best Paper");
        controller.set_field(0, "description", "RustConf 2024");
        controller.set_field(0, "date", "2024-05-01");

        let first = controller.start_submit();
        assert!(matches!(first, SubmitStart::Request(_)));
        assert!(matches!(controller.start_submit(), SubmitStart::InFlight));

        if let SubmitStart::Request(ticket) = first {
            assert!(controller.finish_submit(ticket, Ok(())));
        }
        assert_eq!(controller.phase(), Phase::Viewing);
    }

    #[tokio::test]
    async fn stale_load_results_are_ignored() {
        let gateway = StubGateway::with_document(json!({
            "achievements": [{ "title": "Old", "description": "x", "date": "2020-01-01" }]
        }));
        let mut controller = achievements();

        let stale = controller.start_load(Some("u1")).unwrap();
        let fresh = controller.start_load(Some("u1")).unwrap();

        let fresh_result = gateway.load_profile("u1").await;
        controller.finish_load(fresh, fresh_result);
        assert_eq!(controller.phase(), Phase::Viewing);

        // The first request resolves late with an error; nothing changes.
        controller.finish_load(stale, Err(GatewayError::Unreachable));
        assert_eq!(controller.phase(), Phase::Viewing);
        assert_eq!(controller.error(), None);
    }

    #[tokio::test]
    async fn edit_reenters_editing_with_saved_records() {
        let gateway = StubGateway::with_document(json!({
            "achievements": [{ "title": "Best Paper", "description": "x", "date": "2024-05-01" }]
        }));
        let mut controller = achievements();
        load_via(&mut controller, &gateway, Some("u1")).await;
        assert_eq!(controller.phase(), Phase::Viewing);

        controller.edit();
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.rows()[0].get("title"), "Best Paper");
    }
}
