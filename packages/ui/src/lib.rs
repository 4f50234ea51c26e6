//! This crate contains all shared UI for the workspace.

pub mod components;

mod storage;
pub use storage::{clear_stored_auth, load_stored_auth, persist_auth, StoredAuth};

pub mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod section_form;
pub use section_form::SectionForm;

mod summary;
pub use summary::SectionSummary;

mod navbar;
pub use navbar::Navbar;
