//! # Profile domain crate
//!
//! Pure form/profile logic shared by every frontend surface. Nothing in here
//! touches the network or the DOM: HTTP lives behind the [`ProfileGateway`]
//! trait (implemented by the `api` crate), and rendering lives in the `ui`
//! crate. That split keeps the whole load/edit/submit lifecycle testable
//! against an in-memory stub gateway.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | The authenticated user identity (`Session`) |
//! | [`schema`] | Declarative per-section schemas: field lists, kinds, required flags, endpoint/key mapping for all nine profile sections |
//! | [`record`] | A single draft row: an ordered field → value map |
//! | [`draft`] | The in-memory working copy of a section (add/remove/edit rows) plus the JSON codec between records and the backend's wire shapes |
//! | [`validate`] | Client-side validation (required fields, ISO dates, email shape) and submit-time normalization (URL scheme prefixing) |
//! | [`gateway`] | The [`ProfileGateway`] trait, [`ProfileDocument`], and the uniform [`GatewayError`] every transport failure collapses into |
//! | [`controller`] | [`SectionController`] — the load/view/edit/submit state machine instantiated once per section |

pub mod controller;
pub mod draft;
pub mod gateway;
pub mod record;
pub mod schema;
pub mod session;
pub mod validate;

pub use controller::{
    load_via, submit_via, LoadTicket, Phase, SaveTicket, SectionController, SubmitStart,
};
pub use draft::{parse_section, section_payload, SectionDraft};
pub use gateway::{GatewayError, GatewayResult, ProfileDocument, ProfileGateway};
pub use record::Record;
pub use schema::{schema_for, FieldKind, FieldSpec, SectionKey, SectionSchema, SectionShape};
pub use session::Session;
pub use validate::{normalize, normalize_url, validate, FieldError};
