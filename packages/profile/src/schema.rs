//! # Declarative section schemas
//!
//! Each of the nine profile sections is described by a [`SectionSchema`]: its
//! wire identifiers, its shape on the wire, and the list of fields a row
//! carries. One generic form controller consumes these instead of nine
//! near-duplicate components.
//!
//! The backend is asymmetric about naming: sections are *written* via
//! `POST /profile/{userId}/{endpoint}` with a section-specific payload key,
//! but *read* back from the aggregate profile document under the storage
//! model's field name. [`SectionKey::endpoint`], [`SectionKey::payload_key`]
//! and [`SectionKey::document_key`] capture all three.

use serde::{Deserialize, Serialize};

/// The nine profile sub-resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKey {
    PersonalInfo,
    Academics,
    Projects,
    Skills,
    WorkExperience,
    Certifications,
    Achievements,
    Publications,
    Socials,
}

impl SectionKey {
    /// Every section, in the order the profile wizard presents them.
    pub const ALL: [SectionKey; 9] = [
        SectionKey::PersonalInfo,
        SectionKey::Academics,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::WorkExperience,
        SectionKey::Certifications,
        SectionKey::Achievements,
        SectionKey::Publications,
        SectionKey::Socials,
    ];

    /// Path segment of the write endpoint: `POST /profile/{userId}/{endpoint}`.
    pub fn endpoint(self) -> &'static str {
        match self {
            SectionKey::PersonalInfo => "personal_info",
            SectionKey::Academics => "academic_info",
            SectionKey::Projects => "project_info",
            SectionKey::Skills => "skill_info",
            SectionKey::WorkExperience => "workex_info",
            SectionKey::Certifications => "certification_info",
            SectionKey::Achievements => "achievement_info",
            SectionKey::Publications => "publication_info",
            SectionKey::Socials => "socials",
        }
    }

    /// Key wrapping the record array in the write body, or `None` for the
    /// sections posted as a flat object (personal info, socials).
    pub fn payload_key(self) -> Option<&'static str> {
        match self {
            SectionKey::PersonalInfo => None,
            SectionKey::Academics => Some("academics"),
            SectionKey::Projects => Some("projects"),
            SectionKey::Skills => Some("skills"),
            SectionKey::WorkExperience => Some("work_experience"),
            SectionKey::Certifications => Some("certifications"),
            SectionKey::Achievements => Some("achievements"),
            SectionKey::Publications => Some("publications"),
            SectionKey::Socials => None,
        }
    }

    /// Field name this section appears under in the aggregate profile
    /// document returned by `getprofile`.
    pub fn document_key(self) -> &'static str {
        match self {
            SectionKey::PersonalInfo => "personalInfo",
            SectionKey::Academics => "academic",
            SectionKey::Projects => "projects",
            SectionKey::Skills => "skills",
            SectionKey::WorkExperience => "workEx",
            SectionKey::Certifications => "certifications",
            SectionKey::Achievements => "achievements",
            SectionKey::Publications => "publications",
            SectionKey::Socials => "socials",
        }
    }

    /// Human-readable tab title.
    pub fn title(self) -> &'static str {
        match self {
            SectionKey::PersonalInfo => "Personal Info",
            SectionKey::Academics => "Academic Info",
            SectionKey::Projects => "Projects",
            SectionKey::Skills => "Skills",
            SectionKey::WorkExperience => "Work Experience",
            SectionKey::Certifications => "Certifications",
            SectionKey::Achievements => "Achievements",
            SectionKey::Publications => "Publications",
            SectionKey::Socials => "Social Links",
        }
    }
}

/// How a field is edited, validated, and serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Multi-line text, rendered as a textarea.
    LongText,
    /// ISO `YYYY-MM-DD` date.
    Date,
    Email,
    /// Normalized on submit: `https://` is prefixed when no scheme is present.
    Url,
    /// Checkbox; the draft holds `"true"` / `"false"`, the wire holds a bool.
    Flag,
    /// Comma-separated in the draft, an array of strings on the wire.
    Tags,
}

/// One editable field of a section row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Nested object the field serializes under (e.g. the personal-info
    /// address block), or `None` for a top-level field.
    pub group: Option<&'static str>,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: false,
        group: None,
    }
}

const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: true,
        group: None,
    }
}

const fn address(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Text,
        required: false,
        group: Some("address"),
    }
}

/// Wire shape of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionShape {
    /// An array of objects; the whole array is replaced on save.
    RecordList,
    /// A single object (personal info, socials); edited as exactly one row.
    SingleRecord,
    /// An array of plain strings (skills); each row holds one value.
    StringList,
}

/// Everything the generic form controller needs to know about one section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionSchema {
    pub key: SectionKey,
    pub shape: SectionShape,
    pub fields: &'static [FieldSpec],
    /// Heading for one row in the editor ("Achievement 1", "Add Another
    /// Achievement").
    pub row_label: &'static str,
    /// Reject submission unless at least one field is non-empty. Used by
    /// socials, where every field is individually optional.
    pub require_any: bool,
}

static PERSONAL_INFO: SectionSchema = SectionSchema {
    key: SectionKey::PersonalInfo,
    shape: SectionShape::SingleRecord,
    fields: &[
        required("firstName", "First Name", FieldKind::Text),
        required("lastName", "Last Name", FieldKind::Text),
        required("email", "Email", FieldKind::Email),
        required("phone", "Phone", FieldKind::Text),
        field("dateOfBirth", "Date of Birth", FieldKind::Date),
        address("street", "Street"),
        address("city", "City"),
        address("state", "State"),
        address("country", "Country"),
        address("zipCode", "Zip Code"),
        field("resume", "Resume Summary", FieldKind::LongText),
    ],
    row_label: "Personal Info",
    require_any: false,
};

static ACADEMICS: SectionSchema = SectionSchema {
    key: SectionKey::Academics,
    shape: SectionShape::RecordList,
    fields: &[
        required("institution", "Institution", FieldKind::Text),
        required("degree", "Degree", FieldKind::Text),
        field("fieldOfStudy", "Field of Study", FieldKind::Text),
        field("startDate", "Start Date", FieldKind::Date),
        field("endDate", "End Date", FieldKind::Date),
        field("grade", "Grade", FieldKind::Text),
        field("description", "Description", FieldKind::LongText),
    ],
    row_label: "Academic Entry",
    require_any: false,
};

static PROJECTS: SectionSchema = SectionSchema {
    key: SectionKey::Projects,
    shape: SectionShape::RecordList,
    fields: &[
        required("title", "Title", FieldKind::Text),
        field("description", "Description", FieldKind::LongText),
        field("startDate", "Start Date", FieldKind::Date),
        field("endDate", "End Date", FieldKind::Date),
        field("technologiesUsed", "Technologies Used", FieldKind::Tags),
        field("projectLink", "Project Link", FieldKind::Url),
        field("isOpenSource", "Open Source", FieldKind::Flag),
    ],
    row_label: "Project",
    require_any: false,
};

static SKILLS: SectionSchema = SectionSchema {
    key: SectionKey::Skills,
    shape: SectionShape::StringList,
    fields: &[required("skill", "Skill", FieldKind::Text)],
    row_label: "Skill",
    require_any: false,
};

static WORK_EXPERIENCE: SectionSchema = SectionSchema {
    key: SectionKey::WorkExperience,
    shape: SectionShape::RecordList,
    fields: &[
        required("company", "Company", FieldKind::Text),
        required("position", "Position", FieldKind::Text),
        field("startDate", "Start Date", FieldKind::Date),
        field("endDate", "End Date", FieldKind::Date),
        field("description", "Description", FieldKind::LongText),
        field("isCurrent", "Current Position", FieldKind::Flag),
    ],
    row_label: "Work Experience",
    require_any: false,
};

static CERTIFICATIONS: SectionSchema = SectionSchema {
    key: SectionKey::Certifications,
    shape: SectionShape::RecordList,
    fields: &[
        required("name", "Name", FieldKind::Text),
        required("issuingOrganization", "Issuing Organization", FieldKind::Text),
        field("issueDate", "Issue Date", FieldKind::Date),
        field("expirationDate", "Expiration Date", FieldKind::Date),
        field("credentialId", "Credential ID", FieldKind::Text),
        field("credentialURL", "Credential URL", FieldKind::Url),
    ],
    row_label: "Certification",
    require_any: false,
};

static ACHIEVEMENTS: SectionSchema = SectionSchema {
    key: SectionKey::Achievements,
    shape: SectionShape::RecordList,
    fields: &[
        required("title", "Title", FieldKind::Text),
        required("description", "Description", FieldKind::LongText),
        required("date", "Date", FieldKind::Date),
        field("issuer", "Issuer", FieldKind::Text),
    ],
    row_label: "Achievement",
    require_any: false,
};

static PUBLICATIONS: SectionSchema = SectionSchema {
    key: SectionKey::Publications,
    shape: SectionShape::RecordList,
    fields: &[
        required("title", "Title", FieldKind::Text),
        required("publisher", "Publisher", FieldKind::Text),
        field("publicationDate", "Publication Date", FieldKind::Date),
        field("description", "Description", FieldKind::LongText),
        field("link", "Link", FieldKind::Url),
    ],
    row_label: "Publication",
    require_any: false,
};

static SOCIALS: SectionSchema = SectionSchema {
    key: SectionKey::Socials,
    shape: SectionShape::SingleRecord,
    fields: &[
        field("linkedIn", "LinkedIn", FieldKind::Url),
        field("github", "GitHub", FieldKind::Url),
        field("twitter", "Twitter", FieldKind::Url),
        field("website", "Website", FieldKind::Url),
        field("medium", "Medium", FieldKind::Url),
        field("stackOverflow", "Stack Overflow", FieldKind::Url),
        field("leetcode", "LeetCode", FieldKind::Url),
    ],
    row_label: "Social Links",
    require_any: true,
};

/// Schema lookup for a section key.
pub fn schema_for(key: SectionKey) -> &'static SectionSchema {
    match key {
        SectionKey::PersonalInfo => &PERSONAL_INFO,
        SectionKey::Academics => &ACADEMICS,
        SectionKey::Projects => &PROJECTS,
        SectionKey::Skills => &SKILLS,
        SectionKey::WorkExperience => &WORK_EXPERIENCE,
        SectionKey::Certifications => &CERTIFICATIONS,
        SectionKey::Achievements => &ACHIEVEMENTS,
        SectionKey::Publications => &PUBLICATIONS,
        SectionKey::Socials => &SOCIALS,
    }
}
