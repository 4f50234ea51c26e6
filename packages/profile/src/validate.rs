//! # Client-side validation and submit-time normalization
//!
//! Runs before any network call: a draft that fails here never reaches the
//! gateway. Rules are driven entirely by the section schema — required
//! fields must be non-empty, date fields must be ISO `YYYY-MM-DD`, email
//! fields must look like an address, and URL fields are normalized by
//! prefixing `https://` when no scheme is present.

use chrono::NaiveDate;

use crate::record::Record;
use crate::schema::{FieldKind, SectionSchema};

/// A validation failure attached to one field of one row.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub row: usize,
    pub field: &'static str,
    pub message: String,
}

/// Validate a draft against its schema. Empty means the draft may be
/// submitted.
pub fn validate(schema: &SectionSchema, rows: &[Record]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if schema.require_any && rows.iter().all(Record::is_blank) {
        errors.push(FieldError {
            row: 0,
            field: schema.fields[0].name,
            message: format!("At least one {} entry is required.", schema.row_label.to_lowercase()),
        });
        return errors;
    }

    for (index, row) in rows.iter().enumerate() {
        // Trailing blank rows on optional-list sections are dropped at
        // serialization time, not flagged here.
        if row.is_blank() && rows.len() > 1 {
            continue;
        }
        for spec in schema.fields {
            let value = row.get(spec.name);
            let trimmed = value.trim();

            if spec.required && trimmed.is_empty() {
                errors.push(FieldError {
                    row: index,
                    field: spec.name,
                    message: format!("{} is required.", spec.label),
                });
                continue;
            }
            if trimmed.is_empty() {
                continue;
            }
            match spec.kind {
                FieldKind::Date if !is_iso_date(trimmed) => errors.push(FieldError {
                    row: index,
                    field: spec.name,
                    message: format!("{} must be a date in YYYY-MM-DD format.", spec.label),
                }),
                FieldKind::Email if !is_email(trimmed) => errors.push(FieldError {
                    row: index,
                    field: spec.name,
                    message: "Invalid email format.".to_string(),
                }),
                _ => {}
            }
        }
    }

    errors
}

/// Rewrite a draft in place before serialization: trims whitespace, strips
/// time suffixes from dates, and prefixes `https://` onto scheme-less URLs.
pub fn normalize(schema: &SectionSchema, rows: &mut [Record]) {
    for row in rows {
        for spec in schema.fields {
            let value = row.get(spec.name);
            let normalized = match spec.kind {
                FieldKind::Url => normalize_url(value),
                FieldKind::Date => crate::draft::display_date(value.trim()).to_string(),
                FieldKind::Flag => value.to_string(),
                _ => value.trim().to_string(),
            };
            if normalized != value {
                row.set(spec.name, normalized);
            }
        }
    }
}

/// Prefix `https://` when the value carries no scheme. Empty input stays
/// empty; an explicit `http://` or `https://` is kept as-is.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
    {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{schema_for, SectionKey};

    fn achievement(title: &str, description: &str, date: &str) -> Record {
        let mut record = Record::new();
        record.set("title", title);
        record.set("description", description);
        record.set("date", date);
        record
    }

    #[test]
    fn required_fields_must_be_non_empty() {
        let schema = schema_for(SectionKey::Achievements);
        let errors = validate(schema, &[achievement("", "won", "2024-05-01")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[0].message, "Title is required.");
    }

    #[test]
    fn dates_must_be_iso_formatted() {
        let schema = schema_for(SectionKey::Achievements);
        let errors = validate(schema, &[achievement("x", "y", "05/01/2024")]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "date");

        assert!(validate(schema, &[achievement("x", "y", "2024-05-01")]).is_empty());
        // Real calendar dates only.
        assert!(!validate(schema, &[achievement("x", "y", "2024-13-41")]).is_empty());
    }

    #[test]
    fn email_shape_is_checked() {
        let schema = schema_for(SectionKey::PersonalInfo);
        let mut record = Record::new();
        record.set("firstName", "Ada");
        record.set("lastName", "Lovelace");
        record.set("email", "not-an-email");
        record.set("phone", "555-0100");
        let errors = validate(schema, &[record.clone()]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Invalid email format.");

        record.set("email", "ada@example.com");
        assert!(validate(schema, &[record]).is_empty());
    }

    #[test]
    fn socials_need_at_least_one_link() {
        let schema = schema_for(SectionKey::Socials);
        let errors = validate(schema, &[Record::new()]);
        assert_eq!(errors.len(), 1);

        let mut record = Record::new();
        record.set("github", "github.com/ada");
        assert!(validate(schema, &[record]).is_empty());
    }

    #[test]
    fn trailing_blank_rows_are_tolerated() {
        let schema = schema_for(SectionKey::Achievements);
        let rows = vec![achievement("x", "y", "2024-05-01"), Record::new()];
        assert!(validate(schema, &rows).is_empty());
    }

    #[test]
    fn url_normalization_adds_a_scheme_once() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("  "), "");
    }

    #[test]
    fn normalize_rewrites_urls_in_place() {
        let schema = schema_for(SectionKey::Socials);
        let mut record = Record::new();
        record.set("github", "github.com/ada");
        record.set("website", "https://ada.dev");
        let mut rows = vec![record];
        normalize(schema, &mut rows);
        assert_eq!(rows[0].get("github"), "https://github.com/ada");
        assert_eq!(rows[0].get("website"), "https://ada.dev");
    }
}
