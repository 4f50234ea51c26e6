//! # Section drafts and the wire codec
//!
//! [`SectionDraft`] is the unsaved working copy of a section while the user
//! edits it. The codec functions translate between draft records and the
//! backend's JSON shapes: record lists are posted as an array under the
//! section's payload key, personal info and socials as a flat object (with
//! the address block nested), and skills as an array of plain strings.

use serde_json::{json, Map, Value};

use crate::record::Record;
use crate::schema::{FieldKind, FieldSpec, SectionSchema, SectionShape};

/// The in-memory, not-yet-persisted copy of a section's records.
///
/// A draft always holds at least one row while editing: removing the last
/// remaining row is a no-op, and constructing from an empty record set
/// backfills a single blank row.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionDraft {
    schema: &'static SectionSchema,
    rows: Vec<Record>,
}

impl SectionDraft {
    /// A draft with a single blank row.
    pub fn blank(schema: &'static SectionSchema) -> Self {
        Self {
            schema,
            rows: vec![Record::new()],
        }
    }

    /// A draft preloaded with saved records.
    pub fn from_records(schema: &'static SectionSchema, records: Vec<Record>) -> Self {
        let rows = if records.is_empty() {
            vec![Record::new()]
        } else {
            records
        };
        Self { schema, rows }
    }

    pub fn schema(&self) -> &'static SectionSchema {
        self.schema
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a blank row. Existing rows are untouched.
    pub fn add_row(&mut self) {
        self.rows.push(Record::new());
    }

    /// Remove the row at `index`. A no-op when only one row remains (the
    /// editor always keeps at least one editable row) or when `index` is out
    /// of range. Returns whether a row was removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Update one field of one row. Other rows and fields are untouched.
    pub fn set_field(&mut self, index: usize, field: &'static str, value: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.set(field, value);
        }
    }

    /// Replace all rows (used when submit-time normalization rewrote them).
    pub(crate) fn replace_rows(&mut self, rows: Vec<Record>) {
        self.rows = if rows.is_empty() {
            vec![Record::new()]
        } else {
            rows
        };
    }
}

/// Strip a time suffix from a backend date, so `"2024-05-01T00:00:00Z"`
/// renders (and round-trips) as `"2024-05-01"`.
pub fn display_date(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}

/// Parse one section out of the aggregate profile document.
///
/// Fully blank records are dropped, so an absent section, an empty array,
/// and an all-empty object all come back as an empty vec — the caller's
/// signal to open a fresh editor instead of the read-only view.
pub fn parse_section(schema: &'static SectionSchema, value: &Value) -> Vec<Record> {
    let mut records = match schema.shape {
        SectionShape::RecordList => value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .map(|item| record_from_value(schema, item))
                    .collect()
            })
            .unwrap_or_default(),
        SectionShape::SingleRecord => {
            if value.is_object() {
                vec![record_from_value(schema, value)]
            } else {
                Vec::new()
            }
        }
        SectionShape::StringList => value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|s| {
                        let mut record = Record::new();
                        record.set(schema.fields[0].name, s.trim());
                        record
                    })
                    .collect()
            })
            .unwrap_or_default(),
    };
    records.retain(|record| !record.is_blank());
    records
}

fn record_from_value(schema: &SectionSchema, value: &Value) -> Record {
    let mut record = Record::new();
    for spec in schema.fields {
        let source = match spec.group {
            Some(group) => value.get(group).and_then(|nested| nested.get(spec.name)),
            None => value.get(spec.name),
        };
        let Some(source) = source else { continue };
        match source {
            Value::String(s) => {
                let s = if spec.kind == FieldKind::Date {
                    display_date(s)
                } else {
                    s.as_str()
                };
                record.set(spec.name, s);
            }
            Value::Bool(b) => record.set(spec.name, if *b { "true" } else { "false" }),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                record.set(spec.name, joined);
            }
            Value::Number(n) => record.set(spec.name, n.to_string()),
            _ => {}
        }
    }
    record
}

/// Serialize records into the body for `POST /profile/{userId}/{endpoint}`.
///
/// Blank rows are dropped; empty optional fields are omitted rather than
/// sent as `""`.
pub fn section_payload(schema: &'static SectionSchema, rows: &[Record]) -> Value {
    match schema.shape {
        SectionShape::RecordList => {
            let items: Vec<Value> = rows
                .iter()
                .filter(|row| !row.is_blank())
                .map(|row| record_to_value(schema, row))
                .collect();
            wrap(schema, Value::Array(items))
        }
        SectionShape::SingleRecord => rows
            .iter()
            .find(|row| !row.is_blank())
            .map(|row| record_to_value(schema, row))
            .unwrap_or_else(|| json!({})),
        SectionShape::StringList => {
            let items: Vec<Value> = rows
                .iter()
                .map(|row| row.get(schema.fields[0].name).trim())
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect();
            wrap(schema, Value::Array(items))
        }
    }
}

fn wrap(schema: &SectionSchema, inner: Value) -> Value {
    match schema.key.payload_key() {
        Some(key) => json!({ key: inner }),
        None => inner,
    }
}

fn record_to_value(schema: &SectionSchema, record: &Record) -> Value {
    let mut object = Map::new();
    for spec in schema.fields {
        let Some(value) = field_value(spec, record.get(spec.name)) else {
            continue;
        };
        match spec.group {
            Some(group) => {
                let nested = object
                    .entry(group.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(nested) = nested {
                    nested.insert(spec.name.to_string(), value);
                }
            }
            None => {
                object.insert(spec.name.to_string(), value);
            }
        }
    }
    Value::Object(object)
}

fn field_value(spec: &FieldSpec, raw: &str) -> Option<Value> {
    match spec.kind {
        FieldKind::Flag => {
            if raw.is_empty() {
                None
            } else {
                Some(Value::Bool(raw == "true"))
            }
        }
        FieldKind::Tags => {
            let tags: Vec<Value> = raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| Value::String(t.to_string()))
                .collect();
            if tags.is_empty() {
                None
            } else {
                Some(Value::Array(tags))
            }
        }
        _ => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Value::String(trimmed.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{schema_for, SectionKey};

    #[test]
    fn remove_row_is_a_noop_on_a_single_row() {
        let mut draft = SectionDraft::blank(schema_for(SectionKey::Achievements));
        draft.set_field(0, "title", "Hackathon winner");
        assert!(!draft.remove_row(0));
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.rows()[0].get("title"), "Hackathon winner");
    }

    #[test]
    fn add_row_preserves_existing_values() {
        let mut draft = SectionDraft::blank(schema_for(SectionKey::Achievements));
        draft.set_field(0, "title", "Hackathon winner");
        draft.set_field(0, "date", "2024-05-01");
        draft.add_row();
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.rows()[0].get("title"), "Hackathon winner");
        assert_eq!(draft.rows()[0].get("date"), "2024-05-01");
        assert!(draft.rows()[1].is_blank());
    }

    #[test]
    fn set_field_touches_exactly_one_row() {
        let mut draft = SectionDraft::blank(schema_for(SectionKey::Skills));
        draft.set_field(0, "skill", "Rust");
        draft.add_row();
        draft.set_field(1, "skill", "SQL");
        assert_eq!(draft.rows()[0].get("skill"), "Rust");
        assert_eq!(draft.rows()[1].get("skill"), "SQL");
    }

    #[test]
    fn record_list_payload_is_wrapped_under_the_section_key() {
        let schema = schema_for(SectionKey::Achievements);
        let mut draft = SectionDraft::blank(schema);
        draft.set_field(0, "title", "Best Paper");
        draft.set_field(0, "description", "Awarded at RustConf");
        draft.set_field(0, "date", "2024-05-01");
        let payload = section_payload(schema, draft.rows());
        assert_eq!(
            payload,
            serde_json::json!({
                "achievements": [{
                    "title": "Best Paper",
                    "description": "Awarded at RustConf",
                    "date": "2024-05-01",
                }]
            })
        );
    }

    #[test]
    fn skills_serialize_as_plain_strings() {
        let schema = schema_for(SectionKey::Skills);
        let mut draft = SectionDraft::blank(schema);
        draft.set_field(0, "skill", "Rust");
        draft.add_row();
        draft.set_field(1, "skill", "  PostgreSQL  ");
        let payload = section_payload(schema, draft.rows());
        assert_eq!(payload, serde_json::json!({ "skills": ["Rust", "PostgreSQL"] }));
    }

    #[test]
    fn personal_info_nests_the_address_block() {
        let schema = schema_for(SectionKey::PersonalInfo);
        let mut draft = SectionDraft::blank(schema);
        draft.set_field(0, "firstName", "Ada");
        draft.set_field(0, "lastName", "Lovelace");
        draft.set_field(0, "email", "ada@example.com");
        draft.set_field(0, "phone", "555-0100");
        draft.set_field(0, "city", "London");
        let payload = section_payload(schema, draft.rows());
        assert_eq!(payload["firstName"], "Ada");
        assert_eq!(payload["address"]["city"], "London");
        assert!(payload.get("dateOfBirth").is_none());
    }

    #[test]
    fn socials_post_a_flat_object_without_empty_fields() {
        let schema = schema_for(SectionKey::Socials);
        let mut draft = SectionDraft::blank(schema);
        draft.set_field(0, "github", "https://github.com/ada");
        let payload = section_payload(schema, draft.rows());
        assert_eq!(payload, serde_json::json!({ "github": "https://github.com/ada" }));
    }

    #[test]
    fn flags_and_tags_take_their_wire_types() {
        let schema = schema_for(SectionKey::Projects);
        let mut draft = SectionDraft::blank(schema);
        draft.set_field(0, "title", "uply");
        draft.set_field(0, "technologiesUsed", "Rust, Dioxus , ");
        draft.set_field(0, "isOpenSource", "true");
        let payload = section_payload(schema, draft.rows());
        let project = &payload["projects"][0];
        assert_eq!(project["technologiesUsed"], serde_json::json!(["Rust", "Dioxus"]));
        assert_eq!(project["isOpenSource"], serde_json::json!(true));
    }

    #[test]
    fn parse_round_trips_the_payload() {
        let schema = schema_for(SectionKey::Projects);
        let mut draft = SectionDraft::blank(schema);
        draft.set_field(0, "title", "uply");
        draft.set_field(0, "technologiesUsed", "Rust, Dioxus");
        draft.set_field(0, "isOpenSource", "true");
        let payload = section_payload(schema, draft.rows());
        let parsed = parse_section(schema, &payload["projects"]);
        assert_eq!(parsed, draft.rows().to_vec());
    }

    #[test]
    fn parse_strips_time_suffixes_from_dates() {
        let schema = schema_for(SectionKey::Achievements);
        let parsed = parse_section(
            schema,
            &serde_json::json!([{
                "title": "Best Paper",
                "description": "x",
                "date": "2024-05-01T00:00:00Z",
            }]),
        );
        assert_eq!(parsed[0].get("date"), "2024-05-01");
    }

    #[test]
    fn parse_treats_empty_and_absent_sections_alike() {
        let schema = schema_for(SectionKey::Achievements);
        assert!(parse_section(schema, &serde_json::json!([])).is_empty());
        assert!(parse_section(schema, &Value::Null).is_empty());
        let socials = schema_for(SectionKey::Socials);
        assert!(parse_section(socials, &serde_json::json!({"github": ""})).is_empty());
    }
}
