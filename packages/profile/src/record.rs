//! A single row of a section draft.

use std::collections::BTreeMap;

/// One record of a profile section, as edited in a form.
///
/// Field values are stored as strings, exactly as the inputs produce them:
/// checkboxes hold `"true"`/`"false"`, tag lists hold a comma-separated
/// string. Empty values are not stored at all, so two records that render
/// identically compare equal regardless of which fields were ever touched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<&'static str, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field, or `""` when unset.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Set one field. Setting an empty value clears the field.
    pub fn set(&mut self, field: &'static str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Whether the record carries no meaningful input. An unchecked flag
    /// (`"false"`) does not count as input.
    pub fn is_blank(&self) -> bool {
        self.values
            .iter()
            .all(|(_, v)| v.trim().is_empty() || v == "false")
    }

    /// Iterate over the set fields.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_read_as_empty() {
        let record = Record::new();
        assert_eq!(record.get("title"), "");
        assert!(record.is_blank());
    }

    #[test]
    fn clearing_a_field_restores_blankness() {
        let mut record = Record::new();
        record.set("title", "Dean's List");
        assert!(!record.is_blank());
        record.set("title", "");
        assert!(record.is_blank());
        assert_eq!(record, Record::new());
    }

    #[test]
    fn unchecked_flags_do_not_count_as_input() {
        let mut record = Record::new();
        record.set("isCurrent", "false");
        assert!(record.is_blank());
        record.set("isCurrent", "true");
        assert!(!record.is_blank());
    }
}
