use dioxus::prelude::*;
use profile::{schema_for, FieldKind, Record, SectionKey, SectionShape};

/// Read-only rendering of a section's saved records, with an Edit action.
#[component]
pub fn SectionSummary(
    section: SectionKey,
    records: Vec<Record>,
    on_edit: EventHandler<()>,
) -> Element {
    let schema = schema_for(section);

    rsx! {
        div {
            class: "section-summary",
            div {
                class: "section-summary-header",
                h2 { "{schema.key.title()}" }
                crate::components::Button {
                    variant: crate::components::ButtonVariant::Outline,
                    onclick: move |_| on_edit.call(()),
                    "Edit"
                }
            }
            if schema.shape == SectionShape::StringList {
                div {
                    class: "summary-chips",
                    for (index, record) in records.iter().enumerate() {
                        span { key: "{index}", class: "chip", "{record.get(schema.fields[0].name)}" }
                    }
                }
            } else {
                for (index, record) in records.iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "summary-card",
                        for spec in schema.fields {
                            {summary_field(record, spec.name, spec.label, spec.kind)}
                        }
                    }
                }
            }
        }
    }
}

fn summary_field(
    record: &Record,
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
) -> Element {
    let raw = record.get(name);
    let value = match kind {
        FieldKind::Flag => {
            if raw.is_empty() {
                return rsx! {};
            }
            if raw == "true" { "Yes".to_string() } else { "No".to_string() }
        }
        _ => {
            if raw.trim().is_empty() {
                return rsx! {};
            }
            raw.to_string()
        }
    };

    rsx! {
        div {
            class: "summary-field",
            span { class: "summary-label", "{label}" }
            if kind == FieldKind::Url {
                a { class: "summary-value", href: "{value}", target: "_blank", "{value}" }
            } else {
                span { class: "summary-value", "{value}" }
            }
        }
    }
}
