//! The generic profile section form.
//!
//! One component serves all nine sections: the schema decides the fields,
//! the controller decides the phase, and this file only maps both onto
//! elements and event handlers. Signal writes stay synchronous; awaits
//! happen between the controller's start/finish calls.

use dioxus::prelude::*;
use profile::{
    schema_for, FieldKind, FieldSpec, Phase, ProfileGateway, Record, SectionController,
    SectionKey, SectionShape, SubmitStart,
};

use crate::auth::{use_auth, AuthState};
use crate::components::{Button, ButtonVariant, Input, Label, Textarea};
use crate::SectionSummary;

#[component]
pub fn SectionForm(
    section: SectionKey,
    #[props(default)] on_complete: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let mut controller = use_signal(move || SectionController::new(schema_for(section)));
    let attempt: Signal<u32> = use_signal(|| 0);

    // Initial load; re-runs when the session identity or the retry counter
    // changes. A stale completion is dropped by the controller.
    let _loader = use_resource(move || async move {
        let _ = attempt();
        let user_id = auth().session.map(|s| s.user_id);
        let Some(ticket) = controller.write().start_load(user_id.as_deref()) else {
            return;
        };
        let client = auth.peek().client();
        let result = client.load_profile(&ticket.user_id).await;
        controller.write().finish_load(ticket, result);
    });

    let phase = controller.read().phase();
    rsx! {
        div {
            class: "section-form",
            match phase {
                Phase::Idle | Phase::Loading => rsx! {
                    div { class: "section-status", "Loading..." }
                },
                Phase::Unavailable => unavailable(controller, attempt),
                Phase::Viewing => rsx! {
                    SectionSummary {
                        section,
                        records: controller.read().saved().to_vec(),
                        on_edit: move |_| controller.write().edit(),
                    }
                },
                Phase::Editing | Phase::Submitting => editor(auth, controller, on_complete),
            }
        }
    }
}

fn unavailable(controller: Signal<SectionController>, mut attempt: Signal<u32>) -> Element {
    let message = controller
        .read()
        .error()
        .unwrap_or("Something went wrong.")
        .to_string();
    rsx! {
        div {
            class: "section-status section-status-error",
            p { class: "error-text", "{message}" }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| {
                    let next = *attempt.peek() + 1;
                    attempt.set(next);
                },
                "Retry"
            }
        }
    }
}

fn editor(
    auth: Signal<AuthState>,
    mut controller: Signal<SectionController>,
    on_complete: EventHandler<()>,
) -> Element {
    let schema = controller.read().schema();
    let rows: Vec<Record> = controller.read().rows().to_vec();
    let submitting = controller.read().phase() == Phase::Submitting;
    let root_error = controller.read().error().map(str::to_string);
    let multi_row = schema.shape != SectionShape::SingleRecord;

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let SubmitStart::Request(ticket) = controller.write().start_submit() else {
                return;
            };
            let client = auth.peek().client();
            let result = client
                .save_section(&ticket.user_id, ticket.key, ticket.payload.clone())
                .await;
            if controller.write().finish_submit(ticket, result) {
                on_complete.call(());
            }
        });
    };

    rsx! {
        form {
            class: "section-editor",
            onsubmit: handle_submit,
            h2 { "{schema.key.title()}" }

            for (index, row) in rows.iter().enumerate() {
                div {
                    key: "{index}",
                    class: "form-row-card",
                    if multi_row {
                        div {
                            class: "form-row-header",
                            h3 { "{schema.row_label} {index + 1}" }
                            Button {
                                variant: ButtonVariant::Ghost,
                                disabled: rows.len() <= 1 || submitting,
                                onclick: move |_| controller.write().remove_row(index),
                                "Remove"
                            }
                        }
                    }
                    div {
                        class: "form-fields",
                        for spec in schema.fields {
                            {field_input(controller, index, row, spec)}
                        }
                    }
                }
            }

            if let Some(message) = root_error {
                p { class: "error-text", "{message}" }
            }

            div {
                class: "form-actions",
                if multi_row {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: submitting,
                        onclick: move |_| controller.write().add_row(),
                        "Add {schema.row_label}"
                    }
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: submitting,
                    if submitting { "Saving..." } else { "Save" }
                }
            }
        }
    }
}

fn field_input(
    mut controller: Signal<SectionController>,
    index: usize,
    row: &Record,
    spec: &'static FieldSpec,
) -> Element {
    let value = row.get(spec.name).to_string();
    let error = controller
        .read()
        .field_error(index, spec.name)
        .map(str::to_string);
    let id = format!("{}-{index}", spec.name);

    let control = match spec.kind {
        FieldKind::Flag => rsx! {
            label {
                class: "label label-inline",
                input {
                    r#type: "checkbox",
                    checked: value == "true",
                    onchange: move |evt: FormEvent| {
                        let flag = if evt.checked() { "true" } else { "false" };
                        controller.write().set_field(index, spec.name, flag);
                    },
                }
                "{spec.label}"
            }
        },
        FieldKind::LongText => rsx! {
            Label { html_for: id.clone(), "{spec.label}" }
            Textarea {
                id: id.clone(),
                value: value,
                oninput: move |evt: FormEvent| {
                    controller.write().set_field(index, spec.name, evt.value());
                },
            }
        },
        kind => rsx! {
            Label { html_for: id.clone(), "{spec.label}" }
            Input {
                id: id.clone(),
                r#type: input_type(kind),
                placeholder: placeholder(kind),
                value: value,
                oninput: move |evt: FormEvent| {
                    controller.write().set_field(index, spec.name, evt.value());
                },
            }
        },
    };

    rsx! {
        div {
            class: if spec.required { "form-field form-field-required" } else { "form-field" },
            {control}
            if let Some(message) = error {
                p { class: "error-text field-error", "{message}" }
            }
        }
    }
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Date => "date",
        FieldKind::Email => "email",
        _ => "text",
    }
}

fn placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Url => "https://",
        FieldKind::Tags => "Comma-separated",
        _ => "",
    }
}
