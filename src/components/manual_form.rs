use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::components::status_line::StatusReporter;
use crate::error::ErrorReporter;
use crate::state::manual::{submit_manual_entry, ManualEntryFields, ManualField};

/// Direct form for logging an entry without the chat.
#[component]
pub fn ManualForm(reporter: StatusReporter, on_saved: Callback<()>) -> impl IntoView {
    let backend = expect_context::<HttpBackend>();
    let fields = RwSignal::new(ManualEntryFields::default());
    let (saving, set_saving) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let backend = backend.clone();
        let current = fields.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            match submit_manual_entry(&backend, &current).await {
                Ok(()) => {
                    let _ = fields.try_set(ManualEntryFields::default());
                    on_saved.run(());
                }
                Err(e) => reporter.report("Adding entry", &e),
            }
            let _ = set_saving.try_set(false);
        });
    };

    view! {
        <form class="manual-entry-form" on:submit=submit>
            <FieldInput label="Name" kind="text" fields=fields field=ManualField::Name />
            <FieldInput label="Calories" kind="number" fields=fields field=ManualField::Calories />
            <FieldInput label="Protein (g)" kind="number" fields=fields field=ManualField::Protein />
            <FieldInput label="Carbs (g)" kind="number" fields=fields field=ManualField::Carbs />
            <FieldInput label="Fat (g)" kind="number" fields=fields field=ManualField::Fat />
            <FieldInput label="Sugar (g)" kind="number" fields=fields field=ManualField::Sugar />
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Add Entry" }}
            </button>
        </form>
    }
}

#[component]
fn FieldInput(
    label: &'static str,
    kind: &'static str,
    fields: RwSignal<ManualEntryFields>,
    field: ManualField,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=kind
                step="any"
                class="input"
                prop:value=move || fields.with(|f| f.get(field).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    fields.update(|f| f.set(field, value));
                }
            />
        </div>
    }
}
