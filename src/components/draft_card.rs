use leptos::prelude::*;

use crate::model::DraftEntry;

/// Proposed entry attached to an assistant message.
#[component]
pub fn DraftCard(draft: DraftEntry, on_confirm: Callback<DraftEntry>) -> impl IntoView {
    let title = format!("Draft: {}", draft.name);
    let kcal = format!("{} kcal", draft.total_calories);
    let protein = format!("P: {}g", draft.total_protein);
    let carbs = format!("C: {}g", draft.total_carbs);
    let fat = format!("F: {}g", draft.total_fat);

    view! {
        <div class="draft-card">
            <h4>{title}</h4>
            <div class="draft-summary">
                <span>{kcal}</span>
                <span>{protein}</span>
                <span>{carbs}</span>
                <span>{fat}</span>
            </div>
            <button
                class="btn btn-sm btn-primary"
                on:click=move |_| on_confirm.run(draft.clone())
            >
                "Confirm & Save"
            </button>
        </div>
    }
}
