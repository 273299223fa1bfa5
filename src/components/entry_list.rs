use leptos::prelude::*;

use crate::state::entries::{EntryLog, EntryRow};

/// Collapsible list of the day's entries with a calorie total.
#[component]
pub fn EntryList(log: RwSignal<EntryLog>) -> impl IntoView {
    view! {
        <section class="entries">
            <div class="entries-header">
                <h3>"Daily Log"</h3>
                <span class="entries-total">
                    {move || format!("{} kcal", log.with(|l| l.total_calories()))}
                </span>
            </div>
            <ul class="entries-list">
                {move || {
                    let rows = log.with(|l| l.rows());
                    if rows.is_empty() {
                        view! { <li class="entries-empty">"Nothing logged yet."</li> }.into_any()
                    } else {
                        rows.into_iter()
                            .map(|row| view! { <EntryItem row=row log=log /> })
                            .collect::<Vec<_>>()
                            .into_any()
                    }
                }}
            </ul>
        </section>
    }
}

#[component]
fn EntryItem(row: EntryRow, log: RwSignal<EntryLog>) -> impl IntoView {
    let id = row.id;
    let class = if row.expanded {
        "entry-item expanded"
    } else {
        "entry-item"
    };

    view! {
        <li class=class>
            <div class="entry-header" on:click=move |_| log.update(|l| l.toggle_details(id))>
                <span class="entry-name">{row.name}</span>
                <span class="entry-cals">{format!("{} kcal", row.calories)}</span>
                <i class="fa-solid fa-chevron-down entry-expand-icon"></i>
            </div>
            <div class="entry-details">
                <div class="macro-grid">
                    <Macro label="Protein" grams=row.protein />
                    <Macro label="Carbs" grams=row.carbs />
                    <Macro label="Fat" grams=row.fat />
                    <Macro label="Sugar" grams=row.sugar />
                </div>
                {row.details.map(|text| view! {
                    <div class="ingredients-list"><small>{text}</small></div>
                })}
            </div>
        </li>
    }
}

#[component]
fn Macro(label: &'static str, grams: f64) -> impl IntoView {
    view! {
        <div class="macro-item">
            <span class="label">{label}</span>
            <span class="value">{format!("{}g", grams)}</span>
        </div>
    }
}
