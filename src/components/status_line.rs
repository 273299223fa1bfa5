use leptos::prelude::*;

use crate::error::{ClientError, ErrorReporter, LogReporter};

/// Reports failures to the console and to a status line on the page.
#[derive(Clone, Copy)]
pub struct StatusReporter {
    set_status: WriteSignal<Option<String>>,
}

impl StatusReporter {
    pub fn new(set_status: WriteSignal<Option<String>>) -> Self {
        Self { set_status }
    }
}

impl ErrorReporter for StatusReporter {
    fn report(&self, action: &str, err: &ClientError) {
        LogReporter.report(action, err);
        // The page may already be gone by the time a request fails.
        let _ = self
            .set_status
            .try_set(Some(format!("{} failed: {}", action, err)));
    }
}

#[component]
pub fn StatusLine(status: ReadSignal<Option<String>>, set_status: WriteSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || status.get().is_some()>
            <div class="status-line status-error">
                <span class="status-text">{move || status.get().unwrap_or_default()}</span>
                <button class="btn btn-small btn-secondary" on:click=move |_| set_status.set(None)>
                    "Dismiss"
                </button>
            </div>
        </Show>
    }
}
