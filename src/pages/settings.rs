use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::components::status_line::{StatusLine, StatusReporter};
use crate::error::ErrorReporter;
use crate::notify;
use crate::settings::{self, browser_settings, Settings};

#[component]
pub fn SettingsPage() -> impl IntoView {
    let backend = expect_context::<HttpBackend>();
    let (provider, set_provider) = signal(String::new());
    let (base_url, set_base_url) = signal(String::new());
    let (model, set_model) = signal(String::new());
    let (testing, set_testing) = signal(false);
    let (status, set_status) = signal::<Option<String>>(None);
    let reporter = StatusReporter::new(set_status);

    // Load saved settings on mount
    match browser_settings().load() {
        Ok(saved) => {
            set_provider.set(saved.provider);
            set_base_url.set(saved.base_url);
            set_model.set(saved.model);
        }
        Err(e) => reporter.report("Loading settings", &e),
    }

    let current = move || Settings {
        provider: provider.get_untracked(),
        base_url: base_url.get_untracked(),
        model: model.get_untracked(),
    };

    let save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match browser_settings().save(&current()) {
            Ok(()) => {
                set_status.set(None);
                notify::alert("Settings saved");
            }
            Err(e) => reporter.report("Saving settings", &e),
        }
    };

    let test = move |_| {
        let backend = backend.clone();
        let probe = current();
        set_testing.set(true);
        spawn_local(async move {
            match settings::test_connection(&backend, &probe).await {
                Ok(reply) => notify::alert(&reply),
                Err(e) => reporter.report("Connection test", &e),
            }
            let _ = set_testing.try_set(false);
        });
    };

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"Language Model"</h3>
                <p class="section-description">
                    "Stored in this browser only. The backend uses these to reach your model."
                </p>
                <StatusLine status=status set_status=set_status />

                <form class="settings-form" on:submit=save>
                    <div class="form-group">
                        <label for="provider">"Provider"</label>
                        <input
                            id="provider"
                            type="text"
                            class="input"
                            placeholder=settings::DEFAULT_PROVIDER
                            prop:value=move || provider.get()
                            on:input=move |ev| set_provider.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="base-url">"Base URL"</label>
                        <input
                            id="base-url"
                            type="text"
                            class="input"
                            placeholder=settings::DEFAULT_BASE_URL
                            prop:value=move || base_url.get()
                            on:input=move |ev| set_base_url.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="model">"Model"</label>
                        <input
                            id="model"
                            type="text"
                            class="input"
                            placeholder=settings::DEFAULT_MODEL
                            prop:value=move || model.get()
                            on:input=move |ev| set_model.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="input-row">
                        <button type="submit" class="btn btn-save">"Save"</button>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            on:click=test
                            disabled=move || testing.get()
                        >
                            {move || if testing.get() { "Testing..." } else { "Test Connection" }}
                        </button>
                    </div>
                </form>
            </section>
        </div>
    }
}
