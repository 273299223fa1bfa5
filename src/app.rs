use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::api::HttpBackend;
use crate::components::sidebar::Sidebar;
use crate::config::ClientConfig;
use crate::pages::settings::SettingsPage;
use crate::pages::tracker::TrackerPage;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    provide_context(HttpBackend::new(config));

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=TrackerPage />
                        <Route path=path!("/settings") view=SettingsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
