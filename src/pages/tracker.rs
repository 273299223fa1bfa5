use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{Backend, HttpBackend};
use crate::components::chat_panel::ChatPanel;
use crate::components::entry_list::EntryList;
use crate::components::manual_form::ManualForm;
use crate::components::nav_tabs::{NavTabs, Tab};
use crate::components::status_line::{StatusLine, StatusReporter};
use crate::error::ErrorReporter;
use crate::model::DraftEntry;
use crate::notify;
use crate::state::chat::{save_draft, ChatSession};
use crate::state::entries::{load_entries, EntryLog};

/// Chat, manual entry and the day's log. All state here belongs to this
/// page and is dropped when it unmounts.
#[component]
pub fn TrackerPage() -> impl IntoView {
    let backend = expect_context::<HttpBackend>();
    let session = RwSignal::new(ChatSession::with_greeting());
    let entry_log = RwSignal::new(EntryLog::default());
    let (tab, set_tab) = signal(Tab::Chat);
    let (status, set_status) = signal::<Option<String>>(None);
    let reporter = StatusReporter::new(set_status);

    let refresh = {
        let backend = backend.clone();
        Callback::new(move |_: ()| {
            let backend = backend.clone();
            spawn_local(async move {
                match load_entries(&backend).await {
                    Ok(entries) => {
                        let _ = entry_log.try_update(|l| l.replace(entries));
                    }
                    Err(e) => reporter.report("Loading entries", &e),
                }
            });
        })
    };

    // Load entries on mount
    refresh.run(());

    let on_send = {
        let backend = backend.clone();
        Callback::new(move |text: String| -> bool {
            let request = match session.try_update(|s| s.begin_turn(&text)) {
                Some(Ok(request)) => request,
                Some(Err(rejected)) => {
                    log::debug!("Chat submission ignored: {:?}", rejected);
                    return false;
                }
                None => return false,
            };
            let backend = backend.clone();
            spawn_local(async move {
                let result = backend.send_chat(&request).await;
                let _ = session.try_update(|s| s.finish_turn(result));
            });
            true
        })
    };

    let on_confirm = Callback::new(move |draft: DraftEntry| {
        let backend = backend.clone();
        spawn_local(async move {
            match save_draft(&backend, &draft).await {
                Ok(()) => {
                    let _ = session.try_update(|s| s.draft_saved());
                    refresh.run(());
                }
                Err(e) => reporter.report("Saving draft", &e),
            }
        });
    });

    let on_manual_saved = Callback::new(move |_: ()| {
        refresh.run(());
        set_tab.set(Tab::Chat);
        notify::alert("Entry Added");
    });

    view! {
        <div class="page tracker-page">
            <NavTabs tab=tab set_tab=set_tab />
            <StatusLine status=status set_status=set_status />
            <Show
                when=move || tab.get() == Tab::Chat
                fallback=move || view! { <ManualForm reporter=reporter on_saved=on_manual_saved /> }
            >
                <ChatPanel session=session on_send=on_send on_confirm=on_confirm />
            </Show>
            <EntryList log=entry_log />
        </div>
    }
}
