use leptos::html;
use leptos::prelude::*;

use crate::components::draft_card::DraftCard;
use crate::model::{ChatMessage, DraftEntry};
use crate::state::chat::ChatSession;

/// Transcript plus input box.
///
/// The transcript is rebuilt from the session on every change.
/// `on_send` returns whether the text was accepted; rejected text stays
/// in the input.
#[component]
pub fn ChatPanel(
    session: RwSignal<ChatSession>,
    on_send: Callback<String, bool>,
    on_confirm: Callback<DraftEntry>,
) -> impl IntoView {
    let (input, set_input) = signal(String::new());
    let list_ref = NodeRef::<html::Div>::new();

    // Keep the newest message in view.
    Effect::new(move |_| {
        session.track();
        if let Some(list) = list_ref.get() {
            list.set_scroll_top(list.scroll_height());
        }
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if on_send.run(input.get_untracked()) {
            set_input.set(String::new());
        }
    };

    view! {
        <div class="chat-view">
            <div class="chat-list" node_ref=list_ref>
                {move || {
                    session.with(|s| {
                        s.messages()
                            .iter()
                            .cloned()
                            .map(|msg| view! { <MessageBubble msg=msg on_confirm=on_confirm /> })
                            .collect::<Vec<_>>()
                    })
                }}
                <Show when=move || session.with(|s| s.is_loading())>
                    <div class="message message-assistant message-loading">
                        <div class="message-content">"Thinking..."</div>
                    </div>
                </Show>
            </div>
            <form class="chat-form" on:submit=submit>
                <input
                    type="text"
                    class="input chat-input"
                    placeholder="What did you eat?"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || session.with(|s| s.is_loading())
                >
                    "Send"
                </button>
            </form>
        </div>
    }
}

#[component]
fn MessageBubble(msg: ChatMessage, on_confirm: Callback<DraftEntry>) -> impl IntoView {
    let class = format!("message message-{}", msg.role.as_str());

    view! {
        <div class=class>
            <div class="message-content">{msg.content}</div>
            {msg.draft_entry.map(|draft| view! { <DraftCard draft=draft on_confirm=on_confirm /> })}
        </div>
    }
}
