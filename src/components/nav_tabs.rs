use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    Manual,
}

#[component]
pub fn NavTabs(tab: ReadSignal<Tab>, set_tab: WriteSignal<Tab>) -> impl IntoView {
    let class_for = move |t: Tab| {
        if tab.get() == t {
            "nav-tab active"
        } else {
            "nav-tab"
        }
    };

    view! {
        <div class="nav-tabs">
            <button class=move || class_for(Tab::Chat) on:click=move |_| set_tab.set(Tab::Chat)>
                "Chat"
            </button>
            <button class=move || class_for(Tab::Manual) on:click=move |_| set_tab.set(Tab::Manual)>
                "Manual Entry"
            </button>
        </div>
    }
}
