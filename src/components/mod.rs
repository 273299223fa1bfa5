pub mod chat_panel;
pub mod draft_card;
pub mod entry_list;
pub mod manual_form;
pub mod nav_tabs;
pub mod sidebar;
pub mod status_line;
