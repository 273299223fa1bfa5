pub mod settings;
pub mod tracker;
