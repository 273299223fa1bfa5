pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod offline;
pub mod pages;
pub mod settings;
pub mod state;

#[cfg(test)]
mod testing;
