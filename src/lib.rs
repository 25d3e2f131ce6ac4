//! Sustainability site: newsletter signup backend and the page rendering
//! pipeline (content loading, translation, section rendering and language
//! switching).

pub mod config;
pub mod content;
pub mod i18n;
pub mod page;
pub mod render;
pub mod retry;
pub mod server;
pub mod signup;
pub mod signup_form;
pub mod store;
