pub mod api;
pub mod chat_message;
pub mod chat_view;
pub mod chat_widget;
pub mod config;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod status_indicator;
