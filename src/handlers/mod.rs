pub mod app;
pub mod chat;
pub mod workout;
