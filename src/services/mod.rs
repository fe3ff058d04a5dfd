pub mod providers;
pub mod session;
