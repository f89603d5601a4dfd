pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod uploads;
