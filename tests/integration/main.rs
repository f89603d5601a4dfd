#[path = "../common/mod.rs"]
#[macro_use]
pub mod common;

mod addresses;
mod auth;
mod contacts;
mod health;
