pub mod addresses;
pub mod contacts;
pub mod mock;
pub mod users;
