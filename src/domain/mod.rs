pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod images;
pub mod mailer;
pub mod password;
pub mod users;
