pub mod current_user;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod token_utils;
pub mod upload_avatar;
pub mod verify_email;
