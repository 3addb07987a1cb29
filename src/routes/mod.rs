//! HTTP route handlers.

pub mod admin;
pub mod health;
pub mod logout;
pub mod session;
pub mod signin;
