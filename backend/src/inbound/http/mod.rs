//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod contact;
pub mod error;
pub mod events;
pub mod health;
pub mod otp;
pub mod registration;
pub mod society;
pub mod state;
pub mod team;

pub use error::ApiResult;
