//! Actix middleware shared by every route.

pub mod request_id;

pub use request_id::{Correlate, RequestId, REQUEST_ID_HEADER};
