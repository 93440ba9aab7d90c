//! Wire models shared by the admin panel crates.
//!
//! Everything here mirrors the JSON the admin API speaks: the response
//! envelope, the managed content records and the reorder request item.

pub mod model;
pub mod requests;
