//! Domain core for the NRF Europe exhibitor dashboard.
//!
//! Two components carry all of the reusable logic: the exhibitor
//! classification engine under [`exhibitors`] and the admin credential
//! resolver under [`auth`]. Everything else here is the ambient stack the
//! API service builds on: configuration, telemetry, and error mapping.

pub mod auth;
pub mod config;
pub mod error;
pub mod exhibitors;
pub mod telemetry;
