//! REST gateway that translates table requests into LQL queries.
//!
//! The protocol client is supplied by the embedding process through
//! [`data::LqlClient`]; start the gateway with [`core::CoreApp::run`].

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
