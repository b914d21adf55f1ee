//! Menu cart storefront library.
//!
//! The widget server as a library, so the binary, the CLI and the
//! integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
pub mod widget;
