#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Core of the TaskDeck clients: data model, persisted session, auth context,
//! route guards, the HTTP gateway, and the page workflows that drive them.

pub mod api;
pub mod auth;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod guards;
pub mod models;
pub mod notify;
mod segment;
pub mod session;
pub mod workflow;
