#![cfg_attr(not(test), forbid(unsafe_code))]
//! Wire models, roles, and configuration shared by the Newsdesk admin clients.

pub mod config;
pub mod models;
