//! Shared helpers for the integration suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
pub mod http_client;
