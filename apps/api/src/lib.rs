//! Career Navigator API: profile intake, AI career analysis, and report storage.

pub mod analysis;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod reports;
pub mod routes;
pub mod service;
pub mod session;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
