//! C1 Validator - Validation gateway for CNMC C1 supply-switch requests
//!
//! This crate receives C1 request XML documents over HTTP, runs them through
//! an ordered validation pipeline (origin auth, XSD conformance, business
//! rules) and records every attempt for audit.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
