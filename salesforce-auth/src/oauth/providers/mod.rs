//! Provider implementations.

pub mod salesforce;
