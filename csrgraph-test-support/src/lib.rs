//! Shared test utilities used across csrgraph crates.

pub mod capture;
pub mod proptest_profile;
