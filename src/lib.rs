// ABOUTME: Library root for converge - state-convergence polling over LBaaS.
// ABOUTME: The converge binary is in main.rs.

pub mod build;
pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod neutron;
pub mod poll;
pub mod types;
