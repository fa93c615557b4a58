// Task Reminder Library
// Exports all modules for testing and reuse

pub mod config;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;

#[cfg(test)]
pub(crate) mod test_support;
