// Service module exports

pub mod auth;
pub mod countdown;
pub mod database;
pub mod task;
pub mod user;
