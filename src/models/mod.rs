// Module exports for models

pub mod task;
pub mod user;
