// Shared helpers used by models, services and the web layer

pub mod date;
