pub mod app;
pub mod engine;
pub mod ingest;
pub mod session;
pub mod ui;
