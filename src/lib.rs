// Library surface for the binary and for headless integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod dialog;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod theme;
pub mod ui;
