// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod builder;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod view_model;
pub mod vocab;

pub use app::App;
