// app/mod.rs - Application Controller and Window Shell
//
// The controller owns the settings and the overlay; the shell runs both
// windows on the iced event loop.

mod controller;
mod shell;

pub use controller::AppController;
pub use shell::run;
