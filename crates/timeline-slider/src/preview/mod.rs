//! Native window hosting one slider, with egui standing in for the browser.

mod app;
mod measure;
mod watch;

pub use app::run;
