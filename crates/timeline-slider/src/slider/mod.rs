//! Headless runtime for the grouped timeline slider.
//!
//! Slides are partitioned into fixed-size groups by a width-dependent
//! breakpoint policy; each group gets a tab strip, a progress line tracks the
//! active tab, previous/next move across tabs and groups, and a shared minimum
//! height keeps the container stable. Hosts drive a [`SliderInstance`] with
//! [`Action`]s and supply layout through [`Measure`].

pub mod group;
pub mod grouping;
pub mod height;
pub mod instance;
pub mod measure;
pub mod navigation;
pub mod responsive;
pub mod timeline;

#[cfg(test)]
mod tests;

pub use instance::{Outcome, SliderInstance, SliderSnapshot};
pub use measure::{CharCellMeasure, Measure, Renderable, Size};
pub use navigation::Action;
pub use responsive::{BreakpointPolicy, ResizeDebouncer, Viewport};
