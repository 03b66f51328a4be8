pub mod completion;
pub mod config;
pub mod html;
pub mod inspect;
pub mod version;
