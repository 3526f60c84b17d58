//! Config module.
//! Provides configuration types, the optional XML file loader, and validation.

pub mod types;
mod validate;
pub mod xml;

pub use types::{CollisionPolicy, Config, LogLevel};
pub use xml::{FileConfig, load_config_from_xml};

/// Version-control metadata directory that is never entered, rewritten or renamed.
pub const IGNORED_DIR_DEFAULT: &str = ".git";
/// The walk is rooted at the current working directory.
pub const ROOT_DEFAULT: &str = ".";
