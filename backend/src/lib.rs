//! Authorization and eligibility core of the link-shortening service.

pub mod domain;
pub mod outbound;
pub mod settings;

pub use settings::ShortlinkSettings;
