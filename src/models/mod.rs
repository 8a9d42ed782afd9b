//! Data models

mod youth_organization;

pub use youth_organization::*;
