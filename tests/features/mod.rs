//! Cucumber feature support


pub use support::TestWorld;
