//! Build script for youth-registry
//!
//! `sqlx::migrate!` embeds the migrations at compile time, so the crate has
//! to be rebuilt whenever a migration is added or edited.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
