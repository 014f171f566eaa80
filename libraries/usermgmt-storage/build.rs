//! `sqlx::migrate!` embeds the SQL files at compile time, so editing a
//! migration must rebuild this crate.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
