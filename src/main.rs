//! Trunk entry point for the demo app.

// The library owns the dependency graph; the binary only mounts it.
#![allow(unused_crate_dependencies)]

use hero_network::{App, init_logging};
use leptos::mount::mount_to_body;

fn main() {
	init_logging();
	mount_to_body(App);
}
