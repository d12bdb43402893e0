//! Animated network hero backgrounds for Leptos CSR apps, plus a small demo router.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Only pulled in for its `js` backend so `rand` can seed itself in the browser.
use getrandom as _;

pub mod components;
mod pages;

use crate::pages::home::{BlueprintDemo, ConstellationDemo, Home, HybridDemo, LinesDemo, MeshDemo, TextureDemo};
use crate::pages::not_found::NotFound;

pub use crate::components::hero::{CtaAction, FeatureItem, HeroSection};
pub use crate::components::network::{NetworkConfig, SpeedConfig, SpeedOverrides};

/// Route `log` output to the browser console and report panics there.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("hero-network logging ready");
}

/// Demo app: one route per preset, everything else is a 404.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Hero Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="demo-nav">
				<A href="/">"Hexagonal"</A>
				<A href="/mesh">"Mesh"</A>
				<A href="/constellation">"Constellation"</A>
				<A href="/texture">"Texture"</A>
				<A href="/lines">"Lines"</A>
				<A href="/hybrid">"Hybrid"</A>
				<A href="/blueprint">"Blueprint"</A>
			</nav>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/mesh") view=MeshDemo />
				<Route path=path!("/constellation") view=ConstellationDemo />
				<Route path=path!("/texture") view=TextureDemo />
				<Route path=path!("/lines") view=LinesDemo />
				<Route path=path!("/hybrid") view=HybridDemo />
				<Route path=path!("/blueprint") view=BlueprintDemo />
			</Routes>
		</Router>
	}
}
