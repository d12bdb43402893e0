use std::cell::RefCell;
use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlDivElement, MouseEvent};

use super::canvas::CanvasSurface;
use super::config::NetworkConfig;
use super::engine::{Engine, Subscription};
use super::error::EngineError;
use super::pointer::Region;
use super::scheduler::RafScheduler;
use super::state::NetworkState;
use super::surface::SurfaceSize;
use super::theme::CssTheme;

type WebEngine = Engine<CanvasSurface, CssTheme, RafScheduler>;

/// DOM listener that stays registered until unsubscribed.
struct DomListener {
	target: EventTarget,
	kind: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl DomListener {
	fn attach(target: EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		let function: &js_sys::Function = callback.as_ref().unchecked_ref();
		let _ = target.add_event_listener_with_callback(kind, function);
		Self {
			target,
			kind,
			callback,
		}
	}
}

impl Subscription for DomListener {
	fn unsubscribe(&mut self) {
		let function: &js_sys::Function = self.callback.as_ref().unchecked_ref();
		let _ = self.target.remove_event_listener_with_callback(self.kind, function);
	}
}

fn region(container: &HtmlDivElement) -> Region {
	let rect = container.get_bounding_client_rect();
	Region {
		left: rect.left(),
		top: rect.top(),
		right: rect.right(),
		bottom: rect.bottom(),
	}
}

/// Container size in CSS pixels, falling back to the viewport when it has no layout yet.
fn measure(container: &HtmlDivElement) -> Result<SurfaceSize, EngineError> {
	let window = web_sys::window().ok_or(EngineError::HostUnavailable)?;
	let rect = container.get_bounding_client_rect();
	let (w, h) = if rect.width() > 0.0 && rect.height() > 0.0 {
		(rect.width(), rect.height())
	} else {
		(
			window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
			window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
		)
	};
	SurfaceSize::new(w, h, window.device_pixel_ratio())
}

/// Build an engine for `canvas`, wire pointer/resize listeners and start the loop.
pub fn mount(
	canvas: HtmlCanvasElement,
	container: HtmlDivElement,
	config: NetworkConfig,
) -> Result<Rc<RefCell<WebEngine>>, EngineError> {
	let surface = CanvasSurface::new(canvas)?;
	let window = web_sys::window().ok_or(EngineError::HostUnavailable)?;
	let document: EventTarget = window.document().ok_or(EngineError::HostUnavailable)?.into();
	let size = measure(&container)?;
	let threshold = config.movement_threshold;

	let scheduler = RafScheduler::new();
	let engine = Rc::new(RefCell::new(Engine::new(
		NetworkState::new(config, size),
		surface,
		CssTheme::new(),
		scheduler.clone(),
	)));

	let frame_engine = Rc::downgrade(&engine);
	scheduler.bind(move || {
		if let Some(engine) = frame_engine.upgrade() {
			if let Ok(mut engine) = engine.try_borrow_mut() {
				engine.on_frame();
			}
		}
	});

	let mailbox = engine.borrow().mailbox();
	let (move_mailbox, move_container) = (mailbox.clone(), container.clone());
	let on_move = move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		move_mailbox.borrow_mut().record_move(
			ev.client_x() as f64,
			ev.client_y() as f64,
			region(&move_container),
			threshold,
		);
	};
	let on_leave = move |_: Event| mailbox.borrow_mut().record_leave();

	let resize_engine = Rc::downgrade(&engine);
	let on_resize = move |_: Event| {
		let Some(engine) = resize_engine.upgrade() else {
			return;
		};
		match measure(&container) {
			Ok(size) => {
				if let Ok(mut engine) = engine.try_borrow_mut() {
					engine.resize(size);
				}
			}
			Err(err) => warn!("network resize skipped: {err}"),
		}
	};

	{
		let mut engine = engine.borrow_mut();
		engine.subscribe(Box::new(DomListener::attach(document.clone(), "mousemove", on_move)));
		engine.subscribe(Box::new(DomListener::attach(document, "mouseleave", on_leave)));
		engine.subscribe(Box::new(DomListener::attach(window.into(), "resize", on_resize)));
		engine.start();
	}
	Ok(engine)
}

/// Run the network animation on `canvas_ref` for as long as the calling component is mounted.
///
/// `container_ref` is the element whose bounding box is the pointer's active region and whose
/// size the canvas follows. Failing to get a drawing context leaves the canvas blank.
pub fn use_network_background(
	canvas_ref: NodeRef<html::Canvas>,
	container_ref: NodeRef<html::Div>,
	config: NetworkConfig,
) {
	let engine: StoredValue<Option<Rc<RefCell<WebEngine>>>, LocalStorage> = StoredValue::new_local(None);

	Effect::new(move |_| {
		let (Some(canvas), Some(container)) = (canvas_ref.get(), container_ref.get()) else {
			return;
		};
		if engine.with_value(|e| e.is_some()) {
			return;
		}
		match mount(canvas.into(), container.into(), config.clone()) {
			Ok(mounted) => engine.set_value(Some(mounted)),
			Err(err) => warn!("network background disabled: {err}"),
		}
	});

	on_cleanup(move || {
		if let Some(Some(mounted)) = engine.try_update_value(|slot| slot.take()) {
			mounted.borrow_mut().teardown();
		}
	});
}
