//! The per-instance engine loop.
//!
//! One [`Engine`] is created per mount. Preconditions: `start` is called once before any frame,
//! `teardown` once on unmount; starting twice without a teardown in between is not supported.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use super::pointer::PointerMailbox;
use super::render;
use super::scheduler::{FrameHandle, FrameScheduler};
use super::state::NetworkState;
use super::surface::{Surface, SurfaceSize};
use super::theme::Theme;

/// A registered external listener that can be removed.
pub trait Subscription {
	/// Detach the listener. Called once, at teardown.
	fn unsubscribe(&mut self);
}

/// One running animation: state, surface, theme and the frame scheduler driving them.
pub struct Engine<P: Surface, T: Theme, S: FrameScheduler> {
	state: NetworkState,
	surface: P,
	theme: T,
	scheduler: S,
	mailbox: Rc<RefCell<PointerMailbox>>,
	pending: Option<FrameHandle>,
	subscriptions: Vec<Box<dyn Subscription>>,
	running: bool,
}

impl<P: Surface, T: Theme, S: FrameScheduler> Engine<P, T, S> {
	/// Size the surface for `state` and wrap everything in an idle engine.
	pub fn new(state: NetworkState, mut surface: P, theme: T, scheduler: S) -> Self {
		surface.configure(state.size);
		Self {
			state,
			surface,
			theme,
			scheduler,
			mailbox: Rc::new(RefCell::new(PointerMailbox::new())),
			pending: None,
			subscriptions: Vec::new(),
			running: false,
		}
	}

	/// Slot event listeners write pointer samples into.
	pub fn mailbox(&self) -> Rc<RefCell<PointerMailbox>> {
		self.mailbox.clone()
	}

	/// Simulation state.
	pub fn state(&self) -> &NetworkState {
		&self.state
	}

	/// Drawing surface.
	pub fn surface(&self) -> &P {
		&self.surface
	}

	/// Frame scheduler.
	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	/// Started and not torn down.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Outstanding frame request.
	pub fn pending_frame(&self) -> Option<FrameHandle> {
		self.pending
	}

	/// Keep a listener registration alive until teardown.
	pub fn subscribe(&mut self, subscription: Box<dyn Subscription>) {
		self.subscriptions.push(subscription);
	}

	/// Begin the frame loop.
	pub fn start(&mut self) {
		self.running = true;
		self.pending = self.scheduler.request_frame();
		info!(
			"network engine started: {}x{} @{}x, {} nodes",
			self.state.size.width,
			self.state.size.height,
			self.state.size.dpr,
			self.state.graph.len()
		);
	}

	/// Scheduled callback: run one step and schedule the next.
	pub fn on_frame(&mut self) {
		self.pending = None;
		if !self.running {
			return;
		}
		self.step();
		self.pending = self.scheduler.request_frame();
	}

	/// Advance the simulation and paint one frame, regardless of scheduling.
	pub fn step(&mut self) {
		let sample = self.mailbox.borrow_mut().take();
		self.state.tick(sample);
		self.theme.refresh();
		render::render(&self.state, &mut self.surface, &self.theme);
	}

	/// Cancel the in-flight frame, rebuild for `size` and resume.
	pub fn resize(&mut self, size: SurfaceSize) {
		self.cancel_pending();
		self.surface.configure(size);
		self.state.resize(size);
		debug!(
			"network resized to {}x{} @{}x, {} nodes",
			size.width,
			size.height,
			size.dpr,
			self.state.graph.len()
		);
		if self.running {
			self.pending = self.scheduler.request_frame();
		}
	}

	/// Stop for good: no frame runs and no listener fires after this returns.
	pub fn teardown(&mut self) {
		self.cancel_pending();
		self.running = false;
		for mut subscription in self.subscriptions.drain(..) {
			subscription.unsubscribe();
		}
		self.scheduler.shutdown();
		info!("network engine torn down");
	}

	fn cancel_pending(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel_frame(handle);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;
	use crate::components::network::config::NetworkConfig;
	use crate::components::network::paint::recorder::{Call, Recorder};
	use crate::components::network::pointer::Region;
	use crate::components::network::scheduler::ManualScheduler;
	use crate::components::network::theme::FallbackTheme;

	struct Counted(Rc<Cell<usize>>);

	impl Subscription for Counted {
		fn unsubscribe(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	type TestEngine = Engine<Recorder, FallbackTheme, ManualScheduler>;

	fn size(w: f64, h: f64) -> SurfaceSize {
		SurfaceSize::new(w, h, 2.0).unwrap()
	}

	fn engine() -> TestEngine {
		let state = NetworkState::seeded(NetworkConfig::hexagonal(), size(800.0, 600.0), 5);
		Engine::new(state, Recorder::default(), FallbackTheme, ManualScheduler::new())
	}

	/// Fire the pending frame the way the display would.
	fn refresh(engine: &mut TestEngine) -> bool {
		let fired = engine.scheduler.fire().is_some();
		if fired {
			engine.on_frame();
		}
		fired
	}

	#[test]
	fn construction_sizes_the_surface() {
		let engine = engine();
		assert_eq!(engine.surface().calls, vec![Call::Configure(size(800.0, 600.0))]);
		assert!(!engine.is_running());
		assert_eq!(engine.pending_frame(), None);
	}

	#[test]
	fn frames_chain_while_running() {
		let mut engine = engine();
		engine.start();
		assert!(engine.pending_frame().is_some());
		for _ in 0..5 {
			assert!(refresh(&mut engine));
		}
		assert_eq!(engine.state().time, 5.0 * 16.0);
		assert!(engine.pending_frame().is_some());
		assert!(engine.surface().calls.iter().any(|c| *c == Call::ClearRect));
	}

	#[test]
	fn teardown_stops_frames_and_listeners() {
		let mut engine = engine();
		let removed = Rc::new(Cell::new(0));
		engine.subscribe(Box::new(Counted(removed.clone())));
		engine.subscribe(Box::new(Counted(removed.clone())));
		engine.start();
		refresh(&mut engine);
		let pending = engine.pending_frame().unwrap();

		engine.teardown();
		assert_eq!(removed.get(), 2);
		assert_eq!(engine.pending_frame(), None);
		assert!(engine.scheduler().cancelled().contains(&pending));
		assert!(engine.scheduler().is_shut_down());

		let time = engine.state().time;
		assert!(!refresh(&mut engine));
		engine.on_frame();
		assert_eq!(engine.state().time, time, "stale callbacks are inert");

		engine.step();
		assert_eq!(engine.state().time, time + 16.0);

		engine.teardown();
		assert_eq!(removed.get(), 2);
	}

	#[test]
	fn resize_cancels_and_rebuilds() {
		let mut engine = engine();
		engine.start();
		for _ in 0..3 {
			refresh(&mut engine);
		}
		let before = engine.pending_frame().unwrap();
		let nodes = engine.state().graph.len();

		engine.resize(size(400.0, 300.0));
		assert!(engine.scheduler().cancelled().contains(&before));
		assert_ne!(engine.pending_frame(), Some(before));
		assert!(engine.pending_frame().is_some());
		assert!(engine.state().graph.len() < nodes);
		assert!(engine.state().particles.is_empty() && engine.state().flows.is_empty());
		assert!(engine.surface().calls.contains(&Call::Configure(size(400.0, 300.0))));
		assert!(refresh(&mut engine));
	}

	#[test]
	fn resize_before_start_does_not_schedule() {
		let mut engine = engine();
		engine.resize(size(640.0, 480.0));
		assert_eq!(engine.pending_frame(), None);
		assert_eq!(engine.state().size, size(640.0, 480.0));
	}

	#[test]
	fn listener_samples_reach_the_next_frame_only() {
		let mut engine = engine();
		engine.start();
		let region = Region {
			left: 0.0,
			top: 0.0,
			right: 800.0,
			bottom: 600.0,
		};
		engine.mailbox().borrow_mut().record_move(400.0, 300.0, region, 0.5);
		assert!(!engine.state().pointer.active);
		refresh(&mut engine);
		assert!(engine.state().pointer.active);
		assert_eq!((engine.state().pointer.x, engine.state().pointer.y), (400.0, 300.0));

		engine.mailbox().borrow_mut().record_leave();
		refresh(&mut engine);
		assert!(!engine.state().pointer.active);
	}
}
