//! Display-synchronized frame scheduling.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Token for one pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(
	/// Raw id from the host.
	pub i32,
);

/// Schedules the engine's frame callback.
pub trait FrameScheduler {
	/// Ask for the frame callback to run once at the next display refresh.
	fn request_frame(&mut self) -> Option<FrameHandle>;
	/// Cancel a request. Unknown or already-fired handles are ignored.
	fn cancel_frame(&mut self, handle: FrameHandle);
	/// Release the callback; no frame runs afterwards.
	fn shutdown(&mut self) {}
}

/// `requestAnimationFrame` driver around a single persistent closure.
#[derive(Clone, Default)]
pub struct RafScheduler {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RafScheduler {
	/// Scheduler with nothing bound or pending.
	pub fn new() -> Self {
		Self::default()
	}

	/// Install the per-frame callback. Clones share the slot.
	pub fn bind(&self, frame: impl FnMut() + 'static) {
		*self.callback.borrow_mut() = Some(Closure::new(frame));
	}
}

impl FrameScheduler for RafScheduler {
	fn request_frame(&mut self) -> Option<FrameHandle> {
		let window = web_sys::window()?;
		let slot = self.callback.borrow();
		let callback: &js_sys::Function = slot.as_ref()?.as_ref().unchecked_ref();
		window.request_animation_frame(callback).ok().map(FrameHandle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle.0);
		}
	}

	fn shutdown(&mut self) {
		self.callback.borrow_mut().take();
	}
}

/// Scheduler driven by hand, for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
	next: i32,
	pending: Option<FrameHandle>,
	cancelled: Vec<FrameHandle>,
	shut_down: bool,
}

impl ManualScheduler {
	/// Scheduler with nothing bound or pending.
	pub fn new() -> Self {
		Self::default()
	}

	/// Request waiting to fire.
	pub fn pending(&self) -> Option<FrameHandle> {
		self.pending
	}

	/// Every handle cancelled so far.
	pub fn cancelled(&self) -> &[FrameHandle] {
		&self.cancelled
	}

	/// Whether `shutdown` ran.
	pub fn is_shut_down(&self) -> bool {
		self.shut_down
	}

	/// Consume the pending request as if the display refreshed.
	pub fn fire(&mut self) -> Option<FrameHandle> {
		self.pending.take()
	}
}

impl FrameScheduler for ManualScheduler {
	fn request_frame(&mut self) -> Option<FrameHandle> {
		if self.shut_down {
			return None;
		}
		self.next += 1;
		self.pending = Some(FrameHandle(self.next));
		self.pending
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if self.pending == Some(handle) {
			self.pending = None;
			self.cancelled.push(handle);
		}
	}

	fn shutdown(&mut self) {
		self.shut_down = true;
		self.pending = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cancel_is_idempotent() {
		let mut scheduler = ManualScheduler::new();
		let handle = scheduler.request_frame().unwrap();
		scheduler.cancel_frame(handle);
		scheduler.cancel_frame(handle);
		scheduler.cancel_frame(FrameHandle(99));
		assert_eq!(scheduler.cancelled(), &[handle]);
		assert_eq!(scheduler.pending(), None);
	}

	#[test]
	fn fired_frames_cannot_be_cancelled() {
		let mut scheduler = ManualScheduler::new();
		let handle = scheduler.request_frame().unwrap();
		assert_eq!(scheduler.fire(), Some(handle));
		scheduler.cancel_frame(handle);
		assert!(scheduler.cancelled().is_empty());

		scheduler.shutdown();
		assert_eq!(scheduler.request_frame(), None);
	}
}
