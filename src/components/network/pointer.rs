//! Pointer tracking and the effect-intensity state machine.
//!
//! DOM listeners write into a [`PointerMailbox`]; the simulator drains it once at the start of
//! each frame. Listeners never touch entity collections.

use super::config::NetworkConfig;

/// Bounding box of the hosting element in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Region {
	/// Left edge.
	pub left: f64,
	/// Top edge.
	pub top: f64,
	/// Right edge.
	pub right: f64,
	/// Bottom edge.
	pub bottom: f64,
}

impl Region {
	/// Inclusive bounds check.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
	}
}

/// Pointer as the simulator sees it, in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// Position relative to the region.
	pub x: f64,
	/// Position relative to the region.
	pub y: f64,
	/// Viewport delta between the last two samples.
	pub vx: f64,
	/// Viewport delta between the last two samples.
	pub vy: f64,
	/// Pointer inside the region.
	pub active: bool,
	/// Time accumulator value of the frame that consumed the last sample.
	pub last_move: f64,
}

/// What the listeners left behind since the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
	/// Position relative to the region.
	pub x: f64,
	/// Position relative to the region.
	pub y: f64,
	/// Viewport delta between the last two samples.
	pub vx: f64,
	/// Viewport delta between the last two samples.
	pub vy: f64,
	/// Pointer inside the region.
	pub active: bool,
	/// A sample arrived inside the region.
	pub moved: bool,
	/// A sample was fast enough to emit particles.
	pub burst: bool,
}

/// Single-writer slot shared between event listeners and the engine.
#[derive(Clone, Debug, Default)]
pub struct PointerMailbox {
	sample: PointerSample,
	last_client: Option<(f64, f64)>,
}

impl PointerMailbox {
	/// Empty mailbox with an inactive pointer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a raw move in viewport coordinates. Samples outside `region` deactivate the pointer.
	pub fn record_move(&mut self, client_x: f64, client_y: f64, region: Region, threshold: f64) {
		if !region.contains(client_x, client_y) {
			self.sample.active = false;
			return;
		}

		let (vx, vy) = self
			.last_client
			.map(|(lx, ly)| (client_x - lx, client_y - ly))
			.unwrap_or_default();
		self.last_client = Some((client_x, client_y));

		let sample = &mut self.sample;
		sample.vx = vx;
		sample.vy = vy;
		sample.x = client_x - region.left;
		sample.y = client_y - region.top;
		sample.active = true;
		sample.moved = true;
		if vx.hypot(vy) > threshold {
			sample.burst = true;
		}
	}

	/// The pointer left the document.
	pub fn record_leave(&mut self) {
		self.sample.active = false;
	}

	/// Latest sample; clears the per-frame `moved`/`burst` flags.
	pub fn take(&mut self) -> PointerSample {
		let sample = self.sample;
		self.sample.moved = false;
		self.sample.burst = false;
		sample
	}
}

impl PointerState {
	/// Apply a drained sample at time `now`. Returns whether a particle burst was requested.
	pub fn absorb(&mut self, sample: PointerSample, now: f64) -> bool {
		self.x = sample.x;
		self.y = sample.y;
		self.vx = sample.vx;
		self.vy = sample.vy;
		self.active = sample.active;
		if sample.moved {
			self.last_move = now;
		}
		sample.burst && sample.active
	}
}

/// Scalar in `0.0..=1.0` scaling every reactive effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectIntensity(f64);

impl Default for EffectIntensity {
	fn default() -> Self {
		Self(1.0)
	}
}

impl EffectIntensity {
	/// Intensity clamped into range, NaN becomes `0.0`.
	pub fn new(value: f64) -> Self {
		Self(if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) })
	}

	/// Current value.
	pub fn value(self) -> f64 {
		self.0
	}

	/// Recover while the pointer is active and fresh, decay otherwise (twice as fast when inactive).
	pub fn update(&mut self, pointer: &PointerState, now: f64, config: &NetworkConfig) {
		self.0 = if !pointer.active {
			(self.0 - config.intensity_decay * 2.0).max(0.0)
		} else if now - pointer.last_move < config.stale_after {
			(self.0 + config.intensity_recovery).min(1.0)
		} else {
			(self.0 - config.intensity_decay).max(0.0)
		};
	}
}
