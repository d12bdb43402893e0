//! Host-agnostic 2D drawing primitives.
//!
//! The compositor only talks to [`Painter`]; the browser implementation lives in `canvas.rs`.

/// Clamp an opacity-like value into `0.0..=1.0`, mapping NaN to 0.
pub fn unit(value: f64) -> f64 {
	if value.is_nan() {
		0.0
	} else {
		value.clamp(0.0, 1.0)
	}
}

/// Geometry of a gradient, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum GradientShape {
	/// From `(x0, y0)` to `(x1, y1)`.
	Linear { x0: f64, y0: f64, x1: f64, y1: f64 },
	/// Concentric circles around `(x, y)` from radius `r0` to `r1`.
	Radial { x: f64, y: f64, r0: f64, r1: f64 },
}

/// Gradient geometry with its color stops.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
	/// Geometry.
	pub shape: GradientShape,
	/// `(offset, color)` pairs, offsets in `0.0..=1.0`.
	pub stops: Vec<(f64, String)>,
}

impl Gradient {
	/// Linear gradient without stops.
	pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
		Self {
			shape: GradientShape::Linear { x0, y0, x1, y1 },
			stops: Vec::new(),
		}
	}

	/// Concentric radial gradient; radii are clamped to be non-negative.
	pub fn radial(x: f64, y: f64, r0: f64, r1: f64) -> Self {
		Self {
			shape: GradientShape::Radial {
				x,
				y,
				r0: r0.max(0.0),
				r1: r1.max(0.0),
			},
			stops: Vec::new(),
		}
	}

	/// Append a stop; the offset is clamped into `0.0..=1.0`.
	pub fn stop(mut self, offset: f64, color: String) -> Self {
		self.stops.push((offset.clamp(0.0, 1.0), color));
		self
	}
}

/// Fill or stroke source.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	/// Any CSS color string.
	Color(String),
	/// Gradient built on the target surface at use time.
	Gradient(Gradient),
}

impl From<String> for Paint {
	fn from(color: String) -> Self {
		Paint::Color(color)
	}
}

impl From<Gradient> for Paint {
	fn from(gradient: Gradient) -> Self {
		Paint::Gradient(gradient)
	}
}

/// The drawing calls the compositor needs.
///
/// Coordinates are CSS pixels except in [`Painter::put_pixels`]. Methods mirror the canvas 2D
/// context of the same name.
#[allow(missing_docs)]
pub trait Painter {
	fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
	fn set_fill(&mut self, paint: &Paint);
	fn set_stroke(&mut self, paint: &Paint);
	fn set_line_width(&mut self, width: f64);
	fn set_global_alpha(&mut self, alpha: f64);
	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, x: f64, y: f64);
	fn begin_path(&mut self);
	fn move_to(&mut self, x: f64, y: f64);
	fn line_to(&mut self, x: f64, y: f64);
	/// Full circle.
	fn arc(&mut self, x: f64, y: f64, radius: f64);
	fn close_path(&mut self);
	fn fill(&mut self);
	fn stroke(&mut self);
	/// Replace device pixels from the top-left corner with row-major RGBA bytes, unblended.
	fn put_pixels(&mut self, width: u32, height: u32, rgba: &[u8]);
}

#[cfg(test)]
pub(crate) mod recorder {
	use super::*;
	use crate::components::network::surface::{Surface, SurfaceSize};

	/// One captured drawing call.
	#[derive(Clone, Debug, PartialEq)]
	pub enum Call {
		ClearRect,
		FillRect(f64, f64, f64, f64),
		Fill(Paint),
		Stroke(Paint),
		LineWidth(f64),
		Alpha(f64),
		Save,
		Restore,
		Translate(f64, f64),
		BeginPath,
		MoveTo(f64, f64),
		LineTo(f64, f64),
		Arc(f64, f64, f64),
		ClosePath,
		FillPath,
		StrokePath,
		Configure(SurfaceSize),
		/// Width, height and byte length of a pixel upload.
		Pixels(u32, u32, usize),
	}

	/// Painter that records every call for assertions.
	#[derive(Default, Debug)]
	pub struct Recorder {
		pub calls: Vec<Call>,
	}

	impl Recorder {
		pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
			self.calls.iter().filter(|c| pred(c)).count()
		}
	}

	impl Painter for Recorder {
		fn clear_rect(&mut self, _: f64, _: f64, _: f64, _: f64) {
			self.calls.push(Call::ClearRect);
		}
		fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
			self.calls.push(Call::FillRect(x, y, w, h));
		}
		fn set_fill(&mut self, paint: &Paint) {
			self.calls.push(Call::Fill(paint.clone()));
		}
		fn set_stroke(&mut self, paint: &Paint) {
			self.calls.push(Call::Stroke(paint.clone()));
		}
		fn set_line_width(&mut self, width: f64) {
			self.calls.push(Call::LineWidth(width));
		}
		fn set_global_alpha(&mut self, alpha: f64) {
			self.calls.push(Call::Alpha(alpha));
		}
		fn save(&mut self) {
			self.calls.push(Call::Save);
		}
		fn restore(&mut self) {
			self.calls.push(Call::Restore);
		}
		fn translate(&mut self, x: f64, y: f64) {
			self.calls.push(Call::Translate(x, y));
		}
		fn begin_path(&mut self) {
			self.calls.push(Call::BeginPath);
		}
		fn move_to(&mut self, x: f64, y: f64) {
			self.calls.push(Call::MoveTo(x, y));
		}
		fn line_to(&mut self, x: f64, y: f64) {
			self.calls.push(Call::LineTo(x, y));
		}
		fn arc(&mut self, x: f64, y: f64, radius: f64) {
			self.calls.push(Call::Arc(x, y, radius));
		}
		fn close_path(&mut self) {
			self.calls.push(Call::ClosePath);
		}
		fn fill(&mut self) {
			self.calls.push(Call::FillPath);
		}
		fn stroke(&mut self) {
			self.calls.push(Call::StrokePath);
		}
		fn put_pixels(&mut self, width: u32, height: u32, rgba: &[u8]) {
			self.calls.push(Call::Pixels(width, height, rgba.len()));
		}
	}

	impl Surface for Recorder {
		fn configure(&mut self, size: SurfaceSize) {
			self.calls.push(Call::Configure(size));
		}
	}
}
