//! Surface dimensions and the sizing half of a drawing target.

use super::error::EngineError;
use super::paint::Painter;

/// Logical size of the drawing surface plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub dpr: f64,
}

impl SurfaceSize {
	/// Validate dimensions; a non-finite or non-positive ratio falls back to 1.
	pub fn new(width: f64, height: f64, dpr: f64) -> Result<Self, EngineError> {
		if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
			return Err(EngineError::InvalidSize { width, height });
		}
		let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
		Ok(Self { width, height, dpr })
	}

	/// Center point.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Half the diagonal, the largest distance from the center to a corner.
	pub fn half_diagonal(&self) -> f64 {
		self.width.hypot(self.height) / 2.0
	}

	/// Backing store size in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		(
			(self.width * self.dpr).round() as u32,
			(self.height * self.dpr).round() as u32,
		)
	}

	/// Point inside the surface, edges included.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
	}
}

/// A paintable surface whose pixel dimensions the engine controls.
pub trait Surface: Painter {
	/// Resize the backing store and reset the transform so drawing happens in CSS pixels.
	fn configure(&mut self, size: SurfaceSize);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_empty_dimensions() {
		assert_eq!(
			SurfaceSize::new(0.0, 600.0, 1.0),
			Err(EngineError::InvalidSize {
				width: 0.0,
				height: 600.0
			})
		);
		assert!(SurfaceSize::new(800.0, -1.0, 1.0).is_err());
		assert!(SurfaceSize::new(f64::NAN, 10.0, 1.0).is_err());
	}

	#[test]
	fn backing_store_scales_with_ratio() {
		let size = SurfaceSize::new(800.0, 600.0, 2.0).unwrap();
		assert_eq!(size.backing_size(), (1600, 1200));
		assert_eq!(size.center(), (400.0, 300.0));
		assert_eq!(size.half_diagonal(), 500.0);

		let odd = SurfaceSize::new(100.0, 50.0, 0.0).unwrap();
		assert_eq!(odd.dpr, 1.0);
	}
}
