//! Slowly drifting grayscale texture laid under everything else.
//!
//! The texture is regenerated in device pixels every frame and handed to the painter as raw RGBA,
//! so it ignores the DPR transform the rest of the scene is drawn with.

/// Alpha byte of every texture pixel (0.08 opacity).
pub const ALPHA: u8 = 20;

/// Gray level of the layered sine noise at device pixel `(x, y)`.
pub fn gray(x: f64, y: f64, seed: f64) -> u8 {
	let value = ((x + seed) * 0.01).sin() * 0.3
		+ ((y + seed) * 0.015).sin() * 0.3
		+ ((x + y + seed) * 0.005).sin() * 0.4;
	(128.0 + value * 5.0).round() as u8
}

/// RGBA buffer for the texture plus the seed it was generated from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoiseTexture {
	seed: f64,
	width: u32,
	height: u32,
	pixels: Vec<u8>,
}

impl NoiseTexture {
	/// Empty texture; call [`NoiseTexture::resize`] to allocate it.
	pub fn new(seed: f64) -> Self {
		Self {
			seed,
			..Self::default()
		}
	}

	/// Reallocate for a `width`×`height` device-pixel surface and regenerate.
	pub fn resize(&mut self, width: u32, height: u32) {
		self.width = width;
		self.height = height;
		self.pixels = vec![0; width as usize * height as usize * 4];
		self.regenerate();
	}

	/// Shift the seed by `step` and regenerate.
	pub fn advance(&mut self, step: f64) {
		self.seed += step;
		self.regenerate();
	}

	fn regenerate(&mut self) {
		let (width, seed) = (self.width.max(1) as usize, self.seed);
		for (i, pixel) in self.pixels.chunks_exact_mut(4).enumerate() {
			let g = gray((i % width) as f64, (i / width) as f64, seed);
			pixel.copy_from_slice(&[g, g, g, ALPHA]);
		}
	}

	/// Current seed.
	pub fn seed(&self) -> f64 {
		self.seed
	}

	/// Width in device pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in device pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Row-major RGBA bytes.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// No buffer allocated.
	pub fn is_empty(&self) -> bool {
		self.pixels.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gray_stays_in_a_narrow_band() {
		for (x, y, seed) in [(0.0, 0.0, 0.0), (37.0, 911.0, 412.5), (1599.0, 1199.0, 999.9)] {
			let g = gray(x, y, seed);
			assert!((123..=133).contains(&g), "gray {g}");
		}
	}

	#[test]
	fn buffer_follows_size_and_seed() {
		let mut texture = NoiseTexture::new(5.0);
		assert!(texture.is_empty());
		texture.resize(40, 30);
		assert_eq!(texture.pixels().len(), 40 * 30 * 4);
		assert!(texture.pixels().chunks_exact(4).all(|p| p[0] == p[1] && p[1] == p[2] && p[3] == ALPHA));

		// Pixel (x = 7, y = 2).
		let offset = (2 * 40 + 7) * 4;
		assert_eq!(texture.pixels()[offset], gray(7.0, 2.0, 5.0));

		let before = texture.pixels().to_vec();
		for _ in 0..50 {
			texture.advance(0.1);
		}
		assert!((texture.seed() - 10.0).abs() < 1e-9);
		assert_ne!(texture.pixels(), &before[..]);

		texture.resize(10, 10);
		assert_eq!((texture.width(), texture.height()), (10, 10));
		assert_eq!(texture.pixels().len(), 400);
	}
}
