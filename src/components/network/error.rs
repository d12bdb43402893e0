use thiserror::Error;

/// Failures that stop an engine instance from running.
///
/// Everything else (stale entity references, out-of-range paint values) is corrected
/// internally and never surfaces here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
	/// The drawing surface could not provide a 2D context.
	#[error("2d drawing context unavailable")]
	ContextUnavailable,
	/// No browser window or document to attach to.
	#[error("browser window unavailable")]
	HostUnavailable,
	/// Surface dimensions must both be positive.
	#[error("invalid surface size {width}x{height}")]
	InvalidSize {
		/// Rejected width.
		width: f64,
		/// Rejected height.
		height: f64,
	},
}
