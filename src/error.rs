//! Errors for the fallible edges of the crate.
//!
//! The layout and geometry core never fails; it clamps. Only configuration
//! parsing and the browser host can produce an [`Error`].

/// Crate error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Visualizer options could not be parsed.
	#[error("invalid visualizer options: {0}")]
	Config(#[from] serde_json::Error),
	/// The canvas host could not reach a drawing surface.
	#[error("canvas unavailable: {reason}")]
	Canvas {
		/// What was missing.
		reason: String,
	},
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
