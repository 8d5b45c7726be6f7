//! schlieren-figures: the figure set of the biomimetic schlieren vision
//! manuscript, built on a small matplotlib-style figure layer.
//!
//! Figures are assembled as plain data ([`api::Figure`]), projected into
//! deterministic render frames, and handed to a [`render::Renderer`]
//! backend (Cairo for PNG output, or the null renderer for headless checks).

pub mod api;
pub mod core;
pub mod error;
pub mod figures;
pub mod render;
pub mod telemetry;

pub use api::{FigureEngine, FigureEngineConfig};
pub use error::{FigureError, FigureResult};
pub use figures::{FigureContext, FigureId, catalog};
