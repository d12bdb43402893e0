//! Layered procedural network animation for hero backgrounds.

mod canvas;
mod component;
pub mod config;
pub mod engine;
mod error;
pub mod graph;
pub mod lines;
pub mod noise;
pub mod paint;
pub mod pointer;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod theme;

pub use canvas::CanvasSurface;
pub use component::{mount, use_network_background};
pub use config::{Layers, Layout, NetworkConfig, NodeShape, SpeedConfig, SpeedOverrides};
pub use engine::{Engine, Subscription};
pub use error::EngineError;
