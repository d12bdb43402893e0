//! Hero section with the network animation behind it.

mod component;
mod types;

pub use component::HeroSection;
pub use types::{CtaAction, FeatureItem};
