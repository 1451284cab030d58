//! vitrine-slices-core: showcase page slices.
//!
//! Each slice owns the timelines it creates and is driven by the host frame
//! loop (`frame`/`tick`). Page-wide state lives in an explicit
//! [`SceneContext`] passed in by the host.

pub mod carousel;
pub mod context;
pub mod error;
pub mod hero;
pub mod scroll_experience;

pub use carousel::{Carousel, CarouselItem, CarouselProps};
pub use context::SceneContext;
pub use error::SliceError;
pub use hero::{CallToAction, Hero, HeroProps, HeroStatus, OrbitConstraints};
pub use scroll_experience::{
    LightsConfig, Rig, SceneConfig, ScrollAnimation, ScrollExperience, ScrollExperienceProps,
};

/// Slice result type
pub type Result<T> = core::result::Result<T, SliceError>;
