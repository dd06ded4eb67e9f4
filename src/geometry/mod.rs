//! Scene-space geometry shared by the cameras.
//!
//! [`Place`] is the rigid coordinate frame cameras use for their position
//! (camera coordinates to scene coordinates), [`Bounds`] describes what a
//! view should frame, and [`Ray`] is the result of a window pick.

/// Axis-aligned bounds and pick rays.
pub mod bounds;
/// Rigid coordinate frames with local-frame composition.
pub mod place;

pub use bounds::{Bounds, Ray};
pub use place::Place;
