//! Animation loop state shared by every demo.

pub mod state;

pub use state::AnimationState;
