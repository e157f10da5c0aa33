//! Playback for Kinema scenes.
//!
//! The [`Player`] steps a scene frame by frame against a [`Display`],
//! playing animations and running updaters in a fixed per-tick order.
//! Playback stops cooperatively through a [`CancellationToken`].

pub mod cancel;
pub mod display;
pub mod logging;
pub mod player;

pub use cancel::CancellationToken;
pub use display::{Display, HeadlessDisplay};
pub use player::{FrameState, Flow, Player, RunOutcome};
