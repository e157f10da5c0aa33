//! Arena-backed mobject tree and vectorized path engine.
//!
//! Every [`Mobject`] lives in the [`Scene`]'s slot map and is addressed by a
//! [`MobjectKey`]. Parent/child links are keys as well, so a node reachable
//! through two parents is still one node, and family traversals deduplicate
//! by key.
//!
//! Most operations are methods on [`Scene`] because they walk several nodes
//! (a mobject's family, or two mobjects being aligned). Operations that only
//! touch one node's own points, such as path construction, are methods on
//! [`Mobject`] itself.
//!
//! ```rust,ignore
//! use kinema_scene::{Mobject, Scene};
//! use kinema_core::constants::{RIGHT, UP};
//!
//! let mut scene = Scene::new();
//! let square = scene.spawn(Mobject::vmobject_corners(&[
//!     -RIGHT - UP, RIGHT - UP, RIGHT + UP, -RIGHT + UP, -RIGHT - UP,
//! ])?);
//! scene.add(&[square]);
//! scene.mobject(square).shift(RIGHT).rotate(0.5);
//! ```

pub mod mobject;
pub mod scene;
pub mod vmobject;
pub mod wrapper;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a mobject stored in a [`Scene`].
    pub struct MobjectKey;
}

pub use mobject::{Mobject, MobjectKind, Updater};
pub use scene::Scene;
pub use vmobject::path::AnchorMode;
pub use vmobject::{Paint, VMobjectData, VMobjectStyle};
pub use wrapper::MobjectRef;
