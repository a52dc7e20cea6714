//! Editing interactions layered over the vector source.
//!
//! | Interaction | Role |
//! |-------------|------|
//! | [`draw`] | Sketches new polygons click by click |
//! | [`modify`] | Drags, inserts and deletes vertices of existing features |
//! | [`snap`] | Pulls pointer coordinates onto nearby vertices and edges |
//!
//! The engine consults them in the order snap, modify, draw: every pointer
//! coordinate is snapped first, modify gets the first chance at a press, and
//! draw handles clicks modify did not claim.

pub mod draw;
pub mod modify;
pub mod snap;

use draw::Draw;
use modify::Modify;
use snap::Snap;

/// The interaction set attached to the map.
#[derive(Debug, Clone, Default)]
pub struct Interactions {
    pub draw: Draw,
    pub modify: Modify,
    pub snap: Snap,
}
