//! Collision geometry and contact classification.
//!
//! A solid contact against ground is only survivable when the actor comes
//! down on top of it. The test is purely geometric: it compares the actor's
//! lowest point with the struck collider's highest point at the instant of
//! contact and ignores the direction of travel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl Aabb {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a box centred on `centre` extending `half_extents` each way.
    #[must_use]
    pub fn from_centre(centre: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: centre - half_extents,
            max: centre + half_extents,
        }
    }

    /// Grows the box by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: Vec2) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Returns `true` when the interiors of both boxes intersect.
    ///
    /// Boxes that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Tag carried by a collider, used to decide how a contact is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColliderTag {
    /// Walkable geometry; lethal unless landed on from above.
    Ground,
    /// Hazard trigger; always lethal.
    Obstacle,
    /// Anything the controller does not react to.
    #[default]
    Untagged,
}

/// Bit set of physics layers a query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Walkable ground.
    pub const GROUND: Self = Self(1);
    /// Hazard triggers.
    pub const OBSTACLE: Self = Self(1 << 1);

    /// Whether any layer in `other` is also in `self`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// Geometric reading of a solid contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// The actor came down on top of the collider.
    Landing,
    /// Side or underside impact.
    Lethal,
}

/// Classifies a contact from the actor's lower bound and the struck
/// collider's upper bound.
///
/// The contact is a landing only when the actor's bottom is strictly above
/// the collider's top.
///
/// # Examples
///
/// ```
/// use jetrunner::collision::{classify_contact, ContactKind};
/// assert_eq!(classify_contact(2.0, 1.0), ContactKind::Landing);
/// assert_eq!(classify_contact(0.5, 1.0), ContactKind::Lethal);
/// ```
#[must_use]
pub fn classify_contact(actor_bottom: f32, collider_top: f32) -> ContactKind {
    if actor_bottom > collider_top {
        ContactKind::Landing
    } else {
        ContactKind::Lethal
    }
}

/// What a collision callback did to the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The contact was not relevant, or the actor was already dead.
    Ignored,
    /// The actor landed safely.
    Landed,
    /// The contact killed the actor.
    Killed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::well_above(2.0, 1.0, ContactKind::Landing)]
    #[case::just_above(1.001, 1.0, ContactKind::Landing)]
    #[case::flush(1.0, 1.0, ContactKind::Lethal)]
    #[case::side_hit(0.5, 1.0, ContactKind::Lethal)]
    fn classifies_by_vertical_bounds(
        #[case] bottom: f32,
        #[case] top: f32,
        #[case] expected: ContactKind,
    ) {
        assert_eq!(classify_contact(bottom, top), expected);
    }

    #[rstest]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::ONE);
        let b = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::from_centre(Vec2::new(1.0, 0.5), Vec2::splat(0.25));
        assert!(a.overlaps(&c));
    }

    #[rstest]
    fn layer_masks_intersect_on_shared_bits() {
        assert!(LayerMask::GROUND.intersects(LayerMask(0b11)));
        assert!(!LayerMask::GROUND.intersects(LayerMask::OBSTACLE));
    }
}
