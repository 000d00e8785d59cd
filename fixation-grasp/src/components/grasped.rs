use hecs::Entity;

/// Added to an object while it is attached to a hand.
/// An object can only belong to one grasp at a time; it has to be released before another hand can
/// take it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grasped {
    /// The hand the object is physically attached to
    pub hand: Entity,
}
