use hecs::{Entity, World};
use log::info;

use crate::{
    components::{CandidatePool, GlobalTransform, GraspState, Hand, Parent},
    util::entity_name,
    GraspResult,
};

/// The two linked hands of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandPair {
    /// The left hand
    pub left: Entity,
    /// The right hand
    pub right: Entity,
}

impl HandPair {
    /// The other hand of the pair, or `None` if `hand` isn't part of it
    pub fn partner_of(&self, hand: Entity) -> Option<Entity> {
        if hand == self.left {
            Some(self.right)
        } else if hand == self.right {
            Some(self.left)
        } else {
            None
        }
    }
}

/// Make `left` and `right` partners. Done once, when the hands are spawned.
pub fn link_hands(world: &mut World, left: Entity, right: Entity) -> GraspResult<HandPair> {
    world.get::<&mut Hand>(left)?.partner = Some(right);
    world.get::<&mut Hand>(right)?.partner = Some(left);
    info!(
        "Linked {} and {}",
        entity_name(world, left),
        entity_name(world, right)
    );
    Ok(HandPair { left, right })
}

/// Tell `partner` that `initiator` has just grasped `object` with both hands.
///
/// The partner trusts the initiator and does not check any grasp preconditions itself. It follows
/// along by attaching itself to the initiator. Delivering the same notification twice does nothing
/// the second time and returns `false`.
pub fn notify_partner_two_hand_attach(
    world: &mut World,
    partner: Entity,
    initiator: Entity,
    object: Entity,
) -> GraspResult<bool> {
    let grasp = world.get::<&Hand>(partner)?.grasp;
    if matches!(grasp, GraspState::TwoHandHeld { object: o, .. } if o == object) {
        return Ok(false);
    }

    let global_from_initiator = world.get::<&GlobalTransform>(initiator)?.0;
    let global_from_partner = world.get::<&GlobalTransform>(partner)?.0;
    world.insert_one(
        partner,
        Parent::keeping_world(initiator, &global_from_initiator, &global_from_partner),
    )?;

    world.get::<&mut CandidatePool>(partner)?.clear_two_hands();
    world.get::<&mut Hand>(partner)?.grasp = GraspState::TwoHandHeld {
        object,
        anchor: initiator,
    };

    Ok(true)
}

/// Tell `partner` that the two-hand grasp it was part of is over. The partner lets go of its
/// reference to the object and detaches from the other hand; the object itself is left alone.
/// Delivering the same notification twice does nothing the second time and returns `false`.
pub fn notify_partner_two_hand_detach(world: &mut World, partner: Entity) -> GraspResult<bool> {
    {
        let mut hand = world.get::<&mut Hand>(partner)?;
        if !matches!(hand.grasp, GraspState::TwoHandHeld { .. }) {
            return Ok(false);
        }
        hand.grasp = GraspState::Empty;
    }

    // The anchor of the grasp was never attached to anything.
    let _ = world.remove_one::<Parent>(partner);
    Ok(true)
}
