use hecs::{Entity, World};
use log::{debug, error, info, warn};

use crate::{
    components::{
        CandidatePool, FingerRig, GlobalTransform, GraspState, Grasped, GripPose, Hand, Parent,
        RigidBody,
    },
    config::GraspConfig,
    hand_pair::{notify_partner_two_hand_attach, notify_partner_two_hand_detach},
    util::entity_name,
    GraspError, GraspResult,
};

/// Try to pick up one of the hand's one-hand candidates.
///
/// Only an empty hand can grasp. Candidates already held by another hand are skipped. On success the
/// object stops being simulated, is attached to the hand where it currently is, and the fingers
/// start closing around it.
pub fn try_one_hand_grasp(world: &mut World, config: &GraspConfig, hand: Entity) -> bool {
    match try_one_hand_grasp_inner(world, config, hand) {
        Ok(Some(object)) => {
            info!(
                "{} grasped {}",
                entity_name(world, hand),
                entity_name(world, object)
            );
            true
        }
        Ok(None) => false,
        Err(e) => {
            error!("Unable to grasp with {}: {e:?}", entity_name(world, hand));
            false
        }
    }
}

fn try_one_hand_grasp_inner(
    world: &mut World,
    config: &GraspConfig,
    hand: Entity,
) -> GraspResult<Option<Entity>> {
    if !config.fixation_grasp_enabled {
        debug!("Fixation grasp is disabled");
        return Ok(None);
    }

    if !world.get::<&Hand>(hand)?.grasp.is_empty() {
        warn!(
            "{} tried to grasp while already holding something",
            entity_name(world, hand)
        );
        return Ok(None);
    }

    let object = {
        let world: &World = world;
        world
            .get::<&mut CandidatePool>(hand)?
            .take_one_hand(|candidate| is_available(world, candidate))
    };
    let Some(object) = object else {
        debug!("{} has nothing to grasp", entity_name(world, hand));
        return Ok(None);
    };

    attach_object(world, hand, object)?;
    world.get::<&mut Hand>(hand)?.grasp = GraspState::OneHandHeld {
        object,
        pose: GripPose::Closing,
    };

    Ok(Some(object))
}

/// Try to pick up the hand's two-hand candidate together with its partner.
///
/// Both hands must be empty and agree on the same candidate. The object is attached to this hand,
/// which becomes the anchor of the grasp; the partner is told exactly once and attaches itself to this
/// hand. If anything doesn't line up, neither hand changes.
pub fn try_two_hands_grasp(world: &mut World, config: &GraspConfig, hand: Entity) -> bool {
    match try_two_hands_grasp_inner(world, config, hand) {
        Ok(Some(object)) => {
            info!(
                "{} grasped {} with both hands",
                entity_name(world, hand),
                entity_name(world, object)
            );
            true
        }
        Ok(None) => false,
        Err(e) => {
            error!(
                "Unable to grasp with both hands from {}: {e:?}",
                entity_name(world, hand)
            );
            false
        }
    }
}

fn try_two_hands_grasp_inner(
    world: &mut World,
    config: &GraspConfig,
    hand: Entity,
) -> GraspResult<Option<Entity>> {
    if !config.fixation_grasp_enabled || !config.two_hands_fixation_grasp_enabled {
        debug!("Two-hand fixation grasp is disabled");
        return Ok(None);
    }

    let (grasp, partner) = {
        let hand = world.get::<&Hand>(hand)?;
        (hand.grasp, hand.partner)
    };

    if !grasp.is_empty() {
        warn!(
            "{} tried to grasp while already holding something",
            entity_name(world, hand)
        );
        return Ok(None);
    }

    let Some(partner) = partner else {
        warn!("{} has no partner to grasp with", entity_name(world, hand));
        return Ok(None);
    };

    if !world.get::<&Hand>(partner)?.grasp.is_empty() {
        debug!("{} is busy", entity_name(world, partner));
        return Ok(None);
    }

    let Some(object) = world.get::<&CandidatePool>(hand)?.two_hands_candidate() else {
        debug!("{} has nothing to grasp", entity_name(world, hand));
        return Ok(None);
    };

    let partner_candidate = world.get::<&CandidatePool>(partner)?.two_hands_candidate();
    if partner_candidate != Some(object) {
        warn!(
            "{} and {} can't agree on what to grasp: {} vs {:?}",
            entity_name(world, hand),
            entity_name(world, partner),
            entity_name(world, object),
            partner_candidate.map(|c| entity_name(world, c)),
        );
        return Ok(None);
    }

    if !is_available(world, object) {
        debug!("{} is already held", entity_name(world, object));
        return Ok(None);
    }

    // Neither hand changes unless both of them can take part.
    if !world.satisfies::<&GlobalTransform>(hand)?
        || !world.satisfies::<(&GlobalTransform, &CandidatePool)>(partner)?
        || !world.satisfies::<(&GlobalTransform, &RigidBody)>(object)?
    {
        warn!(
            "{} and {} are unable to hold {} together",
            entity_name(world, hand),
            entity_name(world, partner),
            entity_name(world, object)
        );
        return Ok(None);
    }

    attach_object(world, hand, object)?;
    world.get::<&mut CandidatePool>(hand)?.clear_two_hands();
    world.get::<&mut Hand>(hand)?.grasp = GraspState::TwoHandHeld {
        object,
        anchor: hand,
    };
    notify_partner_two_hand_attach(world, partner, hand, object)?;

    Ok(Some(object))
}

/// Let go of whatever the hand is holding.
///
/// The object goes back to being simulated, moving off with the hand's current velocity. A two-hand
/// grasp can be ended from either hand; the partner is told and the object is only released once.
pub fn detach(world: &mut World, hand: Entity) -> bool {
    match detach_inner(world, hand) {
        Ok(Some(object)) => {
            info!(
                "{} released {}",
                entity_name(world, hand),
                entity_name(world, object)
            );
            true
        }
        Ok(None) => false,
        Err(e) => {
            error!("Unable to detach from {}: {e:?}", entity_name(world, hand));
            false
        }
    }
}

fn detach_inner(world: &mut World, hand: Entity) -> GraspResult<Option<Entity>> {
    let (grasp, partner) = {
        let hand = world.get::<&Hand>(hand)?;
        (hand.grasp, hand.partner)
    };

    match grasp {
        GraspState::Empty => {
            debug!("{} has nothing to release", entity_name(world, hand));
            Ok(None)
        }
        GraspState::OneHandHeld { object, .. } => {
            release_object(world, hand, object)?;
            world.get::<&mut Hand>(hand)?.grasp = GraspState::Empty;
            Ok(Some(object))
        }
        GraspState::TwoHandHeld { object, .. } => {
            // Only the follower is attached to the other hand.
            let _ = world.remove_one::<Parent>(hand);
            release_object(world, hand, object)?;
            world.get::<&mut Hand>(hand)?.grasp = GraspState::Empty;

            match partner {
                Some(partner) => {
                    // The object is already released, whatever happened to the partner.
                    if let Err(e) = notify_partner_two_hand_detach(world, partner) {
                        error!(
                            "Unable to tell {} that {} let go: {e:?}",
                            entity_name(world, partner),
                            entity_name(world, hand)
                        );
                    }
                }
                None => error!("{}", GraspError::MissingPartner(hand)),
            }
            Ok(Some(object))
        }
    }
}

/// Freeze the fingers of a closing one-hand grasp where they are.
/// Does nothing unless the hand is holding something on its own and still closing.
pub fn maintain_pose(world: &mut World, hand: Entity) -> bool {
    match maintain_pose_inner(world, hand) {
        Ok(frozen) => frozen,
        Err(e) => {
            error!(
                "Unable to maintain pose of {}: {e:?}",
                entity_name(world, hand)
            );
            false
        }
    }
}

fn maintain_pose_inner(world: &mut World, hand: Entity) -> GraspResult<bool> {
    let mut query = world.query_one::<(&mut Hand, Option<&mut FingerRig>)>(hand)?;
    let Some((state, rig)) = query.get() else {
        return Ok(false);
    };

    let GraspState::OneHandHeld { object, pose: GripPose::Closing } = state.grasp else {
        return Ok(false);
    };

    if let Some(rig) = rig {
        rig.freeze();
    }
    state.grasp = GraspState::OneHandHeld {
        object,
        pose: GripPose::Held,
    };

    Ok(true)
}

/// Could `object` be grasped by anyone right now?
fn is_available(world: &World, object: Entity) -> bool {
    world.contains(object) && world.get::<&Grasped>(object).is_err()
}

fn attach_object(world: &mut World, hand: Entity, object: Entity) -> GraspResult<()> {
    let global_from_hand = world.get::<&GlobalTransform>(hand)?.0;
    let global_from_object = world.get::<&GlobalTransform>(object)?.0;

    world
        .get::<&mut RigidBody>(object)?
        .set_simulate_physics(false);
    world.insert(
        object,
        (
            Parent::keeping_world(hand, &global_from_hand, &global_from_object),
            Grasped { hand },
        ),
    )?;

    Ok(())
}

fn release_object(world: &mut World, hand: Entity, object: Entity) -> GraspResult<()> {
    if !world.contains(object) {
        warn!("{:?} was despawned while it was held", object);
        return Ok(());
    }

    let velocity = world
        .get::<&RigidBody>(hand)
        .map(|r| r.linear_velocity)
        .unwrap_or_default();

    let _ = world.remove_one::<Parent>(object);
    let _ = world.remove_one::<Grasped>(object);

    let mut rigid_body = world.get::<&mut RigidBody>(object)?;
    rigid_body.set_simulate_physics(true);
    rigid_body.linear_velocity = velocity;

    Ok(())
}
