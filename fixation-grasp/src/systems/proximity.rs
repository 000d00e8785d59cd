use hecs::{Entity, World};
use itertools::Itertools;
use log::debug;

use crate::{
    classify::{classify_entity, Graspability, GraspThresholds},
    components::{CandidatePool, Collider, GraspArea, Hand},
    util::entity_name,
    GraspResult, Simulation,
};

enum ProximityEvent {
    Enter(Entity, Entity),
    Exit(Entity, Entity),
}

/// Proximity system
/// Compares what each hand's grasp area overlaps this frame with what it overlapped last frame, and
/// turns the difference into enter and exit events for the hand's [`CandidatePool`].
///
/// Hands that are holding something don't receive events. When such a hand lets go, it re-enters
/// everything it currently overlaps and drops any candidate that went out of reach in the meantime.
pub fn proximity_system(simulation: &mut Simulation) {
    let thresholds = simulation.config().thresholds;
    proximity_system_inner(&mut simulation.world, &thresholds);
}

pub(crate) fn proximity_system_inner(world: &mut World, thresholds: &GraspThresholds) {
    let mut events = Vec::new();

    for (hand_entity, (hand, grasp_area, collider, pool)) in world
        .query::<(&Hand, &mut GraspArea, &Collider, &CandidatePool)>()
        .iter()
    {
        if !hand.detects_proximity() {
            grasp_area.overlapping.clear();
            grasp_area.needs_resync = true;
            continue;
        }

        let overlapping = collider
            .collisions_this_frame
            .iter()
            .copied()
            .filter(|e| *e != hand_entity && Some(*e) != hand.partner)
            .unique()
            .collect_vec();

        // After suppression, anything the pool still remembers may have wandered off.
        let stale = if grasp_area.needs_resync {
            pool.candidates().collect_vec()
        } else {
            Vec::new()
        };

        for exited in grasp_area
            .overlapping
            .iter()
            .copied()
            .chain(stale)
            .filter(|e| !overlapping.contains(e))
            .unique()
        {
            events.push(ProximityEvent::Exit(hand_entity, exited));
        }

        for entered in overlapping
            .iter()
            .copied()
            .filter(|e| !grasp_area.overlapping.contains(e))
        {
            events.push(ProximityEvent::Enter(hand_entity, entered));
        }

        grasp_area.overlapping = overlapping;
        grasp_area.needs_resync = false;
    }

    for event in events {
        let result = match event {
            ProximityEvent::Enter(hand, object) => {
                on_proximity_enter(world, thresholds, hand, object).map(|_| ())
            }
            ProximityEvent::Exit(hand, object) => on_proximity_exit(world, hand, object),
        };

        if let Err(e) = result {
            log::error!("Unable to process proximity event: {e:?}");
        }
    }
}

/// `object` came within reach of `hand`. The object is classified afresh and, if graspable, added to
/// the hand's candidates. Ignored while the hand is holding something.
pub fn on_proximity_enter(
    world: &mut World,
    thresholds: &GraspThresholds,
    hand: Entity,
    object: Entity,
) -> GraspResult<Graspability> {
    if !world.get::<&Hand>(hand)?.detects_proximity() {
        return Ok(Graspability::NotGraspable);
    }

    let graspability = classify_entity(world, object, thresholds);
    if graspability != Graspability::NotGraspable {
        debug!(
            "{} can reach {} ({graspability:?})",
            entity_name(world, hand),
            entity_name(world, object)
        );
    }

    world
        .get::<&mut CandidatePool>(hand)?
        .on_enter(object, graspability);
    Ok(graspability)
}

/// `object` went out of reach of `hand`. Ignored while the hand is holding something.
pub fn on_proximity_exit(world: &mut World, hand: Entity, object: Entity) -> GraspResult<()> {
    if !world.get::<&Hand>(hand)?.detects_proximity() {
        return Ok(());
    }

    let mut pool = world.get::<&mut CandidatePool>(hand)?;
    if pool.contains(object) {
        debug!("{:?} is out of reach of {:?}", object, hand);
    }
    pool.on_exit(object);
    Ok(())
}
