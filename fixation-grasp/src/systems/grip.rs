use hecs::{Entity, World};
use log::error;

use crate::{
    components::{FingerRig, GraspState, GripController, GripPose, Hand},
    systems::grasping::maintain_pose,
    util::entity_name,
    GraspResult, Simulation,
};

/// Grip system
/// Moves the fingers of every hand towards its grasp pose, according to how far the hand is closed.
pub fn grip_system(simulation: &mut Simulation) {
    grip_system_inner(&mut simulation.world);
}

pub(crate) fn grip_system_inner(world: &mut World) {
    let hands = world
        .query::<&Hand>()
        .iter()
        .map(|(entity, hand)| (entity, hand.grip_value))
        .collect::<Vec<_>>();

    for (hand, grip_value) in hands {
        if let Err(e) = update_pose(world, hand, grip_value) {
            error!(
                "Unable to update the grip of {}: {e:?}",
                entity_name(world, hand)
            );
        }
    }
}

/// Move the fingers of `hand` towards a grip that is `alpha` closed.
///
/// Open hands and hands sharing a two-hand grasp follow their [`crate::GraspPolicy`]. A closing
/// one-hand grasp is frozen where it is instead, and a frozen grasp is left alone.
pub fn update_pose(world: &mut World, hand: Entity, alpha: f32) -> GraspResult<()> {
    let grasp = world.get::<&Hand>(hand)?.grasp;
    match grasp {
        GraspState::Empty | GraspState::TwoHandHeld { .. } => {}
        GraspState::OneHandHeld {
            pose: GripPose::Closing,
            ..
        } => {
            maintain_pose(world, hand);
            return Ok(());
        }
        GraspState::OneHandHeld {
            pose: GripPose::Held,
            ..
        } => return Ok(()),
    }

    let mut query = world.query_one::<(&mut GripController, &mut FingerRig)>(hand)?;
    if let Some((controller, rig)) = query.get() {
        controller.policy.update_pose(rig, alpha);
    }
    Ok(())
}

/// Move `hand` on to its next grasp pose
pub fn switch_pose(world: &mut World, hand: Entity) -> bool {
    let name = entity_name(world, hand);
    match world.get::<&mut GripController>(hand) {
        Ok(mut controller) => {
            controller.policy.switch_pose();
            log::debug!(
                "{name} switched to the {} pose",
                controller.policy.current_pose()
            );
            true
        }
        Err(e) => {
            error!("{name} has no grip controller: {e:?}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{Finger, FingerPart},
        util::{add_box, get_world_with_hands},
        GraspConfig, GraspThresholds,
    };
    use approx::assert_relative_eq;
    use glam::{Quat, Vec3};

    fn index_target(world: &World, hand: Entity) -> Quat {
        world
            .get::<&FingerRig>(hand)
            .unwrap()
            .segment(Finger::Index, FingerPart::Proximal)
            .target
    }

    #[test]
    pub fn test_open_hand_follows_policy() {
        let (mut world, hands) = get_world_with_hands();
        world.get::<&mut Hand>(hands.left).unwrap().grip_value = 0.5;
        grip_system_inner(&mut world);

        // Power grip: 100 degrees closed, half way there
        assert_relative_eq!(
            index_target(&world, hands.left),
            Quat::from_rotation_x(50f32.to_radians()),
            epsilon = 0.0001
        );
        // The right hand is fully open
        assert_relative_eq!(index_target(&world, hands.right), Quat::IDENTITY);
    }

    #[test]
    pub fn test_closing_grasp_is_frozen() {
        let (mut world, hands) = get_world_with_hands();
        let cup = add_box(&mut world, "Cup", 0.3, 5., Vec3::ZERO);
        crate::systems::on_proximity_enter(
            &mut world,
            &GraspThresholds::default(),
            hands.left,
            cup,
        )
        .unwrap();

        // Fingers have made it part of the way round the cup
        let current = Quat::from_rotation_x(0.4);
        for segment in world.get::<&mut FingerRig>(hands.left).unwrap().segments_mut() {
            segment.current = current;
        }
        assert!(crate::systems::try_one_hand_grasp(
            &mut world,
            &GraspConfig::default(),
            hands.left
        ));

        update_pose(&mut world, hands.left, 1.).unwrap();
        assert!(world.get::<&Hand>(hands.left).unwrap().grasp.is_held());
        assert_relative_eq!(index_target(&world, hands.left), current);

        // Squeezing harder changes nothing once the grip is frozen
        update_pose(&mut world, hands.left, 1.).unwrap();
        assert_relative_eq!(index_target(&world, hands.left), current);
    }

    #[test]
    pub fn test_switch_pose() {
        let (mut world, hands) = get_world_with_hands();
        assert!(switch_pose(&mut world, hands.left));
        assert_eq!(
            world
                .get::<&GripController>(hands.left)
                .unwrap()
                .policy
                .current_pose(),
            "pinch"
        );

        world.remove_one::<GripController>(hands.right).unwrap();
        assert!(!switch_pose(&mut world, hands.right));
        // Without a controller the fingers just don't move
        update_pose(&mut world, hands.right, 1.).unwrap();
    }
}
