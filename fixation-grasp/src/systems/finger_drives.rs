use glam::EulerRot;
use hecs::{Entity, World};
use log::{error, info};
use rapier3d::prelude::{ImpulseJointHandle, JointAxis};

use crate::{
    components::FingerRig, config::DriveParams, contexts::PhysicsContext,
    util::{entity_name, glam_quat_from_na},
    GraspResult, Simulation,
};

/// Bind the finger segments of `hand` to the joints of its skeleton. `lookup` maps a bone name like
/// `index_02_l` to the joint driving that bone.
///
/// Returns how many segments were bound. Grasping works with no drives at all; the fingers just don't
/// move.
pub fn bind_finger_drives(
    world: &mut World,
    hand: Entity,
    lookup: impl FnMut(&str) -> Option<ImpulseJointHandle>,
) -> GraspResult<usize> {
    let bound = world.get::<&mut FingerRig>(hand)?.bind_drives(lookup);
    if bound == 0 {
        error!(
            "Unable to find any finger joints for {}",
            entity_name(world, hand)
        );
    } else {
        info!(
            "Bound {bound} finger drives for {}",
            entity_name(world, hand)
        );
    }
    Ok(bound)
}

/// Finger drives system
/// Reads back where each bound finger joint currently is, then pulls it towards its target with the
/// configured spring and damping.
pub fn finger_drives_system(simulation: &mut Simulation) {
    let drive = simulation.config().drive;
    finger_drives_system_inner(
        &mut simulation.world,
        &mut simulation.physics_context,
        &drive,
    );
}

pub(crate) fn finger_drives_system_inner(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    drive: &DriveParams,
) {
    let max_force = drive.max_force();

    for (_, rig) in world.query_mut::<&mut FingerRig>() {
        for segment in rig.segments_mut() {
            let Some(handle) = segment.drive else {
                continue;
            };
            let Some(joint) = physics_context.impulse_joints.get_mut(handle) else {
                continue;
            };

            if let (Some(body1), Some(body2)) = (
                physics_context.rigid_bodies.get(joint.body1),
                physics_context.rigid_bodies.get(joint.body2),
            ) {
                let frame1 = body1.rotation() * joint.data.local_frame1.rotation;
                let frame2 = body2.rotation() * joint.data.local_frame2.rotation;
                segment.current = glam_quat_from_na(&(frame1.inverse() * frame2));
            }

            let (x, y, z) = segment.target.to_euler(EulerRot::XYZ);
            for (axis, angle) in [
                (JointAxis::AngX, x),
                (JointAxis::AngY, y),
                (JointAxis::AngZ, z),
            ] {
                joint
                    .data
                    .set_motor_position(axis, angle, drive.spring, drive.damping);
                joint.data.set_motor_max_force(axis, max_force);
            }
        }
    }
}
