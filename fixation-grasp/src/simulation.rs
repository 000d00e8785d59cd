use std::collections::VecDeque;

use glam::Affine3A;
use hecs::{Entity, World};
use rapier3d::prelude::{ImpulseJointHandle, SharedShape};

use crate::{
    classify::Graspability,
    components::{
        BodyType, CandidatePool, Collider, FingerRig, GlobalTransform, GraspArea, GripController,
        Hand, Handedness, Info, RigidBody,
    },
    config::GraspConfig,
    contexts::PhysicsContext,
    hand_pair::{link_hands, HandPair},
    systems::{
        bind_finger_drives, collision_system, detach, finger_drives_system, grip_system, maintain_pose,
        on_proximity_enter, on_proximity_exit, physics_system, proximity_system, switch_pose,
        try_one_hand_grasp, try_two_hands_grasp, update_global_transform_with_parent_system,
        update_pose,
    },
    util::entity_name,
};

/// Something a hand has been asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraspAction {
    /// Pick up a one-hand candidate
    OneHandGrasp,
    /// Pick up the two-hand candidate together with the partner hand
    TwoHandsGrasp,
    /// Let go of whatever is held
    Detach,
    /// Move on to the next grasp pose
    SwitchPose,
}

/// An action queued for a hand, carried out during the next [`Simulation::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandCommand {
    /// The hand to act
    pub hand: Entity,
    /// What it should do
    pub action: GraspAction,
}

/// A world of hands and graspable objects, and the physics simulation they live in.
///
/// Everything runs on the caller's thread. Grasp operations called directly take effect immediately;
/// commands pushed with [`Simulation::push_command`] are carried out in order during the next
/// [`Simulation::update`], after candidates have been refreshed.
pub struct Simulation {
    /// All hands and objects
    pub world: World,
    /// The physics simulation
    pub physics_context: PhysicsContext,
    config: GraspConfig,
    commands: VecDeque<HandCommand>,
}

impl Simulation {
    /// An empty simulation
    pub fn new(config: GraspConfig) -> Self {
        Self {
            world: World::new(),
            physics_context: PhysicsContext::default(),
            config,
            commands: Default::default(),
        }
    }

    /// The configuration this simulation was built with
    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    /// Spawn a single, unlinked hand
    pub fn spawn_hand(&mut self, name: &str, handedness: Handedness, transform: Affine3A) -> Entity {
        spawn_hand(&mut self.world, &self.config, name, handedness, transform)
    }

    /// Spawn a left and a right hand and link them together
    pub fn spawn_hand_pair(&mut self, left: Affine3A, right: Affine3A) -> HandPair {
        let left = self.spawn_hand("Left Hand", Handedness::Left, left);
        let right = self.spawn_hand("Right Hand", Handedness::Right, right);
        link_hands(&mut self.world, left, right).unwrap_or_else(|e| {
            log::error!("Unable to link hands: {e:?}");
            HandPair { left, right }
        })
    }

    /// Spawn an object that hands may be able to pick up
    pub fn spawn_graspable(
        &mut self,
        name: &str,
        shape: SharedShape,
        mass: f32,
        body_type: BodyType,
        transform: Affine3A,
    ) -> Entity {
        spawn_graspable(&mut self.world, name, shape, mass, body_type, transform)
    }

    /// `object` came within reach of `hand`
    pub fn on_proximity_enter(&mut self, hand: Entity, object: Entity) -> Graspability {
        on_proximity_enter(&mut self.world, &self.config.thresholds, hand, object).unwrap_or_else(
            |e| {
                log::error!(
                    "Unable to add a candidate to {}: {e:?}",
                    entity_name(&self.world, hand)
                );
                Graspability::NotGraspable
            },
        )
    }

    /// `object` went out of reach of `hand`
    pub fn on_proximity_exit(&mut self, hand: Entity, object: Entity) {
        if let Err(e) = on_proximity_exit(&mut self.world, hand, object) {
            log::error!(
                "Unable to remove a candidate from {}: {e:?}",
                entity_name(&self.world, hand)
            );
        }
    }

    /// See [`crate::systems::try_one_hand_grasp`]
    pub fn try_one_hand_grasp(&mut self, hand: Entity) -> bool {
        try_one_hand_grasp(&mut self.world, &self.config, hand)
    }

    /// See [`crate::systems::try_two_hands_grasp`]
    pub fn try_two_hands_grasp(&mut self, hand: Entity) -> bool {
        try_two_hands_grasp(&mut self.world, &self.config, hand)
    }

    /// See [`crate::systems::detach`]
    pub fn detach(&mut self, hand: Entity) -> bool {
        detach(&mut self.world, hand)
    }

    /// See [`crate::systems::maintain_pose`]
    pub fn maintain_pose(&mut self, hand: Entity) -> bool {
        maintain_pose(&mut self.world, hand)
    }

    /// See [`crate::systems::update_pose`]
    pub fn update_pose(&mut self, hand: Entity, alpha: f32) {
        if let Err(e) = update_pose(&mut self.world, hand, alpha) {
            log::error!(
                "Unable to update the pose of {}: {e:?}",
                entity_name(&self.world, hand)
            );
        }
    }

    /// See [`crate::systems::switch_pose`]
    pub fn switch_pose(&mut self, hand: Entity) -> bool {
        switch_pose(&mut self.world, hand)
    }

    /// See [`crate::systems::bind_finger_drives`]. Returns how many finger segments were bound.
    pub fn bind_finger_drives(
        &mut self,
        hand: Entity,
        lookup: impl FnMut(&str) -> Option<ImpulseJointHandle>,
    ) -> usize {
        bind_finger_drives(&mut self.world, hand, lookup).unwrap_or_else(|e| {
            log::error!(
                "Unable to bind finger drives for {}: {e:?}",
                entity_name(&self.world, hand)
            );
            0
        })
    }

    /// Queue an action for the next [`Simulation::update`]
    pub fn push_command(&mut self, command: HandCommand) {
        self.commands.push_back(command);
    }

    /// Advance the simulation by one frame
    pub fn update(&mut self, delta_time: f32) {
        collision_system(self);
        proximity_system(self);
        self.run_commands();
        grip_system(self);
        update_global_transform_with_parent_system(self);
        finger_drives_system(self);
        physics_system(self, delta_time);
    }

    fn run_commands(&mut self) {
        while let Some(HandCommand { hand, action }) = self.commands.pop_front() {
            let succeeded = match action {
                GraspAction::OneHandGrasp => self.try_one_hand_grasp(hand),
                GraspAction::TwoHandsGrasp => self.try_two_hands_grasp(hand),
                GraspAction::Detach => self.detach(hand),
                GraspAction::SwitchPose => self.switch_pose(hand),
            };
            log::debug!(
                "{:?} for {}: {}",
                action,
                entity_name(&self.world, hand),
                if succeeded { "done" } else { "nothing to do" }
            );
        }
    }
}

/// Spawn a hand with everything it needs to find, grasp and hold objects
pub(crate) fn spawn_hand(
    world: &mut World,
    config: &GraspConfig,
    name: &str,
    handedness: Handedness,
    transform: Affine3A,
) -> Entity {
    let radius = config.grasp_area_radius;
    world.spawn((
        Info::new(name),
        Hand::new(handedness),
        RigidBody::kinematic_position_based(),
        Collider::sensor(SharedShape::ball(radius)),
        GraspArea::new(radius),
        CandidatePool::default(),
        FingerRig::new(handedness),
        GripController::default(),
        GlobalTransform(transform),
    ))
}

/// Spawn an object with the capabilities needed to be classified and grasped
pub(crate) fn spawn_graspable(
    world: &mut World,
    name: &str,
    shape: SharedShape,
    mass: f32,
    body_type: BodyType,
    transform: Affine3A,
) -> Entity {
    let rigid_body = RigidBody {
        body_type,
        mass,
        ..Default::default()
    };

    world.spawn((
        Info::new(name),
        rigid_body,
        Collider::new(shape),
        GlobalTransform(transform),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GraspState, Grasped, Parent};
    use approx::assert_relative_eq;
    use glam::Vec3;

    const DT: f32 = 1. / 72.;

    fn simulation_with_hands() -> (Simulation, HandPair) {
        let mut simulation = Simulation::new(GraspConfig::default());
        let hands = simulation.spawn_hand_pair(
            Affine3A::from_translation(Vec3::new(-20., 100., 0.)),
            Affine3A::from_translation(Vec3::new(20., 100., 0.)),
        );
        (simulation, hands)
    }

    fn move_hand(simulation: &mut Simulation, hand: Entity, translation: Vec3) {
        simulation
            .world
            .get::<&mut GlobalTransform>(hand)
            .unwrap()
            .0
            .translation = translation.into();
    }

    #[test]
    pub fn test_pick_up_and_throw() {
        let (mut simulation, hands) = simulation_with_hands();
        let cup = simulation.spawn_graspable(
            "Cup",
            SharedShape::cuboid(3., 5., 3.),
            0.3,
            BodyType::Dynamic,
            Affine3A::from_translation(Vec3::new(-20., 102., 0.)),
        );

        // The first frame creates physics bodies, the second sees the overlap
        simulation.update(DT);
        simulation.update(DT);
        assert!(simulation
            .world
            .get::<&CandidatePool>(hands.left)
            .unwrap()
            .contains(cup));
        assert!(!simulation
            .world
            .get::<&CandidatePool>(hands.right)
            .unwrap()
            .contains(cup));

        simulation.push_command(HandCommand {
            hand: hands.left,
            action: GraspAction::OneHandGrasp,
        });
        simulation.update(DT);
        assert_eq!(
            simulation.world.get::<&Grasped>(cup).unwrap().hand,
            hands.left
        );

        // Carry the cup a little way; it comes along
        move_hand(&mut simulation, hands.left, Vec3::new(-20., 110., 0.));
        simulation.update(DT);
        {
            let cup_transform = simulation.world.get::<&GlobalTransform>(cup).unwrap();
            assert_relative_eq!(
                cup_transform.translation(),
                Vec3::new(-20., 112., 0.),
                epsilon = 0.001
            );
        }
        assert!(simulation
            .world
            .get::<&Hand>(hands.left)
            .unwrap()
            .grasp
            .is_held());

        // Let go while the hand is moving
        simulation
            .world
            .get::<&mut RigidBody>(hands.left)
            .unwrap()
            .linear_velocity = Vec3::new(0., 0., 5.);
        assert!(simulation.detach(hands.left));
        simulation.update(DT);

        let rigid_body = simulation.world.get::<&RigidBody>(cup).unwrap();
        assert!(rigid_body.is_simulating());
        assert_relative_eq!(rigid_body.linear_velocity.z, 5., epsilon = 0.01);
        assert!(simulation.world.get::<&Parent>(cup).is_err());
    }

    #[test]
    pub fn test_carry_with_both_hands() {
        let (mut simulation, hands) = simulation_with_hands();
        let crate_ = simulation.spawn_graspable(
            "Crate",
            SharedShape::cuboid(20., 15., 20.),
            8.,
            BodyType::Dynamic,
            Affine3A::from_translation(Vec3::new(0., 100., 0.)),
        );
        simulation.update(DT);
        simulation.update(DT);

        // Too heavy for one hand
        assert!(!simulation.try_one_hand_grasp(hands.right));
        assert!(simulation.try_two_hands_grasp(hands.right));
        let expected = GraspState::TwoHandHeld {
            object: crate_,
            anchor: hands.right,
        };
        assert_eq!(simulation.world.get::<&Hand>(hands.left).unwrap().grasp, expected);
        assert_eq!(simulation.world.get::<&Hand>(hands.right).unwrap().grasp, expected);

        // Moving the anchor hand moves everything
        move_hand(&mut simulation, hands.right, Vec3::new(20., 130., 0.));
        simulation.update(DT);
        {
            let crate_transform = simulation.world.get::<&GlobalTransform>(crate_).unwrap();
            assert_relative_eq!(
                crate_transform.translation(),
                Vec3::new(0., 130., 0.),
                epsilon = 0.001
            );
            let left_transform = simulation.world.get::<&GlobalTransform>(hands.left).unwrap();
            assert_relative_eq!(
                left_transform.translation(),
                Vec3::new(-20., 130., 0.),
                epsilon = 0.001
            );
        }

        simulation.push_command(HandCommand {
            hand: hands.left,
            action: GraspAction::Detach,
        });
        simulation.update(DT);
        assert!(simulation.world.get::<&Hand>(hands.left).unwrap().grasp.is_empty());
        assert!(simulation.world.get::<&Hand>(hands.right).unwrap().grasp.is_empty());
        assert!(simulation.world.get::<&RigidBody>(crate_).unwrap().is_simulating());
    }

    #[test]
    pub fn test_config_is_kept() {
        let config = GraspConfig {
            grasp_area_radius: 7.,
            ..Default::default()
        };
        let mut simulation = Simulation::new(config.clone());
        let hand = simulation.spawn_hand("Hand", Handedness::Left, Affine3A::IDENTITY);
        assert_eq!(simulation.config(), &config);
        assert_eq!(
            simulation.world.get::<&GraspArea>(hand).unwrap().radius,
            7.
        );
    }
}
