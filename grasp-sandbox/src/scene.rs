use anyhow::{ensure, Result};
use fixation_grasp::{
    components::{BodyType, GlobalTransform, Hand, RigidBody},
    hecs::Entity,
    rapier3d::prelude::SharedShape,
    GraspAction, GraspConfig, HandCommand, HandPair, Simulation,
};
use glam::{Affine3A, Vec3};
use log::{debug, info};

const DELTA_TIME: f32 = 1. / 72.;

/// A table with a cup and a crate on it, and a pair of hands above it
pub struct Scene {
    simulation: Simulation,
    hands: HandPair,
    cup: Entity,
    crate_: Entity,
    frame: usize,
}

impl Scene {
    pub fn new(config: GraspConfig) -> Self {
        let mut simulation = Simulation::new(config);
        let hands = simulation.spawn_hand_pair(
            Affine3A::from_translation(Vec3::new(-20., 100., 0.)),
            Affine3A::from_translation(Vec3::new(20., 100., 0.)),
        );

        simulation.spawn_graspable(
            "Table",
            SharedShape::cuboid(100., 5., 100.),
            200.,
            BodyType::Fixed,
            Affine3A::from_translation(Vec3::new(0., 40., 0.)),
        );
        let cup = simulation.spawn_graspable(
            "Cup",
            SharedShape::cuboid(3., 5., 3.),
            0.3,
            BodyType::Dynamic,
            Affine3A::from_translation(Vec3::new(-20., 102., 0.)),
        );
        let crate_ = simulation.spawn_graspable(
            "Crate",
            SharedShape::cuboid(20., 15., 20.),
            8.,
            BodyType::Dynamic,
            Affine3A::from_translation(Vec3::new(0., 60., 0.)),
        );

        Self {
            simulation,
            hands,
            cup,
            crate_,
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn pick_up_and_throw_cup(&mut self) -> Result<()> {
        let left = self.hands.left;

        // Physics bodies are created on the first frame and overlaps are seen on the next
        self.tick(2);

        // Try a different grip, then close the hand
        self.simulation.push_command(HandCommand {
            hand: left,
            action: GraspAction::SwitchPose,
        });
        self.close_hand(left, 0.5)?;
        ensure!(
            self.simulation.try_one_hand_grasp(left),
            "The left hand couldn't pick up the cup"
        );

        // Swing the hand forwards and let go mid-swing
        self.move_hand(left, Vec3::new(-20., 100., 30.), 18)?;
        ensure!(self.simulation.detach(left), "The left hand wasn't holding anything");
        self.close_hand(left, 0.)?;

        self.tick(36);
        let velocity = self.simulation.world.get::<&RigidBody>(self.cup)?.linear_velocity;
        info!(
            "The cup is at {:?}, moving at {velocity:?}",
            self.position(self.cup)?
        );

        Ok(())
    }

    pub fn carry_crate_with_both_hands(&mut self) -> Result<()> {
        let HandPair { left, right } = self.hands;

        // Bring both hands down to either side of the crate
        self.move_hand(left, Vec3::new(-20., 60., 0.), 36)?;
        self.move_hand(right, Vec3::new(20., 60., 0.), 36)?;

        ensure!(
            !self.simulation.try_one_hand_grasp(right),
            "The crate should be too heavy for one hand"
        );
        ensure!(
            self.simulation.try_two_hands_grasp(right),
            "The hands couldn't pick up the crate together"
        );

        // The left hand comes along with the right
        self.move_hand(right, Vec3::new(20., 90., 0.), 36)?;
        info!(
            "Lifted the crate to {:?}; the left hand is at {:?}",
            self.position(self.crate_)?,
            self.position(left)?
        );

        self.simulation.push_command(HandCommand {
            hand: left,
            action: GraspAction::Detach,
        });
        self.tick(1);
        let right_hand = self.simulation.world.get::<&Hand>(right)?.grasp;
        ensure!(
            right_hand.is_empty(),
            "Letting go with one hand should free the other"
        );

        Ok(())
    }

    /// Move a hand in a straight line over a number of frames
    fn move_hand(&mut self, hand: Entity, to: Vec3, frames: usize) -> Result<()> {
        let from = self.position(hand)?;
        for i in 1..=frames {
            let position = from.lerp(to, i as f32 / frames as f32);
            self.simulation
                .world
                .get::<&mut GlobalTransform>(hand)?
                .0
                .translation = position.into();
            self.tick(1);
        }
        Ok(())
    }

    fn close_hand(&mut self, hand: Entity, grip_value: f32) -> Result<()> {
        self.simulation.world.get::<&mut Hand>(hand)?.grip_value = grip_value;
        self.tick(1);
        Ok(())
    }

    fn position(&self, entity: Entity) -> Result<Vec3> {
        Ok(self
            .simulation
            .world
            .get::<&GlobalTransform>(entity)?
            .translation())
    }

    fn tick(&mut self, frames: usize) {
        for _ in 0..frames {
            self.simulation.update(DELTA_TIME);
            self.frame += 1;
        }
        debug!("Frame {}", self.frame);
    }
}
