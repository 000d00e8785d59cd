use glam::Quat;

use crate::components::{Finger, FingerPart, FingerRig};

/// A strategy for moving finger targets towards a grasp pose.
///
/// The grasp state machine doesn't care how poses are generated. It calls [`GraspPolicy::update_pose`]
/// every frame while the hand is open or closing, and stops once the grip has been frozen around an
/// object.
pub trait GraspPolicy: Send + Sync {
    /// Set finger targets for a grip that is `alpha` closed: 0 is fully open, 1 is fully closed
    fn update_pose(&mut self, rig: &mut FingerRig, alpha: f32);

    /// Move on to the next grasp pose
    fn switch_pose(&mut self);

    /// Name of the pose currently in use
    fn current_pose(&self) -> &str;
}

/// How far each finger segment bends in a fully closed grip, in degrees about the joint's X axis.
/// Indexed by [`Finger`], then by [`FingerPart`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraspPose {
    /// A helpful name
    pub name: String,
    /// Closed angle of every segment
    pub closed: [[f32; 3]; 5],
}

impl GraspPose {
    /// Every finger curls in together - a fist around a handle
    pub fn power() -> Self {
        Self {
            name: "power".into(),
            closed: [[100.; 3]; 5],
        }
    }

    /// Thumb and index meet, the other fingers stay mostly open
    pub fn pinch() -> Self {
        Self {
            name: "pinch".into(),
            closed: [
                [40., 60., 50.],
                [60., 70., 40.],
                [15., 10., 5.],
                [10., 10., 5.],
                [10., 5., 5.],
            ],
        }
    }

    /// Fingers curl, the thumb stays out of the way - carrying a bag
    pub fn hook() -> Self {
        Self {
            name: "hook".into(),
            closed: [
                [0., 0., 0.],
                [20., 90., 90.],
                [20., 90., 90.],
                [20., 90., 90.],
                [20., 90., 90.],
            ],
        }
    }

    /// The closed angle of a single segment, in degrees
    pub fn closed_angle(&self, finger: Finger, part: FingerPart) -> f32 {
        self.closed[finger as usize][part as usize]
    }
}

/// The default [`GraspPolicy`]: blends every segment from open towards the closed angle of the
/// current pose. Switching cycles through the poses in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseBlend {
    poses: Vec<GraspPose>,
    current: usize,
}

impl PoseBlend {
    /// Blend between the given poses. An empty list falls back to [`GraspPose::power`].
    pub fn new(mut poses: Vec<GraspPose>) -> Self {
        if poses.is_empty() {
            poses.push(GraspPose::power());
        }
        Self { poses, current: 0 }
    }

    /// The pose fingers are currently closing towards
    pub fn pose(&self) -> &GraspPose {
        &self.poses[self.current]
    }
}

impl Default for PoseBlend {
    fn default() -> Self {
        Self::new(vec![GraspPose::power(), GraspPose::pinch(), GraspPose::hook()])
    }
}

impl GraspPolicy for PoseBlend {
    fn update_pose(&mut self, rig: &mut FingerRig, alpha: f32) {
        let alpha = alpha.clamp(0., 1.);
        let pose = &self.poses[self.current];
        for segment in rig.segments_mut() {
            let angle = pose.closed_angle(segment.finger, segment.part) * alpha;
            segment.target = Quat::from_rotation_x(angle.to_radians());
        }
    }

    fn switch_pose(&mut self) {
        self.current = (self.current + 1) % self.poses.len();
    }

    fn current_pose(&self) -> &str {
        &self.pose().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Handedness;
    use approx::assert_relative_eq;

    #[test]
    pub fn test_blend() {
        let mut rig = FingerRig::new(Handedness::Right);
        let mut policy = PoseBlend::default();

        policy.update_pose(&mut rig, 0.);
        for segment in rig.segments() {
            assert_relative_eq!(segment.target, Quat::IDENTITY);
        }

        policy.update_pose(&mut rig, 0.5);
        let index = rig.segment(Finger::Index, FingerPart::Proximal);
        assert_relative_eq!(
            index.target,
            Quat::from_rotation_x(50_f32.to_radians()),
            epsilon = 0.0001
        );

        // Alpha is clamped
        policy.update_pose(&mut rig, 3.);
        let index = rig.segment(Finger::Index, FingerPart::Proximal);
        assert_relative_eq!(
            index.target,
            Quat::from_rotation_x(100_f32.to_radians()),
            epsilon = 0.0001
        );
    }

    #[test]
    pub fn test_switch_pose() {
        let mut policy = PoseBlend::default();
        assert_eq!(policy.current_pose(), "power");
        policy.switch_pose();
        assert_eq!(policy.current_pose(), "pinch");

        let mut rig = FingerRig::new(Handedness::Left);
        policy.update_pose(&mut rig, 1.);
        let thumb = rig.segment(Finger::Thumb, FingerPart::Intermediate);
        assert_relative_eq!(
            thumb.target,
            Quat::from_rotation_x(60_f32.to_radians()),
            epsilon = 0.0001
        );

        policy.switch_pose();
        policy.switch_pose();
        assert_eq!(policy.current_pose(), "power");
    }

    #[test]
    pub fn test_empty_pose_list() {
        let mut policy = PoseBlend::new(vec![]);
        policy.switch_pose();
        assert_eq!(policy.current_pose(), "power");
    }
}
