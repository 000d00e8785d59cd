use crate::grasp_policy::{GraspPolicy, PoseBlend};

/// Component that decides how a hand's fingers should move towards a grasp pose.
/// Added to every hand by [`crate::Simulation::spawn_hand`] with a [`PoseBlend`] policy.
pub struct GripController {
    /// The strategy that sets finger targets
    pub policy: Box<dyn GraspPolicy>,
}

impl GripController {
    /// Drive the fingers with a custom policy
    pub fn new(policy: impl GraspPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }
}

impl Default for GripController {
    fn default() -> Self {
        Self::new(PoseBlend::default())
    }
}

impl std::fmt::Debug for GripController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GripController")
            .field("current_pose", &self.policy.current_pose())
            .finish()
    }
}
