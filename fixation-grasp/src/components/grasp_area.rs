use hecs::Entity;

/// The sensor volume around a hand that finds grasp candidates.
///
/// The sensor itself is the hand's [`crate::components::Collider`]; this component remembers what it
/// overlapped last frame so [`crate::systems::proximity_system`] can turn overlaps into enter and
/// exit events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraspArea {
    /// Radius of the sensor ball
    pub radius: f32,
    /// Entities overlapping the sensor when it was last checked
    pub overlapping: Vec<Entity>,
    /// Set while proximity events are suppressed. The next check reconciles the candidate pool with
    /// whatever the sensor overlaps at that point.
    pub needs_resync: bool,
}

impl GraspArea {
    /// A grasp area of the given radius
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }
}
