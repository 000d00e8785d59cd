#![allow(missing_docs)]
pub mod collision;
pub mod finger_drives;
pub mod grasping;
pub mod grip;
pub mod physics;
pub mod proximity;
pub mod update_global_transform_with_parent;

pub use collision::collision_system;
pub use finger_drives::{bind_finger_drives, finger_drives_system};
pub use grasping::{detach, maintain_pose, try_one_hand_grasp, try_two_hands_grasp};
pub use grip::{grip_system, switch_pose, update_pose};
pub use physics::physics_system;
pub use proximity::{on_proximity_enter, on_proximity_exit, proximity_system};
pub use update_global_transform_with_parent::update_global_transform_with_parent_system;
