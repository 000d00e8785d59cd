use hecs::World;

use crate::{
    components::{GlobalTransform, Parent},
    Simulation,
};

/// Update global transform with parent system
/// Moves every attached entity along with whatever it is attached to: grasped objects follow their
/// hand, and the follower of a two-hand grasp follows the hand that started it.
pub fn update_global_transform_with_parent_system(simulation: &mut Simulation) {
    update_global_transform_with_parent_system_inner(&mut simulation.world);
}

pub(crate) fn update_global_transform_with_parent_system_inner(world: &mut World) {
    // Views allow random access into the set of attached entities, and the set of roots, without
    // looking up component storage for every entity.
    let mut parents = world.query::<&Parent>();
    let parents = parents.view();

    let mut roots = world.query::<&GlobalTransform>().without::<&Parent>();
    let roots = roots.view();

    // `&Parent` is in this query and excluded from `roots`, so the two never alias a `GlobalTransform`.
    for (_entity, (parent, absolute)) in world.query::<(&Parent, &mut GlobalTransform)>().iter() {
        let mut relative = parent.from_child;
        let mut ancestor = parent.entity;
        while let Some(next) = parents.get(ancestor) {
            relative = next.from_child * relative;
            ancestor = next.entity;
        }

        // An attachment to something that has since been despawned leaves the entity where it is.
        if let Some(root) = roots.get(ancestor) {
            absolute.0 = root.0 * relative;
        }
    }
}
