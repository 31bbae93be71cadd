//! Shared 2D physics world (rapier2d)
//!
//! The walls are static geometry: each side contributes one fixed body with
//! a zero-friction, zero-density segment collider running along the arena
//! boundary. The world itself is owned by the host game and borrowed here
//! for body creation/destruction; stepping happens in the host's fixed
//! timestep loop.

use glam::Vec2;
use rapier2d::prelude::*;

/// All rapier state for the arena simulation.
pub struct PhysicsWorld {
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self {
            // Pong arena: the ball coasts, nothing falls.
            gravity: vector![0.0, 0.0],
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps the simulation by one timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Creates a fixed wall body with an edge collider between two boundary
    /// points. Zero friction and density, matching a hard arena wall.
    pub fn create_wall_body(&mut self, first: Vec2, second: Vec2) -> RigidBodyHandle {
        let body = self.bodies.insert(RigidBodyBuilder::fixed().build());
        let collider = ColliderBuilder::segment(
            point![first.x, first.y],
            point![second.x, second.y],
        )
        .friction(0.0)
        .density(0.0)
        .build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);
        body
    }

    /// Removes a body and every collider attached to it.
    pub fn destroy_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Number of live rigid bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

/// Replaces the wall bodies for both sides: takes and destroys the previous
/// handles (if any), then creates fresh edge colliders along the new
/// boundary segments. Each handle is destroyed through the world that owns
/// it and can never be destroyed twice, since `take` empties the slot first.
pub fn rebuild_wall_bodies(
    world: &mut PhysicsWorld,
    left: &mut Option<RigidBodyHandle>,
    right: &mut Option<RigidBodyHandle>,
    top_left: Vec2,
    top_right: Vec2,
    bottom_left: Vec2,
    bottom_right: Vec2,
) {
    if let Some(handle) = left.take() {
        world.destroy_body(handle);
    }
    if let Some(handle) = right.take() {
        world.destroy_body(handle);
    }
    *left = Some(world.create_wall_body(top_left, bottom_left));
    *right = Some(world.create_wall_body(top_right, bottom_right));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wall_body_is_fixed_with_segment_collider() {
        let mut world = PhysicsWorld::new();
        let handle = world.create_wall_body(Vec2::new(-1.0, 5.0), Vec2::new(-1.0, -5.0));

        let body = world.bodies.get(handle).unwrap();
        assert!(body.is_fixed());
        assert_eq!(body.colliders().len(), 1);

        let collider = world.colliders.get(body.colliders()[0]).unwrap();
        let segment = collider.shape().as_segment().unwrap();
        assert_eq!(segment.a, point![-1.0, 5.0]);
        assert_eq!(segment.b, point![-1.0, -5.0]);
        assert_eq!(collider.friction(), 0.0);
    }

    #[test]
    fn test_destroy_removes_body_and_collider() {
        let mut world = PhysicsWorld::new();
        let handle = world.create_wall_body(Vec2::ZERO, Vec2::ONE);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.colliders.len(), 1);

        world.destroy_body(handle);
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.colliders.len(), 0);
    }

    #[test]
    fn test_rebuild_replaces_prior_handles() {
        let mut world = PhysicsWorld::new();
        let mut left = None;
        let mut right = None;

        rebuild_wall_bodies(
            &mut world,
            &mut left,
            &mut right,
            Vec2::new(-1.0, 5.0),
            Vec2::new(1.0, 5.0),
            Vec2::new(-1.0, -5.0),
            Vec2::new(1.0, -5.0),
        );
        let first_left = left.unwrap();
        assert_eq!(world.body_count(), 2);

        rebuild_wall_bodies(
            &mut world,
            &mut left,
            &mut right,
            Vec2::new(-2.0, 6.0),
            Vec2::new(2.0, 6.0),
            Vec2::new(-2.0, -6.0),
            Vec2::new(2.0, -6.0),
        );
        assert_eq!(world.body_count(), 2);
        assert_ne!(left.unwrap(), first_left);
        assert!(world.bodies.get(first_left).is_none());
    }

    #[test]
    fn test_step_after_rebuild_does_not_panic() {
        let mut world = PhysicsWorld::new();
        let mut left = None;
        let mut right = None;
        rebuild_wall_bodies(
            &mut world,
            &mut left,
            &mut right,
            Vec2::new(-1.0, 5.0),
            Vec2::new(1.0, 5.0),
            Vec2::new(-1.0, -5.0),
            Vec2::new(1.0, -5.0),
        );
        for _ in 0..10 {
            world.step();
        }
        assert_eq!(world.body_count(), 2);
    }

    proptest! {
        // Resizing any number of times never leaks bodies or colliders.
        #[test]
        fn rebuild_never_leaks(
            resizes in prop::collection::vec(
                (-50.0f32..50.0, -50.0f32..50.0, -50.0f32..50.0, -50.0f32..50.0),
                1..20,
            ),
        ) {
            let mut world = PhysicsWorld::new();
            let mut left = None;
            let mut right = None;

            for (lx, rx, ty, by) in resizes {
                rebuild_wall_bodies(
                    &mut world,
                    &mut left,
                    &mut right,
                    Vec2::new(lx, ty),
                    Vec2::new(rx, ty),
                    Vec2::new(lx, by),
                    Vec2::new(rx, by),
                );
                prop_assert_eq!(world.body_count(), 2);
                prop_assert_eq!(world.colliders.len(), 2);
            }
        }
    }
}
