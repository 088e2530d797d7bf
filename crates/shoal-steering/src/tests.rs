//! Unit tests for shoal-steering.

#[cfg(test)]
mod helpers {
    use glam::Vec3;
    use shoal_agent::{AgentInit, AgentStore, AgentStoreBuilder, AgentTunables};

    pub fn tunables() -> AgentTunables {
        AgentTunables {
            perception_radius:        10.0,
            max_perception_angle_deg: 120.0,
            separation_radius:        2.0,
            avoidance_range:          4.0,
            min_speed:                1.0,
            max_speed:                5.0,
        }
    }

    /// Agents given as `(position, velocity)`, all facing `+Z`.
    pub fn store(agents: &[(Vec3, Vec3)]) -> AgentStore {
        AgentStoreBuilder::new()
            .agents(agents.iter().map(|&(position, velocity)| AgentInit {
                position,
                forward: Vec3::Z,
                velocity,
                tunables: tunables(),
            }))
            .build()
            .unwrap()
    }
}

// ── Steer rule ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod steer {
    use glam::Vec3;

    use crate::steer_force;

    #[test]
    fn zero_direction_is_no_force() {
        assert_eq!(steer_force(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 5.0, 2.0), Vec3::ZERO);
    }

    #[test]
    fn unclamped_force_is_desired_minus_velocity() {
        let f = steer_force(Vec3::new(10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 2.0, 3.0);
        assert!((f - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn ten_times_cap_clamps_to_cap() {
        // Desired velocity 10 from rest with a cap of 1.
        let f = steer_force(Vec3::Y, Vec3::ZERO, 10.0, 1.0);
        assert!((f.length() - 1.0).abs() < 1e-6);
        assert!(f.normalize().dot(Vec3::Y) > 0.999_999);
    }

    #[test]
    fn never_exceeds_cap() {
        for i in 0..50 {
            let a = i as f32;
            let dir = Vec3::new(a.sin(), (a * 0.3).cos(), a.cos() - 0.5);
            let vel = Vec3::new(-a.cos(), a.sin(), 2.0) * 3.0;
            assert!(steer_force(dir, vel, 5.0, 2.5).length() <= 2.5 + 1e-5);
        }
    }

    #[test]
    fn zero_cap_is_zero_force() {
        assert_eq!(steer_force(Vec3::X, Vec3::ZERO, 5.0, 0.0), Vec3::ZERO);
    }
}

// ── Clear-direction search ────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use glam::Vec3;
    use shoal_core::{ObstacleClass, SweepFallback};
    use shoal_spatial::{NoObstacles, ObstacleFieldBuilder, ObstacleQuery};

    use crate::ClearDirectionSearch;

    /// Every ray is blocked; counts the probes.
    #[derive(Default)]
    struct Enclosed {
        casts: AtomicUsize,
    }

    impl ObstacleQuery for Enclosed {
        fn cast(&self, _: Vec3, _: Vec3, _: f32, _: ObstacleClass) -> bool {
            self.casts.fetch_add(1, Ordering::Relaxed);
            true
        }
    }

    #[test]
    fn step_counts() {
        let s = |step_deg| ClearDirectionSearch { step_deg, fallback: SweepFallback::Reverse }.steps();
        assert_eq!(s(30.0), 6);
        assert_eq!(s(45.0), 4);
        assert_eq!(s(25.0), 7);
        assert_eq!(s(180.0), 1);
    }

    #[test]
    fn open_water_returns_first_candidate() {
        let dir = ClearDirectionSearch::default().find(Vec3::ZERO, Vec3::Z, 5.0, ObstacleClass::ALL, &NoObstacles);
        // +right of +Z is +X; rotated 30° toward it.
        let expected = Vec3::new(0.5, 0.0, 3f32.sqrt() / 2.0);
        assert!((dir - expected).length() < 1e-5, "got {dir}");
    }

    #[test]
    fn blocked_right_turns_left() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_box(Vec3::new(0.2, -10.0, 0.0), Vec3::new(10.0, 10.0, 10.0), ObstacleClass::ALL).unwrap();
        let field = b.build();

        let dir = ClearDirectionSearch::default().find(Vec3::ZERO, Vec3::Z, 5.0, ObstacleClass::ALL, &field);
        let expected = Vec3::new(-0.5, 0.0, 3f32.sqrt() / 2.0);
        assert!((dir - expected).length() < 1e-5, "got {dir}");
        assert!(!field.cast(Vec3::ZERO, dir, 5.0, ObstacleClass::ALL));
    }

    #[test]
    fn fallback_policies() {
        let reverse = ClearDirectionSearch { step_deg: 30.0, fallback: SweepFallback::Reverse };
        let forward = ClearDirectionSearch { step_deg: 30.0, fallback: SweepFallback::Forward };
        let walls = Enclosed::default();
        assert_eq!(reverse.find(Vec3::ZERO, Vec3::X, 5.0, ObstacleClass::ALL, &walls), -Vec3::X);
        assert_eq!(forward.find(Vec3::ZERO, Vec3::X, 5.0, ObstacleClass::ALL, &walls), Vec3::X);
    }

    #[test]
    fn exhausted_sweep_probes_four_rays_per_step() {
        let walls = Enclosed::default();
        ClearDirectionSearch::default().find(Vec3::ZERO, Vec3::Z, 5.0, ObstacleClass::ALL, &walls);
        assert_eq!(walls.casts.load(Ordering::Relaxed), 6 * 4);
    }

    #[test]
    fn deterministic() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::new(1.0, 0.5, 3.0), 1.5, ObstacleClass::ALL).unwrap();
        b.add_sphere(Vec3::new(-1.0, 0.0, 3.0), 1.5, ObstacleClass::ALL).unwrap();
        let field = b.build();
        let search = ClearDirectionSearch { step_deg: 15.0, fallback: SweepFallback::Reverse };

        let first = search.find(Vec3::ZERO, Vec3::Z, 6.0, ObstacleClass::ALL, &field);
        for _ in 0..10 {
            assert_eq!(search.find(Vec3::ZERO, Vec3::Z, 6.0, ObstacleClass::ALL, &field), first);
        }
    }

    #[test]
    fn vertical_forward_has_valid_basis() {
        let dir = ClearDirectionSearch::default().find(Vec3::ZERO, Vec3::Y, 5.0, ObstacleClass::ALL, &NoObstacles);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        let angle = dir.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees();
        assert!((angle - 30.0).abs() < 1e-3, "angle {angle}");
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use glam::Vec3;
    use shoal_core::{AgentId, ObstacleClass, SteeringConfig};
    use shoal_spatial::{NoObstacles, ObstacleFieldBuilder};

    use super::helpers::store;
    use crate::{SteeringEngine, SteeringError};

    fn engine() -> SteeringEngine {
        SteeringEngine::new(SteeringConfig::default()).unwrap().recording_forces(true)
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SteeringConfig { align_strength: -1.0, ..SteeringConfig::default() };
        assert!(matches!(SteeringEngine::new(config), Err(SteeringError::Config(_))));
    }

    #[test]
    fn forces_off_by_default() {
        let e = SteeringEngine::new(SteeringConfig::default()).unwrap();
        let agents = store(&[(Vec3::ZERO, Vec3::Z)]);
        assert!(e.compute(AgentId(0), &agents, &[], &NoObstacles).forces.is_none());
    }

    #[test]
    fn single_neighbor_scenario() {
        let agents = store(&[(Vec3::ZERO, Vec3::Z), (Vec3::new(0.0, 0.0, 5.0), Vec3::X)]);
        let s = engine().compute(AgentId(0), &agents, &[AgentId(1)], &NoObstacles);
        let f = s.forces.unwrap();

        assert_eq!(s.visible, 1);
        assert_eq!(f.cohesion, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(f.alignment, Vec3::X);
        assert_eq!(f.separation, Vec3::ZERO);
        assert_eq!(f.separating, 0);
        assert!(!s.avoiding);
    }

    #[test]
    fn lone_agent_has_zero_acceleration() {
        let agents = store(&[(Vec3::new(3.0, 1.0, -2.0), Vec3::new(0.0, 0.0, 3.0))]);
        let s = engine().compute(AgentId(0), &agents, &[], &NoObstacles);
        assert_eq!(s.acceleration, Vec3::ZERO);
        assert_eq!(s.visible, 0);
    }

    #[test]
    fn separation_only_inside_radius() {
        let eps = 0.01;
        let outside = store(&[(Vec3::ZERO, Vec3::Z), (Vec3::new(0.0, 0.0, 2.0 + eps), Vec3::Z)]);
        let inside = store(&[(Vec3::ZERO, Vec3::Z), (Vec3::new(0.0, 0.0, 2.0 - eps), Vec3::Z)]);

        let out = engine().compute(AgentId(0), &outside, &[AgentId(1)], &NoObstacles);
        assert_eq!(out.forces.unwrap().separation, Vec3::ZERO);

        let inn = engine().compute(AgentId(0), &inside, &[AgentId(1)], &NoObstacles);
        let sep = inn.forces.unwrap().separation;
        assert!(sep.length() > 0.0);
        assert!(sep.z < 0.0, "separation must point away from the neighbor, got {sep}");
        assert_eq!(inn.forces.unwrap().separating, 1);
    }

    #[test]
    fn candidates_are_revalidated() {
        // Self, an agent behind (outside the 120° half-angle), and a distant one.
        let agents = store(&[
            (Vec3::ZERO, Vec3::Z),
            (Vec3::new(0.0, 0.0, -3.0), Vec3::Z),
            (Vec3::new(0.0, 0.0, 30.0), Vec3::Z),
        ]);
        let s = engine().compute(AgentId(0), &agents, &[AgentId(0), AgentId(1), AgentId(2)], &NoObstacles);
        assert_eq!(s.visible, 0);
        assert_eq!(s.acceleration, Vec3::ZERO);
    }

    #[test]
    fn zero_weights_mean_zero_flocking() {
        let config = SteeringConfig {
            cohere_strength: 0.0,
            align_strength: 0.0,
            separate_strength: 0.0,
            ..SteeringConfig::default()
        };
        let e = SteeringEngine::new(config).unwrap();
        let agents = store(&[(Vec3::ZERO, Vec3::Z), (Vec3::new(0.5, 0.0, 1.0), Vec3::X)]);
        let s = e.compute(AgentId(0), &agents, &[AgentId(1)], &NoObstacles);
        assert_eq!(s.acceleration, Vec3::ZERO);
        assert_eq!(s.visible, 1);
    }

    #[test]
    fn each_force_respects_cap() {
        let agents = store(&[
            (Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0)),
            (Vec3::new(0.5, 0.0, 1.0), Vec3::new(-5.0, 0.0, 0.0)),
            (Vec3::new(-0.5, 1.0, 1.0), Vec3::new(0.0, -5.0, 0.0)),
        ]);
        let config = SteeringConfig::default();
        let s = engine().compute(AgentId(0), &agents, &[AgentId(1), AgentId(2)], &NoObstacles);
        let bound = config.max_steer_force
            * (config.cohere_strength + config.align_strength + config.separate_strength);
        assert!(s.acceleration.length() <= bound + 1e-4);
    }

    #[test]
    fn obstacle_ahead_triggers_avoidance() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::new(0.0, 0.0, 3.0), 1.0, ObstacleClass::default()).unwrap();
        let field = b.build();
        let agents = store(&[(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0))]);

        let s = engine().compute(AgentId(0), &agents, &[], &field);
        assert!(s.avoiding);
        let clear = s.forces.unwrap().clear_direction.unwrap();
        assert!(clear.dot(Vec3::Z) < 0.999);
        assert!((clear.length() - 1.0).abs() < 1e-5);
        assert!(s.acceleration.length() > 0.0);
        // The lateral push points the same way as the chosen direction.
        assert!(s.acceleration.x * clear.x >= 0.0);
    }

    #[test]
    fn obstacle_of_other_class_ignored() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::new(0.0, 0.0, 3.0), 1.0, ObstacleClass::layer(5)).unwrap();
        let field = b.build();
        let agents = store(&[(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0))]);

        let s = engine().compute(AgentId(0), &agents, &[], &field);
        assert!(!s.avoiding);
        assert_eq!(s.acceleration, Vec3::ZERO);
    }

    #[test]
    fn obstacle_beyond_probe_range_ignored() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::new(0.0, 0.0, 8.0), 1.0, ObstacleClass::default()).unwrap();
        let field = b.build();
        let agents = store(&[(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0))]);
        assert!(!engine().compute(AgentId(0), &agents, &[], &field).avoiding);
    }
}
