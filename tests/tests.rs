use bottleflip::simulation::vector::{clamp_to_sphere, normalize};
use bottleflip::{
    Bottle, ChargeInteraction, ContactState, Floor, ForceSet, LinearDrag, NVec3, Parameters,
    Particle, ParticleSwarm, RunState, Sampler, ScenarioConfig, SimError, SimulationWorld,
    Transition, UniformGravity,
};

/// Build a two-particle swarm separated along the x-axis, at rest
pub fn two_particle_swarm(dist: f64, q1: f64, q2: f64) -> ParticleSwarm {
    let m = test_params().particle_mass;
    ParticleSwarm::from_particles(vec![
        Particle::at_rest([-dist / 2.0, 0.0, 0.0].into(), m, q1),
        Particle::at_rest([dist / 2.0, 0.0, 0.0].into(), m, q2),
    ])
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters::default()
}

/// Pair interaction alone, no drag or gravity
pub fn interaction_only(p: &Parameters) -> ForceSet {
    ForceSet::new().with(ChargeInteraction {
        k: p.k,
        min_range: p.interaction_min,
        max_range: p.interaction_max,
    })
}

/// Bottle centered on the origin, big enough that the clamp never fires
pub fn roomy_bottle() -> Bottle {
    let mut b = Bottle::resting_on(&Floor::default(), 100.0, 200.0, 0.0);
    b.position = NVec3::zeros();
    b
}

/// Standard bottle whose bottom sits `gap` above the default floor
pub fn bottle_above_floor(gap: f64) -> Bottle {
    let mut b = Bottle::resting_on(&Floor::default(), 0.5, 2.0, 0.01);
    b.position.y += gap;
    b
}

pub fn seeded_world(seed: u64) -> SimulationWorld {
    let params = Parameters { seed, ..test_params() };
    let floor = Floor::default();
    let bottle = Bottle::resting_on(&floor, 0.5, 2.0, 0.01);
    SimulationWorld::new(params, bottle, floor).unwrap()
}

fn assert_contained(world: &SimulationWorld) {
    let center = world.bottle.position;
    for p in &world.swarm.particles {
        let d = (p.position - center).norm();
        assert!(d <= world.bottle.radius + 1e-9, "particle escaped: |x - c| = {}", d);
    }
}

// ==================================================================================
// Vector and sampler tests
// ==================================================================================

#[test]
fn normalize_guards_zero_vector() {
    assert!(matches!(normalize(&NVec3::zeros()), Err(SimError::DegenerateVector(_))));
    assert!(matches!(normalize(&NVec3::new(1e-14, 0.0, 0.0)), Err(SimError::DegenerateVector(_))));

    let n = normalize(&NVec3::new(3.0, 4.0, 0.0)).unwrap();
    assert!((n - NVec3::new(0.6, 0.8, 0.0)).norm() < 1e-12);
}

#[test]
fn clamp_projects_outside_points_onto_sphere() {
    let center = NVec3::new(1.0, 2.0, 3.0);

    let inside = center + NVec3::new(0.1, 0.0, 0.0);
    assert_eq!(clamp_to_sphere(inside, &center, 0.5), inside);

    let outside = center + NVec3::new(0.0, 3.0, 4.0);
    let clamped = clamp_to_sphere(outside, &center, 0.5);
    assert!(((clamped - center).norm() - 0.5).abs() < 1e-12);
    assert!((clamped - (center + NVec3::new(0.0, 0.3, 0.4))).norm() < 1e-12);
}

#[test]
fn sampler_uniform_stays_in_range() {
    let mut s = Sampler::seeded(1);
    for _ in 0..10_000 {
        let x = s.uniform(5.0, 15.0);
        assert!((5.0..15.0).contains(&x));
    }
    assert_eq!(s.uniform(2.0, 2.0), 2.0);

    // spans rand cannot sample fall back to the lower bound
    assert_eq!(s.uniform(-1e308, 1e308), -1e308);
    assert_eq!(s.uniform(f64::NEG_INFINITY, 1.0), f64::NEG_INFINITY);
    assert_eq!(s.uniform(0.0, f64::NAN), 0.0);
}

#[test]
fn sampler_normal_matches_mean_and_std() {
    let mut s = Sampler::seeded(2);
    let n = 50_000;
    let draws: Vec<f64> = (0..n).map(|_| s.normal(3.0, 2.0)).collect();

    assert!(draws.iter().all(|x| x.is_finite()));

    let mean = draws.iter().sum::<f64>() / n as f64;
    let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

    assert!((mean - 3.0).abs() < 0.05, "mean {}", mean);
    assert!((var.sqrt() - 2.0).abs() < 0.05, "std {}", var.sqrt());
}

#[test]
fn sampler_unit_vectors_have_unit_length() {
    let mut s = Sampler::seeded(3);
    for _ in 0..1000 {
        assert!((s.random_unit_vector().norm() - 1.0).abs() < 1e-12);
    }
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn interaction_obeys_third_law() {
    let p = test_params();
    let swarm = two_particle_swarm(0.7, 1e-4, -2e-4);
    let forces = interaction_only(&p);

    let mut out = vec![NVec3::zeros(); 2];
    forces.accumulate(&swarm.particles, &mut out);

    assert!(out[0].norm() > 0.0);
    assert!((out[0] + out[1]).norm() < 1e-15, "forces not equal and opposite: {:?}", out);

    // along the separation axis
    let r = swarm.particles[1].position - swarm.particles[0].position;
    assert!(out[0].cross(&r).norm() < 1e-15);
}

#[test]
fn like_charges_repel_inside_range() {
    let p = test_params();
    let swarm = two_particle_swarm(0.5, 1e-4, 1e-4);
    let forces = interaction_only(&p);

    let mut out = vec![NVec3::zeros(); 2];
    forces.accumulate(&swarm.particles, &mut out);

    let r = swarm.particles[1].position - swarm.particles[0].position;
    assert!(out[0].dot(&r) < 0.0, "particle 0 is not pushed away from particle 1");

    // k q q (1/d² - 3/d³) = 1e-4 * (4 - 24)
    assert!((out[0].norm() - 2e-3).abs() < 1e-12);
}

#[test]
fn interaction_ignores_pairs_out_of_range() {
    let p = test_params();
    let forces = interaction_only(&p);
    let mut out = vec![NVec3::zeros(); 2];

    for dist in [0.005, 1.5, 2.0] {
        let swarm = two_particle_swarm(dist, 1e-4, 1e-4);
        forces.accumulate(&swarm.particles, &mut out);
        assert_eq!(out[0], NVec3::zeros(), "distance {} should not interact", dist);
        assert_eq!(out[1], NVec3::zeros());
    }
}

#[test]
fn drag_and_gravity_terms() {
    let g = NVec3::new(0.0, -9.8, 0.0);
    let forces = ForceSet::new()
        .with(LinearDrag { coefficient: 10.0 })
        .with(UniformGravity { g });

    let mut particle = Particle::at_rest(NVec3::zeros(), 0.01, 0.0);
    particle.momentum = NVec3::new(1.0, 0.0, 0.0);

    let mut out = vec![NVec3::zeros(); 1];
    forces.accumulate(std::slice::from_ref(&particle), &mut out);

    let expected = NVec3::new(-10.0, -0.098, 0.0);
    assert!((out[0] - expected).norm() < 1e-12);
}

// ==================================================================================
// Swarm tests
// ==================================================================================

#[test]
fn initialized_particles_are_inside_bottle() {
    for seed in [1, 2, 3, 42] {
        let world = seeded_world(seed);
        assert_eq!(world.swarm.len(), 35);
        assert_contained(&world);
    }
}

#[test]
fn velocity_is_momentum_over_mass() {
    let mut world = seeded_world(5);
    world.toggle();

    for _ in 0..50 {
        world.step();
        for p in &world.swarm.particles {
            assert!((p.velocity() * p.mass - p.momentum).norm() < 1e-12);
        }
    }
}

#[test]
fn forces_come_from_previous_tick_snapshot() {
    let p = test_params();
    let interaction = ChargeInteraction {
        k: p.k,
        min_range: p.interaction_min,
        max_range: p.interaction_max,
    };
    let forces = interaction_only(&p);

    let m = p.particle_mass;
    let mut swarm = ParticleSwarm::from_particles(vec![
        Particle::at_rest(NVec3::new(0.0, 0.0, 0.0), m, 1e-4),
        Particle::at_rest(NVec3::new(0.3, 0.0, 0.0), m, 1e-4),
        Particle::at_rest(NVec3::new(0.0, 0.4, 0.1), m, -1e-4),
    ]);
    let before: Vec<NVec3> = swarm.positions().copied().collect();

    // expected forces from the untouched starting positions
    let expected: Vec<NVec3> = (0..3)
        .map(|i| {
            (0..3)
                .filter(|&j| j != i)
                .filter_map(|j| {
                    let r = before[j] - before[i];
                    let (qi, qj) = (swarm.particles[i].charge, swarm.particles[j].charge);
                    interaction.pair_force(qi, qj, &r)
                })
                .fold(NVec3::zeros(), |acc, f| acc + f)
        })
        .collect();

    swarm.step(p.dt, &forces, &roomy_bottle());

    for (particle, f) in swarm.particles.iter().zip(expected.iter()) {
        assert!((particle.force - f).norm() < 1e-12, "force {:?} != {:?}", particle.force, f);
    }
}

#[test]
fn like_charges_separate_monotonically() {
    let p = test_params();
    let forces = interaction_only(&p);
    let bottle = roomy_bottle();
    let mut swarm = two_particle_swarm(0.5, 1e-4, 1e-4);

    let dist = |s: &ParticleSwarm| (s.particles[1].position - s.particles[0].position).norm();
    let mut prev = dist(&swarm);

    for _ in 0..300 {
        swarm.step(p.dt, &forces, &bottle);
        let d = dist(&swarm);
        if prev < p.interaction_max {
            assert!(d > prev, "distance shrank from {} to {}", prev, d);
        } else {
            assert!(d >= prev);
        }
        prev = d;
    }
    assert!(prev > 0.5);
}

#[test]
fn impulse_sets_bounded_velocities() {
    let mut world = seeded_world(9);
    let mut sampler = Sampler::seeded(10);
    world.swarm.inject_impulse(&mut sampler);

    for p in &world.swarm.particles {
        let v = p.velocity();
        assert!(v.iter().all(|c| c.abs() <= 2.0 + 1e-12), "velocity {:?}", v);
    }
}

#[test]
fn particles_stay_inside_moving_bottle() {
    let mut world = seeded_world(11);
    world.toggle();

    for _ in 0..800 {
        world.step();
        assert_contained(&world);
        for p in &world.swarm.particles {
            assert!(p.position.iter().all(|c| c.is_finite()));
        }
    }
}

// ==================================================================================
// Bottle tests
// ==================================================================================

#[test]
fn free_flight_is_projectile_motion() {
    let p = test_params();
    let floor = Floor::default();
    let mut bottle = bottle_above_floor(20.0);
    let y0 = bottle.position.y;
    let v0 = 5.0;
    bottle.velocity = NVec3::new(0.0, v0, 0.0);

    for n in 1..=50 {
        assert_eq!(bottle.step(p.dt, &p.gravity, &floor), ContactState::Free);
        let t = n as f64 * p.dt;
        let exact = y0 + v0 * t - 4.9 * t * t;
        assert!((bottle.position.y - exact).abs() < 0.03, "t={} y={} exact={}", t, bottle.position.y, exact);
    }
    assert_eq!(bottle.orientation.angle(), 0.0);
    assert_eq!(bottle.position.x, 0.0);
}

#[test]
fn spin_accumulates_orientation() {
    let p = test_params();
    let floor = Floor::default();
    let mut bottle = bottle_above_floor(100.0);
    bottle.angular_velocity = NVec3::new(0.0, 0.0, std::f64::consts::PI);

    for _ in 0..50 {
        bottle.step(p.dt, &p.gravity, &floor);
    }
    assert!((bottle.orientation.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn floor_bounce_loses_energy() {
    let p = test_params();
    let floor = Floor::default();
    let mut bottle = bottle_above_floor(0.001);
    bottle.velocity = NVec3::new(0.0, -3.0, 0.0);
    bottle.angular_velocity = NVec3::new(4.0, 0.0, 2.0);

    let pre_vy = bottle.velocity.y + p.gravity.y * p.dt;
    let pre_w = bottle.angular_velocity.norm();

    assert_eq!(bottle.step(p.dt, &p.gravity, &floor), ContactState::Bounced);

    assert!(bottle.velocity.y > 0.0);
    assert!((bottle.velocity.y - 0.5 * pre_vy.abs()).abs() < 1e-12);
    assert!(bottle.velocity.y.abs() <= pre_vy.abs());
    assert!(bottle.angular_velocity.norm() <= 0.5 * pre_w + 1e-12);

    // unstuck: bottom exactly on the floor
    assert!((bottle.position.y - bottle.half_height() - floor.top()).abs() < 1e-12);
}

#[test]
fn dropped_bottle_settles() {
    let p = test_params();
    let floor = Floor::default();
    let mut bottle = bottle_above_floor(0.3);
    bottle.angular_velocity = NVec3::new(3.0, 0.0, -2.0);

    let mut settled_at = None;
    for tick in 0..5_000 {
        if bottle.step(p.dt, &p.gravity, &floor) == ContactState::Settled {
            settled_at = Some(tick);
            break;
        }
    }

    assert!(settled_at.is_some(), "bottle never settled");
    assert!(bottle.velocity.norm() < 0.1);
    assert!(bottle.angular_velocity.norm() < 0.1);
}

#[test]
fn flip_impulse_ranges() {
    let mut sampler = Sampler::seeded(12);
    let mut bottle = bottle_above_floor(0.0);

    for _ in 0..200 {
        bottle.inject_flip_impulse(&mut sampler);
        assert_eq!(bottle.velocity.x, 0.0);
        assert_eq!(bottle.velocity.z, 0.0);
        assert!((5.0..15.0).contains(&bottle.velocity.y));
        assert_eq!(bottle.angular_velocity.y, 0.0);
        assert!((-10.0..10.0).contains(&bottle.angular_velocity.x));
        assert!((-10.0..10.0).contains(&bottle.angular_velocity.z));
    }
}

// ==================================================================================
// Trigger and world tests
// ==================================================================================

#[test]
fn toggle_starts_and_pauses() {
    let mut world = seeded_world(13);
    assert_eq!(world.state(), RunState::Idle);

    assert_eq!(world.toggle(), Transition::Started);
    assert!(world.is_running());
    assert!(world.bottle.velocity.y >= 5.0);

    world.step();
    assert_eq!(world.toggle(), Transition::Paused);
    assert_eq!(world.state(), RunState::Idle);

    // paused: nothing moves, time still advances
    let before = world.snapshot();
    let report = world.step();
    let after = world.snapshot();

    assert_eq!(report.contact, None);
    assert_eq!(before.particles, after.particles);
    assert_eq!(before.bottle_position, after.bottle_position);
    assert!((after.elapsed - before.elapsed - world.parameters.dt).abs() < 1e-12);
}

#[test]
fn requested_toggle_applies_on_next_step() {
    let mut world = seeded_world(14);

    world.request_toggle();
    assert_eq!(world.state(), RunState::Idle);
    let report = world.step();
    assert_eq!(report.state, RunState::Running);
    assert!(report.contact.is_some());

    // two requests before a step cancel out
    world.request_toggle();
    world.request_toggle();
    assert_eq!(world.step().state, RunState::Running);
}

#[test]
fn flip_settles_and_rearms() {
    let mut world = seeded_world(15);
    world.toggle();

    let mut ticks = 0;
    while world.is_running() && ticks < 20_000 {
        world.step();
        ticks += 1;
    }
    assert_eq!(world.state(), RunState::Settled, "still running after {} ticks", ticks);

    // settled steps like idle
    let before = world.snapshot();
    world.step();
    assert_eq!(before.particles, world.snapshot().particles);

    assert_eq!(world.toggle(), Transition::Started);
    assert!(world.is_running());
}

#[test]
fn clock_advances_while_idle() {
    let mut world = seeded_world(16);
    for _ in 0..10 {
        world.step();
    }
    assert_eq!(world.clock.ticks, 10);
    assert!((world.clock.elapsed - 0.1).abs() < 1e-12);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut world = seeded_world(seed);
        world.toggle();
        for _ in 0..200 {
            world.step();
        }
        world.snapshot()
    };

    let a = run(17);
    let b = run(17);
    assert_eq!(a.particles, b.particles);
    assert_eq!(a.bottle_position, b.bottle_position);
    assert_eq!(a.bottle_orientation, b.bottle_orientation);

    let c = run(18);
    assert_ne!(a.particles, c.particles);
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn partial_yaml_fills_defaults() {
    let yaml = "
engine:
  dt: 0.02
  seed: 3
  max_ticks: 500
particles:
  count: 5
";
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.bottle.radius, 0.5);
    assert_eq!(cfg.parameters.k, 10_000.0);

    let world = SimulationWorld::build_scenario(cfg).unwrap();
    assert_eq!(world.swarm.len(), 5);
    assert_eq!(world.parameters.dt, 0.02);
    assert_eq!(world.parameters.seed, 3);
    assert_eq!(world.parameters.max_ticks, 500);

    // standing on the floor by default
    assert!((world.bottle.position.y - world.bottle.half_height() - world.floor.top()).abs() < 1e-12);
}

#[test]
fn empty_yaml_is_the_classic_scene() {
    let cfg: ScenarioConfig = serde_yaml::from_str("{}").unwrap();
    let world = SimulationWorld::build_scenario(cfg).unwrap();

    assert_eq!(world.swarm.len(), 35);
    assert_eq!(world.bottle.position, NVec3::new(0.0, 1.0, 0.0));
    assert_eq!(world.floor.top(), 0.0);
    assert_eq!(world.forces.len(), 3);
    assert_eq!(world.parameters.max_ticks, 20_000);
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut bad_mass = ScenarioConfig::default();
    bad_mass.particles.mass = -1.0;

    let mut bad_dt = ScenarioConfig::default();
    bad_dt.engine.dt = 0.0;

    let mut bad_radius = ScenarioConfig::default();
    bad_radius.bottle.radius = 0.0;

    let mut unstable_drag = ScenarioConfig::default();
    unstable_drag.parameters.drag = 800.0;

    let mut infinite_radius = ScenarioConfig::default();
    infinite_radius.bottle.radius = f64::INFINITY;

    let mut huge_radius = ScenarioConfig::default();
    huge_radius.bottle.radius = 1e308;

    let mut huge_height = ScenarioConfig::default();
    huge_height.bottle.height = f64::MAX;

    let mut infinite_dt = ScenarioConfig::default();
    infinite_dt.engine.dt = f64::INFINITY;
    infinite_dt.parameters.drag = 0.0;

    let mut infinite_mass = ScenarioConfig::default();
    infinite_mass.particles.mass = f64::INFINITY;

    let mut nan_charge = ScenarioConfig::default();
    nan_charge.particles.charge = f64::NAN;

    let mut infinite_k = ScenarioConfig::default();
    infinite_k.parameters.k = f64::INFINITY;

    let mut infinite_gravity = ScenarioConfig::default();
    infinite_gravity.parameters.gravity = [0.0, f64::NEG_INFINITY, 0.0];

    let mut infinite_position = ScenarioConfig::default();
    infinite_position.bottle.position = Some([f64::INFINITY, 1.0, 0.0]);

    let mut infinite_floor = ScenarioConfig::default();
    infinite_floor.floor.y = f64::NEG_INFINITY;

    let cases = [
        bad_mass, bad_dt, bad_radius, unstable_drag,
        infinite_radius, huge_radius, huge_height, infinite_dt, infinite_mass,
        nan_charge, infinite_k, infinite_gravity, infinite_position, infinite_floor,
    ];
    for cfg in cases {
        let err = SimulationWorld::build_scenario(cfg).err();
        assert!(matches!(err, Some(SimError::InvalidConfiguration(_))), "got {:?}", err);
    }
}

#[test]
fn non_finite_yaml_geometry_is_an_error() {
    for yaml in ["bottle: { radius: .inf }", "bottle: { radius: 1.0e308 }", "engine: { dt: .inf }\nparameters: { drag: 0.0 }"] {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        let err = SimulationWorld::build_scenario(cfg).err();
        assert!(matches!(err, Some(SimError::InvalidConfiguration(_))), "{}: got {:?}", yaml, err);
    }
}

#[test]
fn rejection_sampling_gives_up() {
    let mut cfg = ScenarioConfig::default();
    cfg.particles.max_init_attempts = 10;

    match SimulationWorld::build_scenario(cfg).err() {
        Some(SimError::SamplingExhaustion { accepted, requested, attempts }) => {
            assert!(accepted <= 10);
            assert_eq!(requested, 35);
            assert_eq!(attempts, 10);
        }
        other => panic!("expected sampling exhaustion, got {:?}", other),
    }
}
