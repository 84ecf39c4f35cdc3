use bevy::prelude::*;
use bevy::math::primitives::{Sphere, Cuboid, Cylinder};

use crate::simulation::world::SimulationWorld;

/// Bevy resource wrapping the world so the simulation core stays bevy-free
#[derive(Resource)]
struct ViewerWorld(SimulationWorld);

/// Component tagging each sphere with its particle index into the swarm
#[derive(Component)]
struct ParticleIndex(pub usize);

/// Tags the bottle and its wall
#[derive(Component)]
struct BottleMesh;

/// Physics rate, independent of the render frame rate
const STEP_HZ: f64 = 100.0;

/// Visual radius of a particle
const PARTICLE_RADIUS: f32 = 0.05;

/// Open a window showing the bottle, click to flip / pause
pub fn run_3d(world: SimulationWorld) {
    log::info!("run_3d: starting viewer with {} particles", world.swarm.len());

    App::new()
        .insert_resource(ViewerWorld(world))
        .insert_resource(ClearColor(Color::srgb(1.0, 1.0, 1.0)))
        .insert_resource(Time::<Fixed>::from_hz(STEP_HZ))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bottle Flipping Simulation with Water".into(),
                resolution: (1200.0, 800.0).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_3d)
        .add_systems(FixedUpdate, physics_step_3d)
        .add_systems(Update, (toggle_on_click, sync_transforms_3d))
        .run();
}

/// Startup system: camera, light, floor, bottle and one sphere per particle
fn setup_3d(mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    world: Res<ViewerWorld>,
) {
    let world = &world.0;

    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 3.0, 9.0)
            .looking_at(Vec3::new(0.0, 1.5, 0.0), Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 2_000_000.0,
            range: 50.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(4.0, 8.0, 6.0),
        ..Default::default()
    });

    // Floor slab
    let floor = &world.floor;
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(floor.width as f32, 2.0 * floor.half_height as f32, floor.depth as f32).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 1.0, 0.0), // green
            ..Default::default()
        }),
        transform: Transform::from_xyz(0.0, floor.y as f32, 0.0),
        ..Default::default()
    });

    // Bottle body and a slightly wider wall, both translucent blue
    let bottle = &world.bottle;
    let shells = [
        (bottle.radius, 0.3),
        (bottle.radius + bottle.wall_thickness, 0.5),
    ];
    for (radius, alpha) in shells {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Cylinder::new(radius as f32, bottle.height as f32).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgba(0.0, 0.0, 1.0, alpha),
                    alpha_mode: AlphaMode::Blend,
                    ..Default::default()
                }),
                transform: Transform::from_xyz(
                    bottle.position.x as f32,
                    bottle.position.y as f32,
                    bottle.position.z as f32,
                ),
                ..Default::default()
            },
            BottleMesh,
        ));
    }

    // One sphere per particle
    let particle_mesh = meshes.add(Sphere::new(PARTICLE_RADIUS).mesh());
    let particle_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.0, 1.0, 1.0), // cyan
        ..Default::default()
    });
    for (i, p) in world.swarm.positions().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: particle_mesh.clone(),
                material: particle_material.clone(),
                transform: Transform::from_xyz(p.x as f32, p.y as f32, p.z as f32),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
}

/// Fixed-rate physics step
fn physics_step_3d(mut world: ResMut<ViewerWorld>) {
    world.0.step();
}

/// Left click toggles run / pause; consumed at the next physics step
fn toggle_on_click(buttons: Res<ButtonInput<MouseButton>>, mut world: ResMut<ViewerWorld>) {
    if buttons.just_pressed(MouseButton::Left) {
        world.0.request_toggle();
    }
}

/// Copy the latest snapshot into the scene
fn sync_transforms_3d(
    world: Res<ViewerWorld>,
    mut bottles: Query<&mut Transform, (With<BottleMesh>, Without<ParticleIndex>)>,
    mut particles: Query<(&ParticleIndex, &mut Transform), Without<BottleMesh>>,
) {
    let snap = world.0.snapshot();

    let [x, y, z] = snap.bottle_position;
    let [qx, qy, qz, qw] = snap.bottle_orientation;
    for mut transform in &mut bottles {
        transform.translation = Vec3::new(x as f32, y as f32, z as f32);
        transform.rotation = Quat::from_xyzw(qx as f32, qy as f32, qz as f32, qw as f32);
    }

    for (ParticleIndex(i), mut transform) in &mut particles {
        if let Some([px, py, pz]) = snap.particles.get(*i) {
            transform.translation = Vec3::new(*px as f32, *py as f32, *pz as f32);
        }
    }
}
