use glam::Vec2;
use rein2d::ecs::prelude::*;
use rein2d::{contact_lines, PhysicsConfig, PhysicsWorld};

/// Simulated seconds per scene.
const SCENE_SECONDS: u32 = 5;
/// Frame time of the simulated host loop.
const FRAME_TIME: f64 = 1.0 / 60.0;

fn spawn_scene() -> Vec<Shape> {
    let mut shapes = vec![
        // Floor and a tilted ramp
        Shape::rectangle(Transform2D::identity(), 20.0, 1.0).with_mass(0.0),
        Shape::rectangle(
            Transform2D {
                position: Vec2::new(-4.0, 3.0),
                rotation: -0.4,
                ..Transform2D::identity()
            },
            6.0,
            0.5,
        )
        .with_mass(0.0),
    ];

    for i in 0..6 {
        let x = -6.0 + i as f32 * 0.7;
        let position = Vec2::new(x, 8.0 + i as f32);
        let shape = if i % 2 == 0 {
            Shape::circle(Transform2D::from_position(position), 0.4)
        } else {
            Shape::rectangle(Transform2D::from_position(position), 0.8, 0.6).with_mass(2.0)
        };
        shapes.push(shape.with_restitution(0.4));
    }
    shapes
}

/// Drive a standalone physics world with a variable host frame rate.
fn run_world() -> anyhow::Result<()> {
    let mut physics = PhysicsWorld::new(PhysicsConfig::default())?;
    for shape in spawn_scene() {
        physics.add_shape(shape);
    }
    physics.set_collect_contacts(true);

    let frames = SCENE_SECONDS * 60;
    for frame in 0..frames {
        // Every tenth frame hitches to exercise catch-up.
        let dt = if frame % 10 == 9 { FRAME_TIME * 3.0 } else { FRAME_TIME };
        let ticks = physics.step(dt);

        if frame % 60 == 0 {
            let lines = contact_lines(physics.contacts());
            log::info!(
                "world frame {frame}: {ticks} ticks, {} contacts, {} line vertices",
                physics.contacts().len(),
                lines.len()
            );
        }
    }

    for (i, shape) in physics.shapes().iter().enumerate() {
        log::info!("world body {i}: {shape} at {:.3}", shape.center());
    }
    Ok(())
}

/// Drive the same scene as ECS entities.
fn run_ecs() -> anyhow::Result<()> {
    let mut config = PhysicsConfig::default();
    config.set_relaxation_count(10)?;

    let mut world = hecs::World::new();
    let bodies: Vec<hecs::Entity> = spawn_scene()
        .into_iter()
        .map(|shape| spawn_body(&mut world, shape))
        .collect();

    let mut contacts = Vec::new();
    for frame in 0..SCENE_SECONDS * 60 {
        contacts.clear();
        let count = physics_system(&mut world, &config, FRAME_TIME as f32, Some(&mut contacts));
        if frame % 60 == 0 {
            log::info!("ecs frame {frame}: {count} bodies, {} contacts", contacts.len());
        }
    }

    for entity in bodies {
        let transform = world.get::<&Transform2D>(entity)?;
        log::info!(
            "ecs body {entity:?}: position {:.3} rotation {:.3}",
            transform.position,
            transform.rotation
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run_world()?;
    run_ecs()
}
