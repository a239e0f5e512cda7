use log::info;
use phys2d_engine::forces::{create_drag, create_one_sided_destructive_collision, create_newtonian_gravity};
use phys2d_engine::{Body, Color, Polygon, Scene, Vector2};

const G: f64 = 1.0;
const STEPS_PER_REPORT: usize = 500;
const DT: f64 = 0.01;

/// Two moons orbit a planet while drag slowly pulls one of them in; the
/// moon is destroyed when it reaches the surface.
///
/// Run with `RUST_LOG=debug` to see the cleanup pass and `RUST_LOG=trace`
/// for collision latch transitions.
fn main() -> phys2d_engine::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut scene = Scene::new();
    let planet_mass = 5000.0;
    let planet = scene.add_body(Body::new(
        Polygon::circle(Vector2::zero(), 10.0, 40),
        planet_mass,
        Color::BLUE,
    )?);

    let mut moons = Vec::new();
    for (radius, name) in [(60.0, "near"), (120.0, "far")] {
        let speed = (G * planet_mass / radius).sqrt();
        let mut moon = Body::with_info(
            Polygon::circle(Vector2::new(radius, 0.0), 2.0, 12),
            1.0,
            Color::WHITE.shade(),
            name,
        )?;
        moon.set_velocity(Vector2::new(0.0, speed));
        let handle = scene.add_body(moon);
        create_newtonian_gravity(&mut scene, G, handle, planet)?;
        create_one_sided_destructive_collision(&mut scene, handle, planet)?;
        moons.push(handle);
    }
    create_drag(&mut scene, 0.05, moons[0])?;

    for report in 1..=20 {
        for _ in 0..STEPS_PER_REPORT {
            scene.tick(DT);
            while let Some(handle) = scene.events_mut().next_removed_body() {
                info!("body {:?} was destroyed at t = {:.2}", handle, scene.time());
            }
        }

        info!("report {report}: t = {:.2}, {} bodies", scene.time(), scene.body_count());
        for (_, body) in scene.bodies() {
            if let Some(name) = body.info::<&str>() {
                info!(
                    "  {name} moon at {} (distance {:.1})",
                    body.centroid(),
                    body.centroid().distance(&scene.get_body(planet)?.centroid())
                );
            }
        }
    }

    Ok(())
}
