use approx::{assert_abs_diff_eq, assert_relative_eq};
use phys2d_engine::forces::{
    create_drag, create_newtonian_gravity, create_one_sided_gravity, create_physics_collision, create_spring,
    ForceContext,
};
use phys2d_engine::{Body, BodyHandle, Color, Polygon, Real, Scene, Vector2, INFINITE_MASS};

fn ball(center: Vector2, radius: Real, mass: Real) -> Body {
    Body::new(Polygon::circle(center, radius, 20), mass, Color::BLUE).unwrap()
}

fn speed(scene: &Scene, handle: BodyHandle) -> Real {
    scene.get_body(handle).unwrap().velocity().length()
}

#[test]
fn test_body_tick_integration() {
    let mut body = ball(Vector2::zero(), 1.0, 2.0);
    body.set_velocity(Vector2::new(1.0, 0.0));

    // Forces are scaled by dt, impulses are not
    body.add_force(Vector2::new(4.0, 0.0));
    body.add_impulse(Vector2::new(0.0, 2.0));
    body.tick(0.5);

    assert_relative_eq!(body.velocity(), Vector2::new(2.0, 1.0), epsilon = 1e-12);
    // Displacement uses the average of the old and new velocity
    assert_relative_eq!(body.centroid(), Vector2::new(0.75, 0.25), epsilon = 1e-12);
    assert_relative_eq!(body.polygon().centroid(), body.centroid(), epsilon = 1e-9);

    // Accumulators are cleared after each tick
    assert!(body.force().is_zero());
    assert!(body.impulse().is_zero());
    body.tick(0.5);
    assert_relative_eq!(body.velocity(), Vector2::new(2.0, 1.0), epsilon = 1e-12);
}

#[test]
fn test_body_rejects_bad_mass() {
    let shape = Polygon::square(Vector2::zero(), 1.0);
    assert!(Body::new(shape.clone(), 0.0, Color::RED).is_err());
    assert!(Body::new(shape.clone(), -1.0, Color::RED).is_err());
    assert!(Body::new(shape.clone(), Real::NAN, Color::RED).is_err());
    assert!(Body::new(shape, INFINITE_MASS, Color::RED).is_ok());
}

#[test]
fn test_immovable_body_ignores_forces() {
    let mut wall = Body::new(Polygon::rectangle(0.0, 0.0, 1.0, 10.0), INFINITE_MASS, Color::BLACK).unwrap();
    assert!(wall.is_immovable());

    wall.add_force(Vector2::new(1e9, 0.0));
    wall.add_impulse(Vector2::new(0.0, -1e9));
    wall.tick(1.0);

    assert!(wall.velocity().is_zero());
    assert_relative_eq!(wall.centroid(), Vector2::new(0.5, 5.0), epsilon = 1e-12);
}

#[test]
fn test_body_rotation_about_centroid() {
    let mut body = Body::new(Polygon::rectangle(0.0, 0.0, 4.0, 2.0), 1.0, Color::GREEN).unwrap();
    let centroid = body.centroid();
    let size = body.size();

    body.set_rotation(std::f64::consts::FRAC_PI_2);
    body.set_rotation(std::f64::consts::PI);

    assert_relative_eq!(body.angle(), std::f64::consts::PI);
    assert_relative_eq!(body.polygon().centroid(), centroid, epsilon = 1e-9);
    assert_relative_eq!(body.polygon().max_distance_from_centroid(), size, epsilon = 1e-9);
    // A half turn maps the rectangle onto itself with the corners swapped
    assert_abs_diff_eq!(body.polygon().vertices()[0], Vector2::new(4.0, 2.0), epsilon = 1e-9);
}

#[test]
fn test_circular_orbit_is_stable() {
    let g = 1.0;
    let star_mass = 1000.0;
    let radius = 100.0;

    let mut scene = Scene::new();
    let star = scene.add_body(ball(Vector2::zero(), 5.0, star_mass));
    let planet = scene.add_body(ball(Vector2::new(radius, 0.0), 1.0, 1.0));
    create_one_sided_gravity(&mut scene, g, planet, star).unwrap();

    // Speed for a circular orbit
    let orbit_speed = (g * star_mass / radius).sqrt();
    scene.get_body_mut(planet).unwrap().set_velocity(Vector2::new(0.0, orbit_speed));

    let period = 2.0 * std::f64::consts::PI * radius / orbit_speed;
    let dt = 0.01;
    let steps = (period / dt) as usize;

    for _ in 0..steps {
        scene.tick(dt);
        let distance = scene.get_body(planet).unwrap().centroid().length();
        assert_relative_eq!(distance, radius, max_relative = 0.01);
    }

    // The star is not pulled by one-sided gravity
    assert!(scene.get_body(star).unwrap().velocity().is_zero());

    // After a full period the planet is back near its start
    let position = scene.get_body(planet).unwrap().centroid();
    assert!(position.distance(&Vector2::new(radius, 0.0)) < 0.05 * radius);
}

#[test]
fn test_mutual_gravity_conserves_momentum() {
    let mut scene = Scene::new();
    let a = scene.add_body(ball(Vector2::new(-20.0, 0.0), 1.0, 3.0));
    let b = scene.add_body(ball(Vector2::new(20.0, 0.0), 1.0, 1.0));
    create_newtonian_gravity(&mut scene, 50.0, a, b).unwrap();

    for _ in 0..100 {
        scene.tick(0.01);
    }

    let body_a = scene.get_body(a).unwrap();
    let body_b = scene.get_body(b).unwrap();
    assert!(body_a.velocity().x > 0.0);
    assert!(body_b.velocity().x < 0.0);

    let momentum = body_a.velocity() * body_a.mass() + body_b.velocity() * body_b.mass();
    assert_abs_diff_eq!(momentum, Vector2::zero(), epsilon = 1e-12);
}

#[test]
fn test_gravity_ignores_immovable_anchor() {
    let mut scene = Scene::new();
    let anchor = scene.add_body(Body::new(Polygon::square(Vector2::zero(), 1.0), INFINITE_MASS, Color::BLACK).unwrap());
    let moon = scene.add_body(ball(Vector2::new(50.0, 0.0), 1.0, 1.0));
    create_newtonian_gravity(&mut scene, 1.0, moon, anchor).unwrap();
    create_one_sided_gravity(&mut scene, 1.0, moon, anchor).unwrap();

    for _ in 0..10 {
        scene.tick(0.01);
    }

    let anchor = scene.get_body(anchor).unwrap();
    assert!(anchor.velocity().is_zero());
    assert_eq!(anchor.centroid(), Vector2::zero());

    let moon = scene.get_body(moon).unwrap();
    assert!(moon.velocity().is_zero());
    assert_relative_eq!(moon.centroid(), Vector2::new(50.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_immovable_body_survives_infinite_force() {
    let mut wall = Body::new(Polygon::square(Vector2::zero(), 1.0), INFINITE_MASS, Color::BLACK).unwrap();
    wall.set_velocity(Vector2::new(1.0, 0.0));
    wall.add_force(Vector2::new(Real::INFINITY, 0.0));
    wall.add_impulse(Vector2::new(Real::NEG_INFINITY, Real::INFINITY));
    wall.tick(0.5);

    // Only its own velocity moves it
    assert_eq!(wall.velocity(), Vector2::new(1.0, 0.0));
    assert_relative_eq!(wall.centroid(), Vector2::new(0.5, 0.0), epsilon = 1e-12);
    assert!(wall.force().is_zero());
    assert!(wall.impulse().is_zero());
}

#[test]
fn test_gravity_is_skipped_at_close_range() {
    let mut scene = Scene::new();
    let a = scene.add_body(ball(Vector2::zero(), 1.0, 1.0));
    let b = scene.add_body(ball(Vector2::new(4.0, 0.0), 1.0, 1.0));
    create_newtonian_gravity(&mut scene, 1000.0, a, b).unwrap();

    scene.tick(0.1);
    assert!(scene.get_body(a).unwrap().velocity().is_zero());
    assert!(scene.get_body(b).unwrap().velocity().is_zero());
}

#[test]
fn test_two_body_forces_need_distinct_bodies() {
    let mut scene = Scene::new();
    let a = scene.add_body(ball(Vector2::zero(), 1.0, 1.0));
    assert!(create_spring(&mut scene, 1.0, a, a).is_err());
    assert!(create_newtonian_gravity(&mut scene, 1.0, a, a).is_err());
    assert_eq!(scene.force_creator_count(), 0);
}

#[test]
fn test_drag_decays_speed() {
    let gamma = 0.5;
    let dt = 0.001;

    let mut scene = Scene::new();
    let body = scene.add_body(ball(Vector2::zero(), 1.0, 1.0));
    scene.get_body_mut(body).unwrap().set_velocity(Vector2::new(10.0, 0.0));
    create_drag(&mut scene, gamma, body).unwrap();

    let mut last_speed = speed(&scene, body);
    for _ in 0..2000 {
        scene.tick(dt);
        let current = speed(&scene, body);
        assert!(current < last_speed);
        last_speed = current;
    }

    // Exponential decay: v(t) = v0 * exp(-gamma * t / m)
    assert_relative_eq!(last_speed, 10.0 * (-gamma * 2.0).exp(), max_relative = 1e-3);

    // Keep going until the body has all but stopped
    for _ in 0..4000 {
        scene.tick(0.01);
        let current = speed(&scene, body);
        assert!(current < last_speed);
        last_speed = current;
    }
    assert!(last_speed < 1e-3);
}

#[test]
fn test_spring_conserves_energy() {
    let k = 22.0;
    let mut scene = Scene::new();
    let a = scene.add_body(ball(Vector2::zero(), 0.5, 40.0));
    let b = scene.add_body(ball(Vector2::new(10.0, 20.0), 0.5, 7.3));
    create_spring(&mut scene, k, a, b).unwrap();

    let energy = |scene: &Scene| {
        let body_a = scene.get_body(a).unwrap();
        let body_b = scene.get_body(b).unwrap();
        let kinetic = 0.5 * body_a.mass() * body_a.velocity().length_squared()
            + 0.5 * body_b.mass() * body_b.velocity().length_squared();
        let stretch = body_a.centroid().distance_squared(&body_b.centroid());
        kinetic + 0.5 * k * stretch
    };

    // Half a second stays well inside the first quarter oscillation
    let initial = energy(&scene);
    for _ in 0..5000 {
        let xa = scene.get_body(a).unwrap().centroid().x;
        let xb = scene.get_body(b).unwrap().centroid().x;
        assert!(xa < xb, "bodies crossed: {xa} >= {xb}");
        assert_relative_eq!(energy(&scene), initial, max_relative = 1e-3);
        scene.tick(1e-4);
    }

    // Equal and opposite forces leave the total momentum at zero
    let body_a = scene.get_body(a).unwrap();
    let body_b = scene.get_body(b).unwrap();
    assert_abs_diff_eq!(
        body_a.velocity() * body_a.mass() + body_b.velocity() * body_b.mass(),
        Vector2::zero(),
        epsilon = 1e-9
    );
}

fn head_on(mass_a: Real, mass_b: Real, elasticity: Real) -> (Vector2, Vector2) {
    let mut scene = Scene::new();
    let a = scene.add_body(Body::new(Polygon::square(Vector2::zero(), 1.0), mass_a, Color::RED).unwrap());
    let b = scene.add_body(Body::new(Polygon::square(Vector2::new(3.0, 0.0), 1.0), mass_b, Color::BLUE).unwrap());
    scene.get_body_mut(a).unwrap().set_velocity(Vector2::new(2.0, 0.0));
    create_physics_collision(&mut scene, elasticity, a, b).unwrap();

    for _ in 0..100 {
        scene.tick(0.01);
    }

    (
        scene.get_body(a).unwrap().velocity(),
        scene.get_body(b).unwrap().velocity(),
    )
}

#[test]
fn test_elastic_collision_swaps_equal_masses() {
    let (va, vb) = head_on(1.0, 1.0, 1.0);
    assert_abs_diff_eq!(va, Vector2::zero(), epsilon = 1e-9);
    assert_abs_diff_eq!(vb, Vector2::new(2.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_elastic_collision_unequal_masses() {
    // v1' = (m1 - m2) / (m1 + m2) u1, v2' = 2 m1 / (m1 + m2) u1
    let (va, vb) = head_on(1.0, 3.0, 1.0);
    assert_abs_diff_eq!(va, Vector2::new(-1.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(vb, Vector2::new(1.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_inelastic_collision_moves_together() {
    let (va, vb) = head_on(1.0, 1.0, 0.0);
    assert_abs_diff_eq!(va, Vector2::new(1.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(vb, Vector2::new(1.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_collision_with_immovable_wall() {
    let (va, vb) = head_on(1.0, INFINITE_MASS, 1.0);
    assert_abs_diff_eq!(va, Vector2::new(-2.0, 0.0), epsilon = 1e-9);
    assert!(vb.is_zero());
}

#[test]
fn test_collision_between_immovable_bodies() {
    let (va, vb) = head_on(INFINITE_MASS, INFINITE_MASS, 1.0);
    // The first body keeps its velocity and passes through
    assert_eq!(va, Vector2::new(2.0, 0.0));
    assert!(vb.is_zero());
}

#[test]
fn test_closure_force_creator() {
    let mut scene = Scene::new();
    let body = scene.add_body(ball(Vector2::zero(), 1.0, 2.0));
    scene
        .add_bodies_force_creator(&[body], |ctx: &mut ForceContext<'_>| {
            let body = ctx.body_mut(0);
            let weight = Vector2::new(0.0, -9.8) * body.mass();
            body.add_force(weight);
        })
        .unwrap();

    for _ in 0..100 {
        scene.tick(0.01);
    }

    // Averaging old and new velocity integrates constant acceleration exactly
    let body = scene.get_body(body).unwrap();
    assert_relative_eq!(body.velocity(), Vector2::new(0.0, -9.8), epsilon = 1e-9);
    assert_relative_eq!(body.centroid(), Vector2::new(0.0, -4.9), epsilon = 1e-9);
}
