use crossterm::{
    cursor::{Hide, MoveTo, Show},
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{size, Clear, ClearType},
    ExecutableCommand, QueueableCommand,
};
use phys2d_engine::core::FrameClock;
use phys2d_engine::forces::{create_physics_collision, ForceContext};
use phys2d_engine::{Body, BodyHandle, Color, Polygon, Scene, Vector2, INFINITE_MASS};
use std::io::{stdout, Stdout, Write};
use std::thread::sleep;
use std::time::{Duration, Instant};

const FRAME_DURATION: Duration = Duration::from_millis(33); // ~30 FPS
const SIMULATION_DURATION: f64 = 15.0; // seconds
const MAX_STEP: f64 = 0.05;
const GRAVITY: f64 = 20.0;
const NUM_BALLS: usize = 6;
const BALL_CHARS: [char; 5] = ['●', '○', '◆', '◇', '■'];

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: (color.r * 255.0) as u8,
        g: (color.g * 255.0) as u8,
        b: (color.b * 255.0) as u8,
    }
}

fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> Body {
    Body::new(Polygon::rectangle(x1, y1, x2, y2), INFINITE_MASS, Color::WHITE).expect("walls have infinite mass")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = stdout();
    stdout.execute(Hide)?;

    let (width, height) = size()?;
    let (w, h) = (width as f64, height as f64);

    let mut scene = Scene::new();
    let walls = [
        scene.add_body(wall(0.0, -10.0, w, 0.0)),
        scene.add_body(wall(-10.0, 0.0, 0.0, h * 2.0)),
        scene.add_body(wall(w - 1.0, 0.0, w + 10.0, h * 2.0)),
    ];

    let mut balls: Vec<BodyHandle> = Vec::with_capacity(NUM_BALLS);
    for i in 0..NUM_BALLS {
        let x = (i as f64 + 1.0) * w / (NUM_BALLS as f64 + 1.0);
        let y = h - 3.0 - 2.0 * i as f64;
        let mut body = Body::new(Polygon::circle(Vector2::new(x, y), 1.0, 12), 1.0, Color::rainbow(i * 8))?;
        body.set_velocity(Vector2::new(if i % 2 == 0 { 8.0 } else { -8.0 }, 0.0));
        let handle = scene.add_body(body);

        scene.add_bodies_force_creator(&[handle], |ctx: &mut ForceContext<'_>| {
            let body = ctx.body_mut(0);
            let weight = Vector2::new(0.0, -GRAVITY) * body.mass();
            body.add_force(weight);
        })?;
        for boundary in walls {
            create_physics_collision(&mut scene, 1.0, handle, boundary)?;
        }
        for other in &balls {
            create_physics_collision(&mut scene, 0.9, handle, *other)?;
        }
        balls.push(handle);
    }

    let mut clock = FrameClock::new();
    let start_time = Instant::now();

    while start_time.elapsed().as_secs_f64() < SIMULATION_DURATION {
        let frame_start = Instant::now();
        scene.tick(clock.tick().min(MAX_STEP));

        stdout.queue(Clear(ClearType::All))?;
        draw_floor(&mut stdout, height.saturating_sub(1), width)?;

        for (index, handle) in balls.iter().enumerate() {
            let Ok(ball) = scene.get_body(*handle) else {
                continue;
            };
            let position = ball.centroid();
            // Terminal rows grow downwards
            let screen_x = position.x.round();
            let screen_y = (h - 1.0 - position.y).round();
            if screen_x < 0.0 || screen_y < 0.0 || screen_x >= w || screen_y >= h {
                continue;
            }

            stdout
                .queue(MoveTo(screen_x as u16, screen_y as u16))?
                .queue(SetForegroundColor(term_color(ball.color())))?
                .queue(Print(BALL_CHARS[index % BALL_CHARS.len()]))?
                .queue(ResetColor)?;
        }
        stdout.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            sleep(FRAME_DURATION - elapsed);
        }
    }

    stdout.execute(Show)?;
    stdout.execute(MoveTo(0, height.saturating_sub(1)))?;

    Ok(())
}

fn draw_floor(stdout: &mut Stdout, y_pos: u16, width: u16) -> std::io::Result<()> {
    stdout.queue(SetForegroundColor(TermColor::White))?;
    for x in 0..width {
        stdout.queue(MoveTo(x, y_pos))?.queue(Print("▬"))?;
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
