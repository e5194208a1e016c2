use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use wiry::camera::{CameraController, CameraMove};
use wiry::colors;
use wiry::math::vec3::Vec3;
use wiry::math::vec4::Vec4;
use wiry::pipeline::render_scene;
use wiry::render::Renderer;
use wiry::scene::Scene;
use wiry::shape::Shape;
use wiry::view::{ClipBounds, ProjectionKind, ViewParameters};
use wiry::window::{FrameLimiter, Key, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};
use wiry::Model;

#[derive(Parser)]
#[command(name = "wiry", about = "CPU wireframe renderer for JSON scene files")]
struct Args {
    /// Scene JSON file; a built-in demo scene is used when omitted.
    scene: Option<PathBuf>,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: u32,

    /// Render one frame headlessly and write it to this PNG path.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// The demo scene: a small wireframe house, seen in perspective.
fn default_scene() -> Scene {
    let vertices = vec![
        Vec4::point(0.0, 0.0, -30.0),
        Vec4::point(20.0, 0.0, -30.0),
        Vec4::point(20.0, 12.0, -30.0),
        Vec4::point(10.0, 20.0, -30.0),
        Vec4::point(0.0, 12.0, -30.0),
        Vec4::point(0.0, 0.0, -60.0),
        Vec4::point(20.0, 0.0, -60.0),
        Vec4::point(20.0, 12.0, -60.0),
        Vec4::point(10.0, 20.0, -60.0),
        Vec4::point(0.0, 12.0, -60.0),
    ];
    let edges = vec![
        vec![0, 1, 2, 3, 4, 0],
        vec![5, 6, 7, 8, 9, 5],
        vec![0, 5],
        vec![1, 6],
        vec![2, 7],
        vec![3, 8],
        vec![4, 9],
    ];

    Scene {
        view: ViewParameters::new(
            Vec3::new(44.0, 20.0, -16.0),
            Vec3::new(20.0, 20.0, -40.0),
            Vec3::UP,
            ClipBounds::new(-19.0, 5.0, -10.0, 8.0, 12.0, 100.0),
            ProjectionKind::Perspective,
        ),
        models: vec![Model::new(Shape::Generic { vertices, edges })],
    }
}

fn camera_move(key: Key) -> Option<CameraMove> {
    match key {
        Key::A => Some(CameraMove::StrafeLeft),
        Key::D => Some(CameraMove::StrafeRight),
        Key::W => Some(CameraMove::DollyIn),
        Key::S => Some(CameraMove::DollyOut),
        Key::Left => Some(CameraMove::TurnLeft),
        Key::Right => Some(CameraMove::TurnRight),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => default_scene(),
    };
    let mut view = scene.view;
    let models = scene.models;

    if let Some(path) = &args.snapshot {
        let mut renderer = Renderer::new(args.width, args.height);
        let stats = render_scene(&view, &models, args.width, args.height, &mut renderer);
        renderer.save_png(path)?;
        info!(
            "wrote {} ({} of {} segments drawn)",
            path.display(),
            stats.drawn,
            stats.edges
        );
        return Ok(());
    }

    let mut window = Window::new("wiry", args.width, args.height)?;
    let mut renderer = Renderer::new(args.width, args.height);
    let controller = CameraController::default();
    let mut limiter = FrameLimiter::new(&window);

    'running: loop {
        // Input first: the pipeline sees a settled view snapshot per frame.
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h)?;
                    renderer.resize(w, h);
                }
                WindowEvent::Key(key) => {
                    if let Some(movement) = camera_move(key) {
                        controller.apply(&mut view, movement);
                    }
                }
            }
        }

        renderer.clear(colors::BACKGROUND);
        render_scene(
            &view,
            &models,
            renderer.width(),
            renderer.height(),
            &mut renderer,
        );
        window.present(renderer.as_bytes())?;
        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
