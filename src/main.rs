use std::error::Error;
use std::time::Instant;

use log::{error, info};
use texraster::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RenderConfig::from_env()?.with_args(std::env::args().skip(1));
    let (Some(mesh_path), Some(texture_path)) = (config.mesh_path.clone(), config.texture_path.clone()) else {
        error!("usage: texraster <mesh.obj> <texture.png>");
        return Err("missing asset paths".into());
    };

    let model = Model::load("model", &mesh_path, &texture_path).inspect_err(|e| error!("{e}"))?;

    let mut window = Window::new(&config.title, config.window_width, config.window_height)?;
    let mut engine = Engine::new(&config)?;
    let mut camera = OrbitCamera::default();
    let mut fps = FpsCounter::new();

    let model_matrix = Mat4::translation(0.0, -0.5, 0.0);
    let start = Instant::now();

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => info!("window resized to {w}x{h}"),
            WindowEvent::None => {}
        }

        camera.set_elapsed(start.elapsed());
        let projection = Projection::for_surface(
            config.fov_degrees,
            window.current_width(),
            window.current_height(),
            config.z_near,
            config.z_far,
        );
        let transforms = TransformSet::new(model_matrix, camera.view_matrix(), projection.matrix());

        engine.render_frame(&mut window, &model, &transforms)?;

        if let Some(frames) = fps.tick() {
            window.set_title(&format!("{} | {} FPS", config.title, frames))?;
        }
    }

    Ok(())
}
