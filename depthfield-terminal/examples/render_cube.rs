/// Example: Render the built-in cube and preview it in the terminal
///
/// Usage: cargo run --example render_cube -- [x,y,z camera position]

use std::env;

use depthfield_core::{render_mesh, Mesh, RenderSettings};
use depthfield_terminal::AsciiPreview;
use nalgebra::Point3;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut settings = RenderSettings::default();
    if let Some(arg) = env::args().nth(1) {
        let coords: Vec<f64> = arg
            .split(',')
            .map(|part| part.trim().parse())
            .collect::<Result<_, _>>()?;
        anyhow::ensure!(coords.len() == 3, "expected x,y,z, got {arg}");
        settings.camera = Point3::new(coords[0], coords[1], coords[2]);
    }

    println!("Rendering cube from {:?}", settings.camera.coords.as_slice());
    let image = render_mesh(Mesh::cube(2.0), &settings)?;

    AsciiPreview::from_image(&image, 80).draw(&mut std::io::stdout())?;
    Ok(())
}
