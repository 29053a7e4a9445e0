/// Terminal front-end for depth field rendering
use std::io::{stdout, Write};

use anyhow::Context as _;
use crossterm::terminal;
use depthfield_core::render;

pub mod cli;
pub mod preview;

pub use cli::Cli;
pub use preview::AsciiPreview;

/// Preview width used when the terminal size is unknown (e.g. piped output).
const FALLBACK_COLUMNS: u16 = 80;

/// Render the requested depth field, then save it and/or preview it.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let request = cli.request();
    let image = render(&request)
        .with_context(|| format!("cannot make a depth field from {}", request.mesh_path.display()))?;

    if let Some(path) = &cli.output {
        image
            .save(path)
            .with_context(|| format!("cannot write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    if cli.wants_preview() {
        let columns = cli
            .columns
            .or_else(|| terminal::size().ok().map(|(width, _)| width))
            .unwrap_or(FALLBACK_COLUMNS);
        let preview = AsciiPreview::from_image(&image, usize::from(columns));

        let mut stdout = stdout();
        preview.draw(&mut stdout)?;
        stdout.flush()?;
    }

    Ok(())
}
