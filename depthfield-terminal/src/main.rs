/// Depth Field Maker
///
/// Renders a grayscale depth field of an OBJ mesh as seen from a camera
/// looking at a target point. Nearer surfaces are brighter.
///
/// Examples:
///   depthfield --model cube.obj --output cube.png
///   depthfield --camera "30, 20, 40" --target "0, 0, 0" --view "4, 3"

use clap::Parser;
use depthfield_terminal::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    depthfield_terminal::run(&cli)
}
