use resources::sprite_art;
use std::env;

const USAGE: &str = "Usage: spritebmp [OPTIONS] [output]

Arguments:
  output    Destination bitmap file (default: sprite.bmp)

Options:
  -h, --help     Show this help message and exit.

Examples:
  spritebmp
  spritebmp ./assets/sprite.bmp

Description:
  Writes a 48 x 64 uncompressed 24-bit sample sprite that the display demo
  loads at start-up.";

fn main() -> anyhow::Result<()> {
    if let Err(e) =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
    {
        eprintln!("logger already initialised: {e}");
    }

    let args = env::args().collect::<Vec<String>>();
    let output = match args.get(1).map(String::as_str) {
        Some("-h") | Some("--help") => {
            println!("{USAGE}");
            return Ok(());
        }
        Some(path) => path,
        None => "sprite.bmp",
    };
    sprite_art::write_sample_sprite(std::path::Path::new(output))
}
