mod app;

use std::env;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

#[show_image::main]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Default values.
    let mut asset_path = String::from("assets");

    let args: Vec<String> = env::args().collect();
    for i in 1..args.len() {
        match args[i].as_str() {
            "-p" => {
                if let Some(path) = args.get(i + 1) {
                    asset_path = path.clone();
                }
            }
            _ => (),
        }
    }

    let params = app::Params {
        width: WIDTH,
        height: HEIGHT,
        asset_path,
    };

    app::run(params)?;

    return Ok(());
}
