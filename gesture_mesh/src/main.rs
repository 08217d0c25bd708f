//! gesture_mesh: interactive entry point.

use gesture_mesh::{run, AppConfig, DetectorSource};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Gesture Mesh: hand-controlled 3D mesh viewer        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Mesh:     {}", cfg.mesh_path.display());
    match &cfg.detector {
        DetectorSource::Simulated => {
            println!("  Hands:    simulated (mouse = right hand, arrows = left hand)");
            println!("            hold left button / Space to close the right / left fist");
            println!("            1 / 2 hide or show the left / right hand");
        }
        DetectorSource::Subprocess { program, .. } => println!("  Hands:    external detector `{}`", program),
        DetectorSource::Leap => println!("  Hands:    LeapMotion controller"),
    }
    println!("  Press Q in the camera window to quit.");
    println!();

    match run(cfg) {
        Ok(reason) => log::info!("Finished: {:?}", reason),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
