//! Example: Load and inspect a texture image.
//!
//! Run with: cargo run --example load_texture -- path/to/image.png

use std::env;

use beam_core::Texture;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_texture <path-to-image-file>");
        println!("\nExample:");
        println!("  cargo run --example load_texture -- checker.png");
        return;
    }

    let path = &args[1];
    println!("Loading texture: {}", path);

    match Texture::load(path) {
        Ok(tex) => {
            println!("\n=== Texture ===");
            println!("Dimensions: {}x{}", tex.width(), tex.height());

            println!("\n--- Corner samples ---");
            for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
                let c = tex.sample(u, v);
                println!(
                    "  ({:.1}, {:.1}) -> ({:.3}, {:.3}, {:.3})",
                    u, v, c.x, c.y, c.z
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading texture: {}", e);
        }
    }
}
