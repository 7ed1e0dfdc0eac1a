//! Example: Generate planet textures and write them as PNG
//!
//! Usage: `cargo run --example generate_textures -- [seed] [output_dir]`

use std::path::PathBuf;
use std::time::Instant;

use planet_texture::*;

fn main() {
    println!("Planet Texture Generation Example");
    println!("=================================\n");

    let mut args = std::env::args().skip(1);
    let seed: u32 = args
        .next()
        .map(|s| s.parse().expect("seed must be an unsigned integer"))
        .unwrap_or(42);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let params = TextureParamsBuilder::new()
        .seed(seed)
        .resolution(1024)
        .unwrap()
        .octaves(6)
        .unwrap()
        .build()
        .unwrap();

    println!("Parameters:");
    println!("  Seed: {}", params.seed);
    println!("  Size: {}x{}", params.width(), params.height());
    println!("  Scale: {}", params.scale);
    println!("  Octaves: {}", params.octaves);
    println!(
        "  Levels: water {} / sand {} / grass {}",
        params.water_level, params.sand_level, params.grass_level
    );
    println!();

    let start = Instant::now();
    let textures = PlanetTextures::generate(&params).expect("Failed to generate textures");
    println!("Generated in {:?}\n", start.elapsed());

    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");
    let map_path = out_dir.join(format!("planet_{}_map.png", seed));
    let bump_path = out_dir.join(format!("planet_{}_bump.png", seed));

    textures
        .map
        .image()
        .save(&map_path)
        .expect("Failed to write color map");
    textures
        .bump_map
        .image()
        .save(&bump_path)
        .expect("Failed to write relief map");

    println!("Wrote {} ({:?})", map_path.display(), textures.map.color_space());
    println!("Wrote {} ({:?})", bump_path.display(), textures.bump_map.color_space());
}
