//! Demonstration of elevation banding

use std::collections::HashMap;

use planet_texture::*;

fn main() {
    println!("Biome Banding Demo\n");

    let classifier = BiomeClassifier::default();

    println!("Colors across the elevation range:");
    println!("{:-<60}", "");
    for i in 0..=10 {
        let elevation = i as f32 / 10.0;
        let [r, g, b] = classifier.color_for(elevation);
        println!(
            "{:5.2} -> {:10} #{:02x}{:02x}{:02x}",
            elevation,
            format!("{:?}", classifier.band_for(elevation)),
            r,
            g,
            b
        );
    }

    println!("\n{:-<60}", "");
    println!("Band coverage of a 256x128 planet:");
    println!("{:-<60}", "");

    let params = TextureParamsBuilder::new()
        .seed(42)
        .resolution(256)
        .unwrap()
        .build()
        .unwrap();
    let maps = generate(&params).expect("Failed to generate surface maps");

    let mut counts = HashMap::new();
    for &intensity in maps.relief.as_raw() {
        let band = classifier.band_for(intensity as f32 / 255.0);
        *counts.entry(band).or_insert(0usize) += 1;
    }

    let total = maps.relief.as_raw().len();
    for band in [
        SurfaceBand::Water,
        SurfaceBand::Sand,
        SurfaceBand::Grass,
        SurfaceBand::Highland,
    ] {
        let count = counts.get(&band).copied().unwrap_or(0);
        let percentage = (count as f32 / total as f32) * 100.0;
        println!("{:10} : {:6} pixels ({:5.1}%)", format!("{:?}", band), count, percentage);
    }
}
