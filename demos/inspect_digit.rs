//! Prints a normalized digit dumped with `--dump-tiff` as ASCII art, plus a
//! few statistics useful when comparing against MNIST samples.

use anyhow::{Context, bail};

const SHADES: &[u8] = b" .:-=+*#%@";

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "digit.tiff".to_string());
    let file = std::fs::File::open(&path).with_context(|| format!("opening {path}"))?;
    let mut decoder = tiff::decoder::Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;

    println!("Image: {}x{} pixels", width, height);

    let tiff::decoder::DecodingResult::U8(data) = decoder.read_image()? else {
        bail!("{path} is not an 8-bit grayscale image");
    };

    for row in data.chunks(width as usize) {
        let line: String = row
            .iter()
            .map(|&v| SHADES[v as usize * (SHADES.len() - 1) / 255] as char)
            .collect();
        println!("|{line}|");
    }

    let total = data.len() as f64;
    let ink = data.iter().filter(|&&v| v > 10).count();
    let saturated = data.iter().filter(|&&v| v == u8::MAX).count();
    let mass: f64 = data.iter().map(|&v| v as f64 / 255.0).sum();

    println!("\nInk pixels: {} ({:.1}%)", ink, ink as f64 / total * 100.0);
    println!("Saturated: {} ({:.1}%)", saturated, saturated as f64 / total * 100.0);
    println!("Mean intensity: {:.4}", mass / total);

    if mass > 0.0 {
        let (mut cx, mut cy) = (0.0, 0.0);
        for (i, &v) in data.iter().enumerate() {
            let val = v as f64 / 255.0;
            cx += (i % width as usize) as f64 * val;
            cy += (i / width as usize) as f64 * val;
        }
        println!("Centre of mass: ({:.2}, {:.2})", cx / mass, cy / mass);
    }

    Ok(())
}
