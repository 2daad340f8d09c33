//! Palettes command
//!
//! Lists the built-in palette collection with evenly spaced samples.

use anyhow::Result;
use lumen_core::PaletteCollection;
use serde::Serialize;

use crate::PalettesArgs;

#[derive(Serialize)]
struct PaletteJson {
    index: usize,
    label: Option<String>,
    samples: Vec<String>,
}

pub fn run(args: PalettesArgs) -> Result<()> {
    let palettes = PaletteCollection::builtin();
    let listing: Vec<PaletteJson> = palettes
        .iter()
        .enumerate()
        .map(|(index, palette)| PaletteJson {
            index,
            label: palette.label().map(str::to_owned),
            samples: sample_positions(args.samples)
                .map(|pos| palette.color_at(pos).to_string())
                .collect(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for entry in &listing {
        println!(
            "{:>2}  {:<12} {}",
            entry.index,
            entry.label.as_deref().unwrap_or("-"),
            entry.samples.join(" ")
        );
    }
    Ok(())
}

/// `n` evenly spaced positions over `[0, 1]`.
fn sample_positions(n: usize) -> impl Iterator<Item = f32> {
    let last = n.saturating_sub(1).max(1) as f32;
    (0..n).map(move |i| i as f32 / last)
}
