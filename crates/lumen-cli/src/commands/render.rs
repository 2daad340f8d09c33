//! Render command
//!
//! Builds a topology, paints a test pattern into every layer, renders one
//! frame and prints the finalized pixels.

use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use lumen_core::{
    Circle, CircleOptions, Cloud, Context, ContextExt, Filter, Grid, Palette, PaletteCollection,
    Pixel, PixelBuffer, ScatterOptions,
};
use lumen_filter::{Gamma, Quantizer};
use lumen_stack::Stack;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use crate::{RenderArgs, Topology};

pub fn run(args: RenderArgs, verbose: bool) -> Result<()> {
    trace!(topology = ?args.topology, layers = args.layers, "render::run");

    let palettes = palette_collection(&args)?;
    let palette = select_palette(&palettes, args.palette.as_deref())?;
    let context = build_context(&args, palettes)?;

    let mut stack = Stack::new(context.clone(), args.layers).context("Failed to build layer stack")?;
    paint(&mut stack, palette);

    let filters: Vec<Arc<dyn Filter>> = if args.raw {
        Vec::new()
    } else {
        vec![
            Arc::new(Gamma::with_value(context.clone(), args.gamma)) as Arc<dyn Filter>,
            Arc::new(Quantizer::with_steps(context.clone(), args.steps).context("Invalid quantizer")?),
        ]
    };
    let mut pixels = PixelBuffer::with_filters(context.clone(), filters)?;

    info!(
        points = context.point_count(),
        layers = stack.layer_count(),
        palette,
        "Rendering frame"
    );
    if verbose {
        println!(
            "Rendering {} points, {} layers, {} filters",
            context.point_count(),
            stack.layer_count(),
            pixels.filters().len()
        );
    }

    stack.render(&mut pixels, args.intensity)?.finalize()?;

    if args.json {
        print_json(&pixels, args.topology)
    } else {
        print_text(&pixels);
        Ok(())
    }
}

/// Built-in palettes, or a single custom palette from `--colors`.
fn palette_collection(args: &RenderArgs) -> Result<PaletteCollection> {
    if args.colors.is_empty() {
        return Ok(PaletteCollection::builtin());
    }

    let colors = args
        .colors
        .iter()
        .map(|c| super::parse_hex(c))
        .collect::<Result<Vec<_>>>()?;
    let palette = match args.discrete {
        Some(steps) => Palette::discrete(colors, steps),
        None => Palette::new(colors),
    }
    .context("Invalid custom palette")?
    .with_label("custom");

    debug!(%palette, "custom palette");
    Ok(PaletteCollection::from_palettes([palette])?)
}

/// Index of the palette labelled `name`, or 0.
fn select_palette(palettes: &PaletteCollection, name: Option<&str>) -> Result<usize> {
    let Some(name) = name else {
        return Ok(0);
    };
    if let Some(index) = palettes.iter().position(|p| p.label() == Some(name)) {
        return Ok(index);
    }

    let available: Vec<&str> = palettes.iter().filter_map(|p| p.label()).collect();
    bail!("Unknown palette '{}' (available: {})", name, available.join(", "))
}

fn build_context(args: &RenderArgs, palettes: PaletteCollection) -> Result<Arc<dyn Context>> {
    let context: Arc<dyn Context> = match args.topology {
        Topology::Grid => Arc::new(
            Grid::new(args.rows, args.columns)
                .context("Invalid grid")?
                .with_palettes(palettes),
        ),
        Topology::Circle => {
            let options = CircleOptions {
                offset: args.offset,
                ..Default::default()
            };
            Arc::new(
                Circle::with_options(args.points, options)
                    .context("Invalid circle")?
                    .with_palettes(palettes),
            )
        }
        Topology::Cloud => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let options = ScatterOptions {
                distance: args.distance,
                ..Default::default()
            };
            Arc::new(
                Cloud::scatter_with_rng(args.points, options, &mut rng)
                    .context("Failed to scatter points")?
                    .with_palettes(palettes),
            )
        }
    };
    Ok(context)
}

/// Paints a test pattern.
///
/// Layer 0 is a full intensity gradient along x. Every further layer is a
/// dimmer radial glow around the center.
fn paint(stack: &mut Stack, palette: usize) {
    let context = stack.context().clone();
    let (cx, cy) = (context.width() / 2.0, context.height() / 2.0);
    let reach = (cx * cx + cy * cy).sqrt().max(f32::EPSILON);
    let width = context.width().max(f32::EPSILON);

    let mut distances = vec![0.0; context.point_count()];
    context.distance_squared(cx, cy, &mut distances);

    for (k, layer) in stack.layers_mut().iter_mut().enumerate() {
        layer.set_palette(palette);
        let weight = 1.0 / (k + 1) as f32;

        for ((index, x, _), vixel) in context.each_position().zip(layer.iter_mut()) {
            if k == 0 {
                vixel.set_i(1.0).set_q(x / width);
            } else {
                let r = distances[index].sqrt() / reach;
                vixel.set_i((1.0 - r) * weight).set_q(r);
            }
        }
    }
}

fn print_text(pixels: &PixelBuffer) {
    for (index, (pixel, x, y)) in pixels.each_with_position().enumerate() {
        println!("{index:>5}  ({x:.3}, {y:.3})  {pixel}");
    }
}

#[derive(Serialize)]
struct FrameJson<'a> {
    topology: String,
    width: f32,
    height: f32,
    points: Vec<PointJson<'a>>,
}

#[derive(Serialize)]
struct PointJson<'a> {
    index: usize,
    x: f32,
    y: f32,
    pixel: &'a Pixel,
}

fn print_json(pixels: &PixelBuffer, topology: Topology) -> Result<()> {
    let frame = FrameJson {
        topology: format!("{topology:?}").to_lowercase(),
        width: pixels.pixels().width(),
        height: pixels.pixels().height(),
        points: pixels
            .each_with_position()
            .enumerate()
            .map(|(index, (pixel, x, y))| PointJson { index, x, y, pixel })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
