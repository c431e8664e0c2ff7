use std::path::Path;

use anyhow::Context;
use pvweb_render::{CanvasNode, LoadSummary, ReaderOptions, SceneDescription, SceneReader};
use serde_json::{json, Value};

use crate::cli::ReportFormat;

pub fn run(scene: &Path, options: ReaderOptions, format: ReportFormat) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(scene).with_context(|| format!("reading {}", scene.display()))?;
    let description = SceneDescription::from_json(&text).with_context(|| format!("parsing {}", scene.display()))?;

    let [width, height] = options.canvas;
    let mut reader = SceneReader::new(options);
    let summary = reader
        .load_scene(description, CanvasNode::new(width, height))
        .context("loading scene")?;

    match format {
        ReportFormat::Text => print!("{}", text_report(&reader, summary)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&json_report(&reader, summary))?),
    }
    Ok(())
}

fn layer_indices(reader: &SceneReader) -> Vec<usize> {
    let mut layers: Vec<usize> = reader.registry().iter().map(|(layer, _)| layer).collect();
    layers.sort_unstable();
    layers
}

pub fn json_report(reader: &SceneReader, summary: LoadSummary) -> Value {
    let layers: Vec<Value> = layer_indices(reader)
        .into_iter()
        .filter_map(|layer| reader.renderer(layer).map(|r| (layer, r)))
        .map(|(layer, r)| {
            let cam = r.camera();
            let actors: Vec<Value> = r
                .actors()
                .iter()
                .map(|a| {
                    json!({
                        "kind": format!("{:?}", a.kind),
                        "vertices": a.geometry.vertex_count(),
                        "indices": a.geometry.primitive().indices.len(),
                        "bin": a.material.bin_number(),
                        "opacity": a.opacity(),
                    })
                })
                .collect();
            json!({
                "layer": layer,
                "size": r.size().to_array(),
                "resizable": r.is_resizable(),
                "background": r.background(),
                "camera": {
                    "viewAngle": cam.view_angle_degrees(),
                    "position": cam.position().to_array(),
                    "focalPoint": cam.focal_point().to_array(),
                    "viewUp": cam.view_up().to_array(),
                },
                "actors": actors,
            })
        })
        .collect();

    let legends: Vec<Value> = reader
        .legends()
        .iter()
        .map(|l| {
            json!({
                "title": l.title,
                "position": l.layout.position,
                "width": l.layout.width,
                "height": l.layout.height,
                "colors": l.lookup_table.entries.len(),
                "range": l.lookup_table.range(),
            })
        })
        .collect();

    json!({
        "layers": layers,
        "legends": legends,
        "loaded": summary.loaded,
        "skipped": summary.skipped,
    })
}

pub fn text_report(reader: &SceneReader, summary: LoadSummary) -> String {
    let mut out = String::new();
    for layer in layer_indices(reader) {
        let Some(r) = reader.renderer(layer) else {
            continue;
        };
        let cam = r.camera();
        out.push_str(&format!(
            "layer {layer}: {}x{}{}  view {}deg  eye {:?} -> {:?}\n",
            r.size().x,
            r.size().y,
            if r.is_resizable() { "" } else { " (fixed)" },
            cam.view_angle_degrees(),
            cam.position().to_array(),
            cam.focal_point().to_array(),
        ));
        for a in r.draw_order() {
            out.push_str(&format!(
                "  {:?}: {} vertices, {} indices, bin {}, opacity {:.2}\n",
                a.kind,
                a.geometry.vertex_count(),
                a.geometry.primitive().indices.len(),
                a.material.bin_number(),
                a.opacity(),
            ));
        }
    }
    for l in reader.legends() {
        out.push_str(&format!(
            "legend {:?}: at ({}, {}) {}x{}, {} colors\n",
            l.title,
            l.layout.position[0],
            l.layout.position[1],
            l.layout.width,
            l.layout.height,
            l.lookup_table.entries.len(),
        ));
    }
    out.push_str(&format!("objects: {} loaded, {} skipped\n", summary.loaded, summary.skipped));
    out
}
