use anyhow::Context;
use pvweb_format::{records, Base64Mode, Record};
use pvweb_render::assembler::applied_matrix;
use pvweb_render::GeometryData;

/// Payload text, reading it from a file when given as `@path`.
fn read_payload(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading payload {path}")),
        None => Ok(arg.to_string()),
    }
}

pub fn run(payload: String, mode: Base64Mode, stream: bool) -> anyhow::Result<()> {
    let text = read_payload(&payload)?;
    let bytes = mode.decode(&text).context("unwrapping payload")?;
    if stream {
        let mut failed = 0;
        for (index, result) in records(&bytes).enumerate() {
            match result {
                Ok(record) => print!("[{index}] {}", describe(&record)),
                Err(e) => {
                    failed += 1;
                    println!("[{index}] error: {e}");
                }
            }
        }
        if failed > 0 {
            log::warn!("{failed} record(s) failed to decode");
        }
    } else {
        let record = pvweb_format::decode_record(&bytes).context("decoding record")?;
        print!("{}", describe(&record));
    }
    Ok(())
}

/// Human-readable summary of one record, one line per fact.
pub fn describe(record: &Record) -> String {
    let mut out = String::new();
    match record {
        Record::Lines(g) | Record::Mesh(g) | Record::Points(g) => {
            let matrix = applied_matrix(g);
            let name = format!("{:?}", record.kind());
            let data = GeometryData::from_buffer(name.clone(), g.geometry.clone());
            out.push_str(&format!("{name}\n"));
            out.push_str(&format!("  vertices: {}\n", data.vertex_count()));
            out.push_str(&format!(
                "  indices:  {} ({:?})\n",
                data.primitive().indices.len(),
                data.primitive().kind
            ));
            out.push_str(&format!(
                "  normals:  {}\n",
                if g.geometry.normals.is_some() { "yes" } else { "no" }
            ));
            if let Some((lo, hi)) = data.bounds() {
                out.push_str(&format!("  bounds:   {:?} .. {:?}\n", lo.to_array(), hi.to_array()));
            }
            out.push_str(&format!("  translation: {:?}\n", matrix.w_axis.truncate().to_array()));
        }
        Record::ColorMap(cm) => {
            out.push_str(&format!("ColorMap {:?}\n", cm.title));
            out.push_str(&format!("  stops:    {}\n", cm.colors.len()));
            out.push_str(&format!("  position: {:?}\n", cm.position));
            out.push_str(&format!("  size:     {:?}\n", cm.size));
            out.push_str(&format!("  labels:   {} (orientation {})\n", cm.label_count, cm.orientation));
        }
    }
    out
}
