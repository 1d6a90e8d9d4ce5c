//! Writer für ControlPath-XML.

use crate::core::ControlPath;
use anyhow::Result;

/// Aktuelle Format-Version im `version`-Attribut.
pub const FORMAT_VERSION: u32 = 1;

/// Schreibt einen Pfad als XML-Dokument.
///
/// Punkte werden als parallele Listen `<x>`, `<y>`, `<z>` abgelegt, Zahlen in
/// kürzester verlustfreier Darstellung.
pub fn write_control_path_xml(path: &ControlPath) -> Result<String> {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n");
    output.push_str(&format!(
        "<ControlPath version=\"{}\" closed=\"{}\" space=\"{}\" controlMode=\"{}\" autoControlLength=\"{}\" globalTwistAngle=\"{}\" flipNormals=\"{}\">\n",
        FORMAT_VERSION,
        path.is_closed(),
        escape_xml(path.space().as_str()),
        escape_xml(path.control_mode().as_str()),
        format_float(path.auto_control_length()),
        format_float(path.global_normal_angle()),
        path.flip_normals(),
    ));

    let points = path.points();
    output.push_str("    <points>\n");
    output.push_str(&format!(
        "        <x>{}</x>\n",
        join_floats(points.iter().map(|p| p.x))
    ));
    output.push_str(&format!(
        "        <y>{}</y>\n",
        join_floats(points.iter().map(|p| p.y))
    ));
    output.push_str(&format!(
        "        <z>{}</z>\n",
        join_floats(points.iter().map(|p| p.z))
    ));
    output.push_str("    </points>\n");

    output.push_str(&format!(
        "    <anchorTwistAngles>{}</anchorTwistAngles>\n",
        join_floats(path.anchor_twist_angles().iter().copied())
    ));
    output.push_str("</ControlPath>\n");

    log::debug!(
        "ControlPath-XML geschrieben: {} Punkte, {} Anker",
        points.len(),
        path.num_anchors()
    );
    Ok(output)
}

fn join_floats(values: impl Iterator<Item = f32>) -> String {
    values.map(format_float).collect::<Vec<_>>().join(",")
}

/// Kürzeste Darstellung, die beim Einlesen exakt denselben `f32` ergibt.
fn format_float(value: f32) -> String {
    format!("{}", value)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
