//! Parser für ControlPath-XML.

use super::writer::FORMAT_VERSION;
use crate::core::{ControlMode, ControlPath, ControlPathRecord, PathSpace};
use anyhow::bail;
use anyhow::{Context, Result};
use glam::Vec3;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Liest einen Pfad aus einem XML-String.
///
/// Fehlende Attribute bekommen Standardwerte, fehlende Twist-Winkel werden
/// mit 0 ergänzt. Unbekannte Tags werden ignoriert.
pub fn parse_control_path_xml(xml_content: &str) -> Result<ControlPath> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();

    let mut root_seen = false;
    let mut attributes = RootAttributes::default();

    let mut in_points = false;
    let mut current_tag: Option<String> = None;

    let mut points_x = String::new();
    let mut points_y = String::new();
    let mut points_z = String::new();
    let mut twist_raw = String::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if tag == "ControlPath" {
                    root_seen = true;
                    attributes = read_root_attributes(&reader, e)?;
                } else if tag == "points" {
                    in_points = true;
                } else {
                    current_tag = Some(tag.to_string());
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "ControlPath" {
                    root_seen = true;
                    attributes = read_root_attributes(&reader, e)?;
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content()?.into_owned();

                if in_points {
                    match current_tag.as_deref() {
                        Some("x") => points_x.push_str(&text),
                        Some("y") => points_y.push_str(&text),
                        Some("z") => points_z.push_str(&text),
                        _ => {}
                    }
                } else if current_tag.as_deref() == Some("anchorTwistAngles") {
                    twist_raw.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "points" {
                    in_points = false;
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    if !root_seen {
        bail!("Kein <ControlPath>-Element gefunden");
    }
    if let Some(version) = attributes.version {
        if version > FORMAT_VERSION {
            log::warn!(
                "ControlPath-XML Version {} neuer als unterstützt ({})",
                version,
                FORMAT_VERSION
            );
        }
    }

    if points_x.is_empty() || points_y.is_empty() || points_z.is_empty() {
        bail!("Pflichtfelder in <points> fehlen");
    }

    let xs = parse_list::<f32>(&points_x, ',').context("Fehler beim Parsen der X-Koordinaten")?;
    let ys = parse_list::<f32>(&points_y, ',').context("Fehler beim Parsen der Y-Koordinaten")?;
    let zs = parse_list::<f32>(&points_z, ',').context("Fehler beim Parsen der Z-Koordinaten")?;
    if xs.len() != ys.len() || xs.len() != zs.len() {
        bail!(
            "Laengen der Koordinaten-Listen stimmen nicht ueberein ({}/{}/{})",
            xs.len(),
            ys.len(),
            zs.len()
        );
    }

    let anchor_twist_angles =
        parse_list::<f32>(&twist_raw, ',').context("Fehler beim Parsen der Twist-Winkel")?;

    let points: Vec<Vec3> = xs
        .iter()
        .zip(&ys)
        .zip(&zs)
        .map(|((x, y), z)| Vec3::new(*x, *y, *z))
        .collect();

    let mut record = ControlPathRecord {
        points,
        closed: attributes.closed,
        space: attributes.space,
        control_mode: attributes.control_mode,
        anchor_twist_angles,
        flip_normals: attributes.flip_normals,
        ..ControlPath::default().to_record()
    };
    if let Some(length) = attributes.auto_control_length {
        record.auto_control_length = length;
    }
    if let Some(angle) = attributes.global_twist_angle {
        record.global_twist_angle = angle;
    }

    ControlPath::from_record(record).context("ControlPath-XML ungültig")
}

/// Attribute des Wurzel-Elements (mit Standardwerten).
#[derive(Debug, Default)]
struct RootAttributes {
    version: Option<u32>,
    closed: bool,
    space: PathSpace,
    control_mode: ControlMode,
    auto_control_length: Option<f32>,
    global_twist_angle: Option<f32>,
    flip_normals: bool,
}

fn read_root_attributes(reader: &Reader<&[u8]>, element: &BytesStart) -> Result<RootAttributes> {
    let mut attributes = RootAttributes::default();

    for attr in element.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();

        match &*key {
            "version" => {
                let version = value.trim().parse().with_context(|| {
                    format!("Ungueltige Version: '{}'", truncate_for_error(&value))
                })?;
                attributes.version = Some(version);
            }
            "closed" => attributes.closed = parse_bool(&value).context("Attribut closed")?,
            "space" => attributes.space = value.parse()?,
            "controlMode" => attributes.control_mode = value.parse()?,
            "autoControlLength" => {
                attributes.auto_control_length =
                    Some(parse_float(&value).context("Attribut autoControlLength")?)
            }
            "globalTwistAngle" => {
                attributes.global_twist_angle =
                    Some(parse_float(&value).context("Attribut globalTwistAngle")?)
            }
            "flipNormals" => {
                attributes.flip_normals = parse_bool(&value).context("Attribut flipNormals")?
            }
            other => log::debug!("Unbekanntes Attribut '{}' ignoriert", other),
        }
    }

    Ok(attributes)
}

fn parse_bool(text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => bail!("Wert '{}' ist kein Wahrheitswert", truncate_for_error(other)),
    }
}

fn parse_float(text: &str) -> Result<f32> {
    let trimmed = text.trim();
    let value = trimmed.parse::<f32>().with_context(|| {
        format!(
            "Wert '{}' konnte nicht geparst werden",
            truncate_for_error(trimmed)
        )
    })?;
    if !value.is_finite() {
        bail!("Wert '{}' ist nicht endlich", truncate_for_error(trimmed));
    }
    Ok(value)
}

/// Hilfsfunktion zum Parsen einer kommagetrennten Liste
fn parse_list<T: std::str::FromStr>(text: &str, delimiter: char) -> Result<Vec<T>>
where
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    text.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>().with_context(|| {
                format!(
                    "Wert '{}' konnte nicht geparst werden",
                    truncate_for_error(s)
                )
            })
        })
        .collect::<Result<Vec<T>, _>>()
}

/// Kürzt einen String für Fehlermeldungen auf max. 40 Zeichen
fn truncate_for_error(s: &str) -> &str {
    match s.char_indices().nth(40) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
