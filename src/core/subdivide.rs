//! Unterteilung eines `ControlPath` in eine Vertex-Folge.
//!
//! Zwei Strategien:
//! - Winkelfehler: dichte Vertices in Kurven, wenige auf Geraden
//! - Abstand: gleichmäßiger Bogenlängen-Abstand
//!
//! Beide liefern immer ein gültiges Ergebnis; ungültige Parameter werden begrenzt.

use super::bezier::{self, CubicSegment};
use super::{Bounds, ControlPath};
use crate::shared::math::min_angle;
use glam::Vec3;

/// Standard-Genauigkeit (Abtastschritte pro Längeneinheit).
pub const DEFAULT_ACCURACY: f32 = 10.0;
/// Untergrenze für die Genauigkeit.
pub const MIN_ACCURACY: f32 = 0.01;
/// Untergrenze für den Vertex-Abstand bei Abstands-Unterteilung.
pub const MIN_SPACING: f32 = 0.01;
/// Obergrenze für Abtastschritte pro Segment.
pub const MAX_DIVISIONS_PER_SEGMENT: u32 = 100_000;

/// Relative Toleranz, ab der ein Abstand als erreicht gilt.
const SPACING_TOLERANCE: f32 = 1e-4;

/// Ein abgetasteter Vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexData {
    pub position: Vec3,
    /// Normierte Tangente (Nullvektor bei degeneriertem Segment)
    pub tangent: Vec3,
    /// Bogenlänge vom Pfadanfang bis hier
    pub cumulative_length: f32,
}

/// Ergebnis einer Unterteilung.
#[derive(Debug, Clone)]
pub struct VertexPathData {
    pub vertices: Vec<VertexData>,
    /// Vertex-Index je Anker: `[0, letzter Vertex von Segment 0, …]`
    pub anchor_vertex_map: Vec<usize>,
    pub bounds: Bounds,
}

impl VertexPathData {
    /// Gesamtlänge des Polygonzugs.
    pub fn length(&self) -> f32 {
        self.vertices
            .last()
            .map(|v| v.cumulative_length)
            .unwrap_or(0.0)
    }

    fn start(path: &ControlPath) -> Self {
        let first = path[0];
        let tangent = bezier::segment_tangent(&path.segment_points(0), 0.0);
        Self {
            vertices: vec![VertexData {
                position: first,
                tangent,
                cumulative_length: 0.0,
            }],
            anchor_vertex_map: vec![0],
            bounds: Bounds::from_point(first),
        }
    }

    fn push(&mut self, position: Vec3, tangent: Vec3, cumulative_length: f32) {
        self.vertices.push(VertexData {
            position,
            tangent,
            cumulative_length,
        });
        self.bounds.encapsulate(position);
    }

    fn close_segment(&mut self) {
        self.anchor_vertex_map.push(self.vertices.len() - 1);
    }
}

/// Abtastschritte eines Segments: `ceil(geschätzte Länge · Genauigkeit)` in [1, MAX].
fn segment_divisions(segment: &CubicSegment, accuracy: f32) -> u32 {
    let [p0, p1, p2, p3] = *segment;
    let estimate = bezier::estimate_length(p0, p1, p2, p3) * accuracy;
    if !estimate.is_finite() {
        return 1;
    }
    (estimate.ceil() as u32).clamp(1, MAX_DIVISIONS_PER_SEGMENT)
}

fn sanitize_accuracy(accuracy: f32) -> f32 {
    if !accuracy.is_finite() {
        log::warn!(
            "Ungültige Genauigkeit {}, verwende {}",
            accuracy,
            DEFAULT_ACCURACY
        );
        return DEFAULT_ACCURACY;
    }
    if accuracy < MIN_ACCURACY {
        log::warn!("Genauigkeit {} zu klein, begrenzt auf {}", accuracy, MIN_ACCURACY);
    }
    accuracy.max(MIN_ACCURACY)
}

/// Unterteilt nach Winkelfehler.
///
/// Ein Abtastpunkt wird Vertex, wenn der größere von lokalem Knickwinkel und
/// Knickwinkel zum letzten Vertex `max_angle_error` (Grad) übersteigt und seit dem
/// letzten Vertex mindestens `min_vertex_spacing` zurückgelegt wurde. Der letzte
/// Abtastpunkt des Pfads wird immer übernommen.
pub fn split_by_angle_error(
    path: &ControlPath,
    max_angle_error: f32,
    min_vertex_spacing: f32,
    accuracy: f32,
) -> VertexPathData {
    let max_angle_error = if max_angle_error.is_nan() {
        0.0
    } else {
        max_angle_error.clamp(0.0, 180.0)
    };
    let min_vertex_spacing = if min_vertex_spacing.is_finite() {
        min_vertex_spacing.max(0.0)
    } else {
        0.0
    };
    let accuracy = sanitize_accuracy(accuracy);

    let mut data = VertexPathData::start(path);
    let mut prev_point = path[0];
    let mut last_added = path[0];
    let mut path_length = 0.0;
    let mut dst_since_last_vertex = 0.0;
    let last_segment = path.num_segments() - 1;

    for segment_index in 0..path.num_segments() {
        let segment = path.segment_points(segment_index);
        let divisions = segment_divisions(&segment, accuracy);
        let increment = 1.0 / divisions as f32;

        for step in 1..=divisions {
            let is_last_point = step == divisions && segment_index == last_segment;
            let t = step as f32 / divisions as f32;
            let point = bezier::segment_point(&segment, t);
            let next_point = bezier::segment_point(&segment, t + increment);

            let local_angle = 180.0 - min_angle(prev_point, point, next_point);
            let angle_from_last_vertex = 180.0 - min_angle(last_added, point, next_point);
            let angle_error = local_angle.max(angle_from_last_vertex);

            if (angle_error > max_angle_error && dst_since_last_vertex >= min_vertex_spacing)
                || is_last_point
            {
                path_length += last_added.distance(point);
                data.push(point, bezier::segment_tangent(&segment, t), path_length);
                dst_since_last_vertex = 0.0;
                last_added = point;
            } else {
                dst_since_last_vertex += point.distance(prev_point);
            }
            prev_point = point;
        }
        data.close_segment();
    }

    log::debug!(
        "Unterteilung (Winkelfehler {}°): {} Vertices, Länge {:.3}",
        max_angle_error,
        data.vertices.len(),
        data.length()
    );
    data
}

/// Unterteilt in gleichmäßigen Bogenlängen-Abständen.
///
/// Überschießt ein Abtastschritt den Abstand, wird der Punkt um den Überschuss
/// zurück zum vorherigen Abtastpunkt gezogen und derselbe Schritt erneut ausgewertet.
pub fn split_by_distance(path: &ControlPath, spacing: f32, accuracy: f32) -> VertexPathData {
    let spacing = if spacing.is_finite() {
        spacing.max(MIN_SPACING)
    } else {
        log::warn!("Ungültiger Vertex-Abstand {}, verwende {}", spacing, MIN_SPACING);
        MIN_SPACING
    };
    let accuracy = sanitize_accuracy(accuracy);
    let tolerance = spacing * SPACING_TOLERANCE;

    let mut data = VertexPathData::start(path);
    let mut prev_point = path[0];
    let mut last_added = path[0];
    let mut path_length = 0.0;
    let mut dst_since_last_vertex = 0.0;
    let last_segment = path.num_segments() - 1;

    for segment_index in 0..path.num_segments() {
        let segment = path.segment_points(segment_index);
        let divisions = segment_divisions(&segment, accuracy);

        let mut step = 1;
        while step <= divisions {
            let is_last_point = step == divisions && segment_index == last_segment;
            let t = step as f32 / divisions as f32;
            let mut point = bezier::segment_point(&segment, t);
            dst_since_last_vertex += point.distance(prev_point);

            let overshoot = dst_since_last_vertex - spacing;
            let mut overshot = overshoot > tolerance;
            if overshot {
                let pulled = point + (prev_point - point).normalize_or_zero() * overshoot;
                // Kein Fortschritt mehr (Gleitkomma-Auflösung): Abtastpunkt selbst nehmen
                if pulled == last_added {
                    overshot = false;
                } else {
                    point = pulled;
                }
            }

            if dst_since_last_vertex >= spacing - tolerance || is_last_point {
                path_length += last_added.distance(point);
                data.push(point, bezier::segment_tangent(&segment, t), path_length);
                dst_since_last_vertex = 0.0;
                last_added = point;
            }
            prev_point = point;

            // Nach dem Zurückziehen denselben Schritt erneut auswerten
            if !overshot {
                step += 1;
            }
        }
        data.close_segment();
    }

    log::debug!(
        "Unterteilung (Abstand {}): {} Vertices, Länge {:.3}",
        spacing,
        data.vertices.len(),
        data.length()
    );
    data
}
