//! Abfragbarer Polygonzug mit Tangenten, Normalen und Bogenlängen-Parametrisierung.
//!
//! Normalen im 3D-Raum werden per Doppel-Reflexion (rotationsminimierender Rahmen)
//! entlang des Pfads transportiert, bei geschlossenen Pfaden wird der Versatz an der
//! Naht gleichmäßig verteilt und anschließend der Anker-Twist angewendet.

use super::frame::FrameProvider;
use super::subdivide::{self, VertexPathData};
use super::{Bounds, ControlPath, LoopBehaviour, PathSpace};
use crate::shared::math::{
    closest_point_on_segment, delta_angle, inverse_lerp, look_rotation, ping_pong,
    rotate_about_axis, signed_angle,
};
use crate::shared::{SubdivisionMode, VertexPathOptions};
use glam::{Quat, Vec3};

/// Naht-Versatz (Grad), unterhalb dessen keine Korrektur erfolgt.
const SEAM_CORRECTION_THRESHOLD: f32 = 0.1;

/// Fertig berechneter Polygonzug eines `ControlPath` (lokaler Raum).
#[derive(Debug, Clone)]
pub struct VertexPath {
    points: Vec<Vec3>,
    tangents: Vec<Vec3>,
    normals: Vec<Vec3>,
    /// Normierte Bogenlänge je Vertex, monoton steigend in [0, 1]
    positions: Vec<f32>,
    cumulative_lengths: Vec<f32>,
    length: f32,
    bounds: Bounds,
    closed: bool,
    space: PathSpace,
    up: Vec3,
}

/// Zwei benachbarte Vertices und der Anteil dazwischen.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket {
    prev: usize,
    next: usize,
    percent: f32,
}

impl VertexPath {
    /// Baut den Pfad; die Referenz-Achse wird aus den Bounds geschätzt.
    pub fn new(path: &ControlPath, data: VertexPathData) -> Self {
        Self::build(path, data, None)
    }

    /// Baut den Pfad mit vorgegebener Referenz-Achse für die Normalen (nur 3D).
    pub fn with_up(path: &ControlPath, data: VertexPathData, up: Vec3) -> Self {
        Self::build(path, data, Some(up))
    }

    /// Unterteilung nach Winkelfehler mit Standard-Genauigkeit.
    pub fn by_angle_error(path: &ControlPath, max_angle_error: f32, min_vertex_spacing: f32) -> Self {
        let data = subdivide::split_by_angle_error(
            path,
            max_angle_error,
            min_vertex_spacing,
            subdivide::DEFAULT_ACCURACY,
        );
        Self::new(path, data)
    }

    /// Unterteilung in gleichmäßigen Abständen mit Standard-Genauigkeit.
    pub fn by_distance(path: &ControlPath, spacing: f32) -> Self {
        let data = subdivide::split_by_distance(path, spacing, subdivide::DEFAULT_ACCURACY);
        Self::new(path, data)
    }

    /// Unterteilung gemäß Optionen (Strategie, Parameter, optionale Referenz-Achse).
    pub fn from_options(path: &ControlPath, options: &VertexPathOptions) -> Self {
        let data = match options.mode {
            SubdivisionMode::AngleError => subdivide::split_by_angle_error(
                path,
                options.max_angle_error,
                options.min_vertex_spacing,
                options.accuracy,
            ),
            SubdivisionMode::Distance => {
                subdivide::split_by_distance(path, options.vertex_spacing, options.accuracy)
            }
        };
        Self::build(path, data, options.up)
    }

    fn build(path: &ControlPath, data: VertexPathData, up_override: Option<Vec3>) -> Self {
        let num_vertices = data.vertices.len();
        let length = data.length();
        let space = path.space();
        let closed = path.is_closed();

        let points: Vec<Vec3> = data.vertices.iter().map(|v| v.position).collect();
        let tangents: Vec<Vec3> = data.vertices.iter().map(|v| v.tangent).collect();
        let cumulative_lengths: Vec<f32> =
            data.vertices.iter().map(|v| v.cumulative_length).collect();
        let positions: Vec<f32> = if length > 0.0 {
            cumulative_lengths.iter().map(|l| l / length).collect()
        } else {
            let last = (num_vertices.max(2) - 1) as f32;
            (0..num_vertices).map(|i| i as f32 / last).collect()
        };

        let up = match (space, up_override.map(|u| u.normalize_or_zero())) {
            (PathSpace::Xy, _) => Vec3::NEG_Z,
            (PathSpace::Xz, _) => Vec3::Y,
            (PathSpace::Xyz, Some(up)) if up != Vec3::ZERO => up,
            (PathSpace::Xyz, _) => {
                let size = data.bounds.size();
                if size.z > size.y {
                    Vec3::Y
                } else {
                    Vec3::NEG_Z
                }
            }
        };

        let mut vertex_path = Self {
            points,
            tangents,
            normals: vec![Vec3::ZERO; num_vertices],
            positions,
            cumulative_lengths,
            length,
            bounds: data.bounds,
            closed,
            space,
            up,
        };

        if space == PathSpace::Xyz {
            vertex_path.transport_normals();
            if closed {
                vertex_path.correct_seam();
            }
            vertex_path.apply_twist(path, &data.anchor_vertex_map);
        } else {
            let sign = if path.flip_normals() { -1.0 } else { 1.0 };
            for (normal, tangent) in vertex_path.normals.iter_mut().zip(&vertex_path.tangents) {
                *normal = tangent.cross(up).normalize_or_zero() * sign;
            }
        }

        log::debug!(
            "VertexPath gebaut: {} Vertices, Länge {:.3}, Raum {}",
            num_vertices,
            length,
            space
        );
        vertex_path
    }

    /// Doppel-Reflexion: transportiert die Rotationsachse von Vertex zu Vertex.
    fn transport_normals(&mut self) {
        let tangent0 = self.tangents[0];
        let mut axis = (self.up - tangent0 * self.up.dot(tangent0)).normalize_or_zero();
        if axis == Vec3::ZERO {
            axis = if tangent0 == Vec3::ZERO {
                self.up
            } else {
                tangent0.any_orthonormal_vector()
            };
        }
        self.normals[0] = perpendicular_or(axis.cross(tangent0), tangent0, Vec3::ZERO);

        for i in 1..self.points.len() {
            let offset = self.points[i] - self.points[i - 1];
            let sqr_dst = offset.length_squared();
            let (reflected_axis, reflected_tangent) = if sqr_dst > 0.0 {
                (
                    axis - offset * (2.0 / sqr_dst * offset.dot(axis)),
                    self.tangents[i - 1] - offset * (2.0 / sqr_dst * offset.dot(self.tangents[i - 1])),
                )
            } else {
                (axis, self.tangents[i - 1])
            };

            let v2 = self.tangents[i] - reflected_tangent;
            let c2 = v2.dot(v2);
            let final_axis = if c2 > 0.0 {
                reflected_axis - v2 * (2.0 / c2 * v2.dot(reflected_axis))
            } else {
                reflected_axis
            };

            let tangent = self.tangents[i];
            self.normals[i] = perpendicular_or(final_axis.cross(tangent), tangent, self.normals[i - 1]);
            axis = final_axis;
        }
    }

    /// Verteilt den Winkelversatz zwischen letzter und erster Normale linear über den Pfad.
    fn correct_seam(&mut self) {
        let last = self.normals.len() - 1;
        let error = signed_angle(self.normals[last], self.normals[0], self.tangents[0]);
        if error.abs() <= SEAM_CORRECTION_THRESHOLD {
            return;
        }
        log::debug!("Naht-Korrektur: {:.3}°", error);
        for i in 1..self.normals.len() {
            let angle = error * (i as f32 / last as f32);
            self.normals[i] = rotate_about_axis(self.normals[i], self.tangents[i], angle);
        }
    }

    /// Dreht die Normalen je Anker-Spanne um den interpolierten Twist-Winkel.
    fn apply_twist(&mut self, path: &ControlPath, anchor_vertex_map: &[usize]) {
        let sign = if path.flip_normals() { -1.0 } else { 1.0 };
        let global = path.global_normal_angle();
        let spans = anchor_vertex_map.len().saturating_sub(1);

        for anchor in 0..spans {
            let next_anchor = if self.closed {
                (anchor + 1) % path.num_segments()
            } else {
                anchor + 1
            };
            let start_angle = path.anchor_normal_angle(anchor) + global;
            let end_angle = path.anchor_normal_angle(next_anchor) + global;
            let delta = delta_angle(start_angle, end_angle);

            let start_vertex = anchor_vertex_map[anchor];
            let end_vertex = anchor_vertex_map[anchor + 1];
            let span = end_vertex.saturating_sub(start_vertex);
            // Der End-Vertex gehört zur nächsten Spanne, außer bei der letzten
            let vertices = if anchor == spans - 1 {
                start_vertex..end_vertex + 1
            } else {
                start_vertex..end_vertex
            };
            for vertex in vertices {
                let t = if span == 0 {
                    0.0
                } else {
                    (vertex - start_vertex) as f32 / span as f32
                };
                let angle = start_angle + delta * t;
                self.normals[vertex] =
                    rotate_about_axis(self.normals[vertex], self.tangents[vertex], angle) * sign;
            }
        }
    }

    // ── Zugriff ─────────────────────────────────────────────────

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn tangents(&self) -> &[Vec3] {
        &self.tangents
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn cumulative_lengths(&self) -> &[f32] {
        &self.cumulative_lengths
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    pub fn tangent(&self, index: usize) -> Vec3 {
        self.tangents[index]
    }

    pub fn normal(&self, index: usize) -> Vec3 {
        self.normals[index]
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn space(&self) -> PathSpace {
        self.space
    }

    /// Referenz-Achse, mit der die Normalen gesät wurden.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    // ── Abfragen nach Position (0..1) ──────────────────────────

    pub fn point_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Vec3 {
        let b = self.bracket(position, behaviour);
        self.points[b.prev].lerp(self.points[b.next], b.percent)
    }

    pub fn direction_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Vec3 {
        let b = self.bracket(position, behaviour);
        self.tangents[b.prev]
            .lerp(self.tangents[b.next], b.percent)
            .normalize_or_zero()
    }

    pub fn normal_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Vec3 {
        let b = self.bracket(position, behaviour);
        self.normals[b.prev]
            .lerp(self.normals[b.next], b.percent)
            .normalize_or_zero()
    }

    /// Rotation mit Tangente als Vorwärts- und Normale als Oben-Richtung.
    pub fn rotation_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Quat {
        let b = self.bracket(position, behaviour);
        let direction = self.tangents[b.prev].lerp(self.tangents[b.next], b.percent);
        let normal = self.normals[b.prev].lerp(self.normals[b.next], b.percent);
        look_rotation(direction, normal)
    }

    /// Umgebende Vertex-Indizes `(prev, next)` und Anteil zwischen ihnen.
    pub fn vertex_bracket(&self, position: f32, behaviour: LoopBehaviour) -> (usize, usize, f32) {
        let b = self.bracket(position, behaviour);
        (b.prev, b.next, b.percent)
    }

    // ── Abfragen nach Distanz ──────────────────────────────────

    fn distance_to_position(&self, distance: f32) -> f32 {
        if self.length > 0.0 {
            distance / self.length
        } else {
            0.0
        }
    }

    pub fn point_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Vec3 {
        self.point_at_position(self.distance_to_position(distance), behaviour)
    }

    pub fn direction_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Vec3 {
        self.direction_at_position(self.distance_to_position(distance), behaviour)
    }

    pub fn normal_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Vec3 {
        self.normal_at_position(self.distance_to_position(distance), behaviour)
    }

    pub fn rotation_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Quat {
        self.rotation_at_position(self.distance_to_position(distance), behaviour)
    }

    // ── Nächster Punkt ─────────────────────────────────────────

    /// Nächster Punkt auf dem Polygonzug (lokaler Raum).
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let (b, closest) = self.closest_bracket(point);
        if b.prev == b.next {
            return self.points[b.prev];
        }
        closest
    }

    /// Normierte Position (0..1) des nächsten Punkts.
    pub fn closest_position(&self, point: Vec3) -> f32 {
        let (b, _) = self.closest_bracket(point);
        let a = self.positions[b.prev];
        let c = self.positions[b.next];
        a + (c - a) * b.percent
    }

    /// Bogenlänge bis zum nächsten Punkt.
    pub fn closest_distance(&self, point: Vec3) -> f32 {
        self.closest_position(point) * self.length
    }

    /// Sicht auf den Pfad im Welt-Raum eines Koordinatenrahmens.
    pub fn in_frame<'a, F: FrameProvider + ?Sized>(&'a self, frame: &'a F) -> WorldPath<'a, F> {
        WorldPath { path: self, frame }
    }

    /// Normiert `position` gemäß `behaviour` und sucht per Bisektion die umgebenden Vertices.
    fn bracket(&self, position: f32, behaviour: LoopBehaviour) -> Bracket {
        let t = normalize_position(position, behaviour);
        let last = self.positions.len() - 1;

        let mut prev = 0;
        let mut next = last;
        let mut i = ((t * last as f32).round() as usize).min(last);
        loop {
            if t <= self.positions[i] {
                next = i;
            } else {
                prev = i;
            }
            i = (next + prev) / 2;
            if next - prev <= 1 {
                break;
            }
        }

        Bracket {
            prev,
            next,
            percent: inverse_lerp(self.positions[prev], self.positions[next], t),
        }
    }

    /// Lineare Suche über alle Kanten (bei geschlossenem Pfad inkl. Rückkante).
    fn closest_bracket(&self, point: Vec3) -> (Bracket, Vec3) {
        let n = self.points.len();
        let mut min_sqr_dst = f32::MAX;
        let mut best = (
            Bracket {
                prev: 0,
                next: 0,
                percent: 0.0,
            },
            self.points[0],
        );

        for i in 0..n {
            let next = if i + 1 < n {
                i + 1
            } else if self.closed {
                0
            } else {
                break;
            };
            let candidate = closest_point_on_segment(point, self.points[i], self.points[next]);
            let sqr_dst = point.distance_squared(candidate);
            if sqr_dst < min_sqr_dst {
                min_sqr_dst = sqr_dst;
                let segment_length = self.points[i].distance(self.points[next]);
                let percent = if segment_length > 0.0 {
                    (candidate.distance(self.points[i]) / segment_length).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                best = (
                    Bracket {
                        prev: i,
                        next,
                        percent,
                    },
                    candidate,
                );
            }
        }
        best
    }
}

/// Bringt eine Abfrage-Position gemäß Verhalten nach [0, 1].
///
/// Bei `Loop` wird 1.0 (und jede positive ganze Zahl) auf das Pfadende abgebildet.
fn normalize_position(position: f32, behaviour: LoopBehaviour) -> f32 {
    if !position.is_finite() {
        return 0.0;
    }
    match behaviour {
        LoopBehaviour::Loop => {
            let wrapped = position.rem_euclid(1.0);
            if wrapped == 0.0 && position > 0.0 {
                1.0
            } else {
                wrapped.min(1.0)
            }
        }
        LoopBehaviour::Reverse => ping_pong(position, 1.0),
        LoopBehaviour::Stop => position.clamp(0.0, 1.0),
    }
}

/// Normiert `v`; fällt er weg, wird `fallback` senkrecht zu `tangent` gestellt.
fn perpendicular_or(v: Vec3, tangent: Vec3, fallback: Vec3) -> Vec3 {
    let v = v.normalize_or_zero();
    if v != Vec3::ZERO {
        return v;
    }
    let fallback = (fallback - tangent * fallback.dot(tangent)).normalize_or_zero();
    if fallback != Vec3::ZERO {
        return fallback;
    }
    let tangent = tangent.normalize_or_zero();
    if tangent == Vec3::ZERO {
        Vec3::ZERO
    } else {
        tangent.any_orthonormal_vector()
    }
}

/// Welt-Raum-Sicht auf einen `VertexPath`.
pub struct WorldPath<'a, F: FrameProvider + ?Sized> {
    path: &'a VertexPath,
    frame: &'a F,
}

impl<F: FrameProvider + ?Sized> WorldPath<'_, F> {
    pub fn point_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Vec3 {
        let local = self.path.point_at_position(position, behaviour);
        self.frame.transform_point(local, self.path.space)
    }

    pub fn direction_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Vec3 {
        let local = self.path.direction_at_position(position, behaviour);
        self.frame.transform_direction(local, self.path.space)
    }

    pub fn normal_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Vec3 {
        let local = self.path.normal_at_position(position, behaviour);
        self.frame.transform_direction(local, self.path.space)
    }

    pub fn rotation_at_position(&self, position: f32, behaviour: LoopBehaviour) -> Quat {
        let b = self.path.bracket(position, behaviour);
        let p = self.path;
        let direction = p.tangents[b.prev].lerp(p.tangents[b.next], b.percent);
        let normal = p.normals[b.prev].lerp(p.normals[b.next], b.percent);
        look_rotation(
            self.frame.transform_direction(direction, p.space),
            self.frame.transform_direction(normal, p.space),
        )
    }

    pub fn point_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Vec3 {
        self.point_at_position(self.path.distance_to_position(distance), behaviour)
    }

    pub fn direction_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Vec3 {
        self.direction_at_position(self.path.distance_to_position(distance), behaviour)
    }

    pub fn normal_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Vec3 {
        self.normal_at_position(self.path.distance_to_position(distance), behaviour)
    }

    pub fn rotation_at_distance(&self, distance: f32, behaviour: LoopBehaviour) -> Quat {
        self.rotation_at_position(self.path.distance_to_position(distance), behaviour)
    }

    /// Nächster Welt-Punkt zu einem Welt-Punkt.
    pub fn closest_point(&self, world_point: Vec3) -> Vec3 {
        let local = self.frame.inverse_transform_point(world_point, self.path.space);
        let closest = self.path.closest_point(local);
        self.frame.transform_point(closest, self.path.space)
    }

    pub fn closest_position(&self, world_point: Vec3) -> f32 {
        let local = self.frame.inverse_transform_point(world_point, self.path.space);
        self.path.closest_position(local)
    }

    pub fn closest_distance(&self, world_point: Vec3) -> f32 {
        let local = self.frame.inverse_transform_point(world_point, self.path.space);
        self.path.closest_distance(local)
    }
}
