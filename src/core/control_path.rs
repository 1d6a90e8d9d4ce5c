//! Editierbarer Bézier-Pfad aus Ankern und Kontrollpunkten.
//!
//! Layout des Punkt-Puffers: Anker liegen auf Indizes ≡ 0 (mod 3), dazwischen je
//! zwei Kontrollpunkte. Offen: `3·Segmente + 1` Punkte, geschlossen: `3·Segmente`
//! (die letzten zwei Kontrollpunkte führen zurück zum ersten Anker).
//!
//! Jede Änderung erhöht den Versionszähler und verwirft die gecachten Bounds,
//! damit abhängige Caches (`PathCache`) neu bauen können.

use super::bezier::{self, CubicSegment};
use super::frame::FrameProvider;
use super::{Bounds, ControlMode, PathSpace};
use crate::shared::math::{lerp_angle, wrap_degrees};
use glam::{Vec2, Vec3};
use std::cell::Cell;
use std::ops::Index;

/// Standard-Faktor für automatisch gesetzte Kontrollpunkte.
pub const DEFAULT_AUTO_CONTROL_LENGTH: f32 = 0.3;
/// Untergrenze für `auto_control_length`.
pub const MIN_AUTO_CONTROL_LENGTH: f32 = 0.01;

/// Editierbarer Pfad aus kubischen Bézier-Segmenten.
#[derive(Debug, Clone)]
pub struct ControlPath {
    points: Vec<Vec3>,
    closed: bool,
    space: PathSpace,
    control_mode: ControlMode,
    auto_control_length: f32,
    /// Ein Winkel pro Anker, Grad in [0, 360)
    anchor_twist_angles: Vec<f32>,
    global_twist_angle: f32,
    flip_normals: bool,
    bounds_cache: Cell<Option<Bounds>>,
    version: u64,
}

impl Default for ControlPath {
    fn default() -> Self {
        Self::new(Vec3::ZERO, false, PathSpace::Xyz)
    }
}

impl Index<usize> for ControlPath {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.points[index]
    }
}

impl ControlPath {
    /// Erstellt den Standard-Pfad: zwei Anker um `centre` mit leichtem S-Schwung.
    pub fn new(centre: Vec3, closed: bool, space: PathSpace) -> Self {
        let dir = if space == PathSpace::Xz { Vec3::Z } else { Vec3::Y };
        let width = 2.0;
        let control_height = 0.5;
        let control_width = 1.0;

        let points = vec![
            centre + Vec3::X * -width,
            centre + Vec3::X * -control_width + dir * control_height,
            centre + Vec3::X * control_width - dir * control_height,
            centre + Vec3::X * width,
        ];

        let mut path = Self::with_points(points, vec![0.0, 0.0], ControlMode::Aligned);
        path.set_space(space);
        path.set_closed(closed);
        path.version = 0;
        path
    }

    /// Erstellt einen Pfad durch die gegebenen Anker. Kontrollpunkte werden automatisch gesetzt.
    pub fn from_points(anchors: &[Vec3], closed: bool, space: PathSpace) -> anyhow::Result<Self> {
        if anchors.len() < 2 {
            anyhow::bail!(
                "Pfad benötigt mindestens 2 Anker, erhalten: {}",
                anchors.len()
            );
        }
        if let Some(bad) = anchors.iter().find(|p| !p.is_finite()) {
            anyhow::bail!("Anker mit ungültiger Koordinate: {:?}", bad);
        }

        let points = vec![anchors[0], Vec3::ZERO, Vec3::ZERO, anchors[1]];
        let mut path = Self::with_points(points, vec![0.0, 0.0], ControlMode::Automatic);
        for &anchor in &anchors[2..] {
            path.add_last(anchor);
        }
        path.auto_set_all_control_points();
        path.set_space(space);
        path.set_closed(closed);
        path.version = 0;
        Ok(path)
    }

    /// Wie [`ControlPath::from_points`], aber mit 2D-Ankern in der Ebene von `space`.
    ///
    /// Für `Xyz` wird die XY-Ebene verwendet.
    pub fn from_points_2d(anchors: &[Vec2], closed: bool, space: PathSpace) -> anyhow::Result<Self> {
        let lifted: Vec<Vec3> = anchors
            .iter()
            .map(|p| match space {
                PathSpace::Xz => Vec3::new(p.x, 0.0, p.y),
                PathSpace::Xy | PathSpace::Xyz => Vec3::new(p.x, p.y, 0.0),
            })
            .collect();
        Self::from_points(&lifted, closed, space)
    }

    fn with_points(points: Vec<Vec3>, anchor_twist_angles: Vec<f32>, mode: ControlMode) -> Self {
        Self {
            points,
            closed: false,
            space: PathSpace::Xyz,
            control_mode: mode,
            auto_control_length: DEFAULT_AUTO_CONTROL_LENGTH,
            anchor_twist_angles,
            global_twist_angle: 0.0,
            flip_normals: false,
            bounds_cache: Cell::new(None),
            version: 0,
        }
    }

    /// Baut einen Pfad aus bereits validierten Rohdaten (Persistenz).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_raw_parts(
        points: Vec<Vec3>,
        closed: bool,
        space: PathSpace,
        control_mode: ControlMode,
        auto_control_length: f32,
        anchor_twist_angles: Vec<f32>,
        global_twist_angle: f32,
        flip_normals: bool,
    ) -> Self {
        Self {
            points,
            closed,
            space,
            control_mode,
            auto_control_length: auto_control_length.max(MIN_AUTO_CONTROL_LENGTH),
            anchor_twist_angles: anchor_twist_angles.into_iter().map(wrap_degrees).collect(),
            global_twist_angle: wrap_degrees(global_twist_angle),
            flip_normals,
            bounds_cache: Cell::new(None),
            version: 0,
        }
    }

    // ── Abfragen ────────────────────────────────────────────────

    /// Alle Punkte (Anker und Kontrollpunkte) in Pufferreihenfolge.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Punkt am Index (Anker oder Kontrollpunkt).
    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_segments(&self) -> usize {
        self.points.len() / 3
    }

    pub fn num_anchors(&self) -> usize {
        if self.closed {
            self.points.len() / 3
        } else {
            (self.points.len() + 2) / 3
        }
    }

    /// `true` wenn `index` auf einen Anker zeigt.
    pub fn is_anchor(&self, index: usize) -> bool {
        index % 3 == 0
    }

    /// Die vier Punkte eines Segments (Anker, Kontrolle, Kontrolle, Anker).
    ///
    /// # Panics
    /// Bei Segment-Index außerhalb von `0..num_segments()`.
    pub fn segment_points(&self, segment_index: usize) -> CubicSegment {
        assert!(
            segment_index < self.num_segments(),
            "Segment-Index {} außerhalb von 0..{}",
            segment_index,
            self.num_segments()
        );
        let i = segment_index * 3;
        [
            self.points[i],
            self.points[i + 1],
            self.points[i + 2],
            self.points[self.loop_index(i as isize + 3)],
        ]
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn space(&self) -> PathSpace {
        self.space
    }

    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    pub fn auto_control_length(&self) -> f32 {
        self.auto_control_length
    }

    /// Twist-Winkel (Grad) des Ankers mit laufender Nummer `anchor`.
    pub fn anchor_normal_angle(&self, anchor: usize) -> f32 {
        self.anchor_twist_angles[anchor]
    }

    pub fn anchor_twist_angles(&self) -> &[f32] {
        &self.anchor_twist_angles
    }

    /// Zusätzlicher Twist (Grad), der auf alle Normalen wirkt.
    pub fn global_normal_angle(&self) -> f32 {
        self.global_twist_angle
    }

    pub fn flip_normals(&self) -> bool {
        self.flip_normals
    }

    /// Änderungszähler; steigt mit jeder Modifikation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bounding-Box des Pfads (gecacht bis zur nächsten Änderung).
    pub fn bounds(&self) -> Bounds {
        if let Some(bounds) = self.bounds_cache.get() {
            return bounds;
        }
        let bounds = self.calculate_bounds();
        self.bounds_cache.set(Some(bounds));
        bounds
    }

    /// Exakte Bounds: je Segment Endpunkte plus Wendepunkte.
    pub fn calculate_bounds(&self) -> Bounds {
        self.fold_segment_bounds(|p| p)
    }

    /// Bounds nach Anwendung eines Koordinatenrahmens (Welt-Raum).
    pub fn bounds_in_frame<F: FrameProvider + ?Sized>(&self, frame: &F) -> Bounds {
        let space = self.space;
        self.fold_segment_bounds(|p| frame.transform_point(p, space))
    }

    fn fold_segment_bounds(&self, map: impl Fn(Vec3) -> Vec3) -> Bounds {
        let mut bounds = Bounds::from_point(map(self.points[0]));
        for segment_index in 0..self.num_segments() {
            let segment = self.segment_points(segment_index).map(&map);
            bounds.encapsulate_bounds(&bezier::segment_bounds(&segment));
        }
        bounds
    }

    /// Punkt-Index modulo Pufferlänge (auch für negative Werte).
    pub fn loop_index(&self, index: isize) -> usize {
        index.rem_euclid(self.points.len() as isize) as usize
    }

    // ── Änderungen ──────────────────────────────────────────────

    /// Markiert den Pfad als geändert: Version +1, Bounds-Cache verwerfen.
    pub fn notify_modified(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.bounds_cache.set(None);
        log::trace!("ControlPath geändert (Version {})", self.version);
    }

    /// Hängt einen neuen Anker am Ende an. Bei geschlossenem Pfad ohne Wirkung.
    pub fn add_last(&mut self, anchor: Vec3) {
        if self.closed {
            log::debug!("add_last ignoriert: Pfad ist geschlossen");
            return;
        }
        let anchor = self.space.project(anchor);
        let last = self.points.len() - 1;
        let last_anchor = self.points[last];

        let mut offset = last_anchor - self.points[last - 1];
        if self.control_mode != ControlMode::Automatic {
            let half_gap = last_anchor.distance(anchor) * 0.5;
            offset = offset.normalize_or_zero() * half_gap;
        }
        let outgoing = last_anchor + offset;
        let incoming = (anchor + outgoing) * 0.5;

        self.points.extend([outgoing, incoming, anchor]);
        let twist = self.anchor_twist_angles.last().copied().unwrap_or(0.0);
        self.anchor_twist_angles.push(twist);

        if self.control_mode == ControlMode::Automatic {
            self.auto_set_all_affected_control_points(self.points.len() - 1);
        }
        self.notify_modified();
    }

    /// Fügt einen neuen Anker am Anfang ein. Bei geschlossenem Pfad ohne Wirkung.
    pub fn add_first(&mut self, anchor: Vec3) {
        if self.closed {
            log::debug!("add_first ignoriert: Pfad ist geschlossen");
            return;
        }
        let anchor = self.space.project(anchor);
        let first_anchor = self.points[0];

        let mut offset = first_anchor - self.points[1];
        if self.control_mode != ControlMode::Automatic {
            let half_gap = first_anchor.distance(anchor) * 0.5;
            offset = offset.normalize_or_zero() * half_gap;
        }
        let outgoing = first_anchor + offset;
        let incoming = (anchor + outgoing) * 0.5;

        self.points.splice(0..0, [anchor, incoming, outgoing]);
        let twist = self.anchor_twist_angles.first().copied().unwrap_or(0.0);
        self.anchor_twist_angles.insert(0, twist);

        if self.control_mode == ControlMode::Automatic {
            self.auto_set_all_affected_control_points(0);
        }
        self.notify_modified();
    }

    fn mirrors_new_controls(&self) -> bool {
        matches!(
            self.control_mode,
            ControlMode::Mirrored | ControlMode::Automatic
        )
    }

    /// Verschiebt einen Punkt unter Beachtung des Kontrollpunkt-Modus.
    ///
    /// Kontrollpunkte sind im Modus `Automatic` gesperrt (keine Änderung, keine Benachrichtigung).
    ///
    /// # Panics
    /// Bei `index >= num_points()`.
    pub fn move_point(&mut self, index: usize, position: Vec3) {
        if self.move_point_silent(index, position) {
            self.notify_modified();
        }
    }

    /// Verschiebt einen Punkt ohne Benachrichtigung. Gibt `true` zurück wenn etwas geändert wurde.
    fn move_point_silent(&mut self, index: usize, position: Vec3) -> bool {
        assert!(
            index < self.points.len(),
            "Punkt-Index {} außerhalb von 0..{}",
            index,
            self.points.len()
        );
        let position = self.space.project(position);
        let is_anchor = self.is_anchor(index);
        if !is_anchor && self.control_mode == ControlMode::Automatic {
            return false;
        }

        let delta = position - self.points[index];
        self.points[index] = position;

        if self.control_mode == ControlMode::Automatic {
            self.auto_set_all_affected_control_points(index);
            return true;
        }

        let len = self.points.len();
        if is_anchor {
            // Angrenzende Kontrollpunkte wandern mit dem Anker
            if index + 1 < len || self.closed {
                let next = self.loop_index(index as isize + 1);
                self.points[next] += delta;
            }
            if index >= 1 || self.closed {
                let prev = self.loop_index(index as isize - 1);
                self.points[prev] += delta;
            }
        } else if self.control_mode != ControlMode::Free {
            let next_is_anchor = (index + 1) % 3 == 0;
            let (sibling, anchor) = if next_is_anchor {
                (index as isize + 2, index as isize + 1)
            } else {
                (index as isize - 2, index as isize - 1)
            };

            if (sibling >= 0 && (sibling as usize) < len) || self.closed {
                let sibling = self.loop_index(sibling);
                let anchor_pos = self.points[self.loop_index(anchor)];
                let distance = match self.control_mode {
                    ControlMode::Mirrored => anchor_pos.distance(position),
                    _ => anchor_pos.distance(self.points[sibling]),
                };
                let dir = (anchor_pos - position).normalize_or_zero();
                self.points[sibling] = anchor_pos + dir * distance;
            }
        }
        true
    }

    /// Entfernt den Anker am Punkt-Index `anchor_index` samt seiner Kontrollpunkte.
    ///
    /// Weniger als zwei verbleibende Segmente werden verweigert (`false`, keine Benachrichtigung).
    ///
    /// # Panics
    /// Wenn `anchor_index` kein gültiger Anker-Index ist.
    pub fn remove_segment(&mut self, anchor_index: usize) -> bool {
        assert!(
            anchor_index < self.points.len() && self.is_anchor(anchor_index),
            "Kein Anker-Index: {} (Punkte: {})",
            anchor_index,
            self.points.len()
        );
        if self.num_segments() <= 2 {
            log::debug!(
                "remove_segment verweigert: nur {} Segmente",
                self.num_segments()
            );
            return false;
        }

        let len = self.points.len();
        if anchor_index == 0 {
            if self.closed {
                self.points[len - 1] = self.points[2];
            }
            self.points.drain(0..3);
        } else if anchor_index == len - 1 && !self.closed {
            self.points.drain(anchor_index - 2..=anchor_index);
        } else {
            self.points.drain(anchor_index - 1..anchor_index + 2);
        }
        self.anchor_twist_angles.remove(anchor_index / 3);

        if self.control_mode == ControlMode::Automatic {
            self.auto_set_all_control_points();
        }
        self.notify_modified();
        true
    }

    /// Teilt Segment `segment_index` bei Parameter `t` und setzt den neuen Anker auf `anchor_position`.
    ///
    /// # Panics
    /// Bei Segment-Index außerhalb von `0..num_segments()`.
    pub fn split_segment(&mut self, anchor_position: Vec3, segment_index: usize, t: f32) {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segment = self.segment_points(segment_index);
        let anchor_position = self.space.project(anchor_position);
        let new_anchor = segment_index * 3 + 3;

        if self.control_mode == ControlMode::Automatic {
            self.points.splice(
                segment_index * 3 + 2..segment_index * 3 + 2,
                [Vec3::ZERO, anchor_position, Vec3::ZERO],
            );
            self.auto_set_all_affected_control_points(new_anchor);
        } else {
            let (left, right) = bezier::split_segment(&segment, t);
            self.points.splice(
                segment_index * 3 + 2..segment_index * 3 + 2,
                [left[2], right[0], right[1]],
            );
            self.move_point_silent(new_anchor - 2, left[1]);
            let after = self.loop_index(new_anchor as isize + 2);
            self.move_point_silent(after, right[2]);
            self.move_point_silent(new_anchor, anchor_position);

            if self.control_mode == ControlMode::Mirrored {
                let average = (left[2].distance(anchor_position)
                    + right[1].distance(anchor_position))
                    / 2.0;
                let dir = (right[1] - anchor_position).normalize_or_zero();
                self.move_point_silent(new_anchor + 1, anchor_position + dir * average);
            }
        }

        let angles = &self.anchor_twist_angles;
        let prev = angles[segment_index];
        let next = angles[(segment_index + 1) % angles.len()];
        let split_angle = wrap_degrees(lerp_angle(prev, next, t));
        self.anchor_twist_angles.insert(segment_index + 1, split_angle);

        self.notify_modified();
    }

    /// Setzt den Twist-Winkel eines Ankers (Grad, modulo 360).
    pub fn set_anchor_normal_angle(&mut self, anchor: usize, degrees: f32) {
        let degrees = wrap_degrees(degrees);
        if self.anchor_twist_angles[anchor] != degrees {
            self.anchor_twist_angles[anchor] = degrees;
            self.notify_modified();
        }
    }

    /// Setzt alle Anker-Twist-Winkel und den globalen Winkel auf 0.
    pub fn reset_normal_angles(&mut self) {
        self.anchor_twist_angles.iter_mut().for_each(|a| *a = 0.0);
        self.global_twist_angle = 0.0;
        self.notify_modified();
    }

    /// Setzt den globalen Twist-Winkel (Grad, modulo 360).
    pub fn set_global_normal_angle(&mut self, degrees: f32) {
        let degrees = wrap_degrees(degrees);
        if self.global_twist_angle != degrees {
            self.global_twist_angle = degrees;
            self.notify_modified();
        }
    }

    pub fn set_flip_normals(&mut self, flip: bool) {
        if self.flip_normals != flip {
            self.flip_normals = flip;
            self.notify_modified();
        }
    }

    /// Wechselt den Kontrollpunkt-Modus. `Automatic` setzt sofort alle Kontrollpunkte neu.
    pub fn set_control_mode(&mut self, mode: ControlMode) {
        if self.control_mode == mode {
            return;
        }
        self.control_mode = mode;
        if mode == ControlMode::Automatic {
            self.auto_set_all_control_points();
        }
        self.notify_modified();
    }

    /// Setzt den Längenfaktor automatischer Kontrollpunkte (Untergrenze 0.01).
    pub fn set_auto_control_length(&mut self, length: f32) {
        let length = if length.is_finite() {
            length.max(MIN_AUTO_CONTROL_LENGTH)
        } else {
            DEFAULT_AUTO_CONTROL_LENGTH
        };
        if self.auto_control_length == length {
            return;
        }
        self.auto_control_length = length;
        if self.control_mode == ControlMode::Automatic {
            self.auto_set_all_control_points();
        }
        self.notify_modified();
    }

    /// Öffnet oder schließt den Pfad.
    ///
    /// Beim Schließen werden zwei Kontrollpunkte für das Rückführungs-Segment angehängt,
    /// beim Öffnen wieder entfernt.
    pub fn set_closed(&mut self, closed: bool) {
        if self.closed == closed {
            return;
        }
        self.closed = closed;

        if closed {
            let len = self.points.len();
            let last_anchor = self.points[len - 1];
            let first_anchor = self.points[0];
            let (last_control, first_control) = if self.mirrors_new_controls() {
                (
                    last_anchor * 2.0 - self.points[len - 2],
                    first_anchor * 2.0 - self.points[1],
                )
            } else {
                let half_gap = last_anchor.distance(first_anchor) * 0.5;
                (
                    last_anchor + (last_anchor - self.points[len - 2]).normalize_or_zero() * half_gap,
                    first_anchor + (first_anchor - self.points[1]).normalize_or_zero() * half_gap,
                )
            };
            self.points.extend([last_control, first_control]);
        } else {
            let len = self.points.len();
            self.points.truncate(len - 2);
        }

        if self.control_mode == ControlMode::Automatic {
            self.auto_set_all_control_points();
        }
        self.notify_modified();
    }

    /// Wechselt den Pfad-Raum.
    ///
    /// Von `Xyz` in eine Ebene fällt die Achse mit der kleinsten Ausdehnung weg;
    /// zwischen `Xy` und `Xz` werden y und z getauscht; nach `Xyz` bleiben die Punkte.
    pub fn set_space(&mut self, space: PathSpace) {
        if self.space == space {
            return;
        }
        let previous = self.space;
        self.space = space;

        if previous == PathSpace::Xyz {
            let size = self.calculate_bounds().size();
            let min_size = size.x.min(size.y).min(size.z);
            for p in &mut self.points {
                *p = match space {
                    PathSpace::Xy => Vec3::new(
                        if min_size == size.x { p.z } else { p.x },
                        if min_size == size.y { p.z } else { p.y },
                        0.0,
                    ),
                    PathSpace::Xz => Vec3::new(
                        if min_size == size.x { p.y } else { p.x },
                        0.0,
                        if min_size == size.z { p.y } else { p.z },
                    ),
                    PathSpace::Xyz => *p,
                };
            }
        } else if space != PathSpace::Xyz {
            for p in &mut self.points {
                *p = match space {
                    PathSpace::Xy => Vec3::new(p.x, p.z, 0.0),
                    _ => Vec3::new(p.x, 0.0, p.y),
                };
            }
        }
        self.notify_modified();
    }

    // ── Automatische Kontrollpunkte ────────────────────────────

    /// Setzt die Kontrollpunkte des geänderten Ankers und seiner Nachbarn neu.
    fn auto_set_all_affected_control_points(&mut self, updated_anchor: usize) {
        let len = self.points.len() as isize;
        let updated = updated_anchor as isize;
        for i in [updated - 3, updated, updated + 3] {
            if (i >= 0 && i < len) || self.closed {
                self.auto_set_anchor_control_points(self.loop_index(i));
            }
        }
        self.auto_set_start_and_end_controls();
    }

    fn auto_set_all_control_points(&mut self) {
        if self.num_anchors() > 2 {
            for anchor in (0..self.points.len()).step_by(3) {
                self.auto_set_anchor_control_points(anchor);
            }
        }
        self.auto_set_start_and_end_controls();
    }

    /// Legt beide Kontrollpunkte eines Ankers senkrecht zur Winkelhalbierenden der Nachbarn.
    fn auto_set_anchor_control_points(&mut self, anchor_index: usize) {
        let len = self.points.len();
        let anchor = self.points[anchor_index];
        let mut dir = Vec3::ZERO;
        let mut neighbour_distances = [0.0f32; 2];

        if anchor_index >= 3 || self.closed {
            let offset = self.points[self.loop_index(anchor_index as isize - 3)] - anchor;
            dir += offset.normalize_or_zero();
            neighbour_distances[0] = offset.length();
        }
        if anchor_index + 3 < len || self.closed {
            let offset = self.points[self.loop_index(anchor_index as isize + 3)] - anchor;
            dir -= offset.normalize_or_zero();
            neighbour_distances[1] = -offset.length();
        }

        let dir = dir.normalize_or_zero();
        for (side, distance) in neighbour_distances.iter().enumerate() {
            let control = anchor_index as isize + side as isize * 2 - 1;
            if (control >= 0 && (control as usize) < len) || self.closed {
                let control = self.loop_index(control);
                self.points[control] = anchor + dir * *distance * self.auto_control_length;
            }
        }
    }

    fn auto_set_start_and_end_controls(&mut self) {
        let len = self.points.len();
        if self.closed {
            if self.num_anchors() == 2 {
                // Zwei Anker würden sonst eine gerade Doppellinie ergeben
                let chord = self.points[3] - self.points[0];
                let half_gap = chord.length() * 0.5;
                let chord_dir = chord.normalize_or_zero();
                let plane_up = if self.space == PathSpace::Xy {
                    Vec3::Z
                } else {
                    Vec3::Y
                };
                let mut perp = chord_dir.cross(plane_up).normalize_or_zero();
                if perp == Vec3::ZERO && chord_dir != Vec3::ZERO {
                    perp = chord_dir.any_orthonormal_vector();
                }
                let perp = perp * half_gap;
                self.points[1] = self.points[0] + perp;
                self.points[5] = self.points[0] - perp;
                self.points[2] = self.points[3] + perp;
                self.points[4] = self.points[3] - perp;
            } else {
                self.auto_set_anchor_control_points(0);
                self.auto_set_anchor_control_points(len - 3);
            }
        } else if self.num_anchors() == 2 {
            // Sonderfall, damit kleine Änderungen den Pfad nicht umklappen lassen
            self.points[1] = self.points[0] + (self.points[3] - self.points[0]) * 0.25;
            self.points[2] = self.points[3] + (self.points[0] - self.points[3]) * 0.25;
        } else {
            self.points[1] = (self.points[0] + self.points[2]) * 0.5;
            self.points[len - 2] = (self.points[len - 1] + self.points[len - 3]) * 0.5;
        }
    }
}

#[cfg(test)]
mod tests;
