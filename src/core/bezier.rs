//! Kubische Bézier-Segmente: Auswertung, Ableitungen, Längen-Schätzung, Bounds, Split.

use super::Bounds;
use glam::Vec3;

/// Ein Segment: Anker, Kontrollpunkt, Kontrollpunkt, Anker.
pub type CubicSegment = [Vec3; 4];

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// B'(t) = 3(1-t)²·(P1-P0) + 6(1-t)t·(P2-P1) + 3t²·(P3-P2)
pub fn cubic_bezier_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let inv = 1.0 - t;
    3.0 * inv * inv * (p1 - p0) + 6.0 * inv * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// B''(t) = 6(1-t)·(P2-2P1+P0) + 6t·(P3-2P2+P1)
pub fn cubic_bezier_second_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    6.0 * (1.0 - t) * (p2 - 2.0 * p1 + p0) + 6.0 * t * (p3 - 2.0 * p2 + p1)
}

/// Punkt auf einem Segment.
pub fn segment_point(segment: &CubicSegment, t: f32) -> Vec3 {
    let [p0, p1, p2, p3] = *segment;
    cubic_bezier(p0, p1, p2, p3, t)
}

/// Normierte Tangente auf einem Segment.
///
/// Verschwindet die Ableitung (z.B. Kontrollpunkt liegt auf dem Anker), wird auf
/// die Sehne P0→P3 ausgewichen; ist auch diese leer, ergibt sich der Nullvektor.
pub fn segment_tangent(segment: &CubicSegment, t: f32) -> Vec3 {
    let [p0, p1, p2, p3] = *segment;
    let derivative = cubic_bezier_derivative(p0, p1, p2, p3, t).normalize_or_zero();
    if derivative != Vec3::ZERO {
        return derivative;
    }
    // Am Rand mit zusammenfallendem Kontrollpunkt zeigt die zweite Ableitung die Richtung
    let second = cubic_bezier_second_derivative(p0, p1, p2, p3, t);
    let second = if t >= 0.5 { -second } else { second };
    let second = second.normalize_or_zero();
    if second != Vec3::ZERO {
        return second;
    }
    (p3 - p0).normalize_or_zero()
}

/// Grobe Längen-Schätzung: Sehne plus halbes Kontrollpolygon.
pub fn estimate_length(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> f32 {
    let control_net_length = p0.distance(p1) + p1.distance(p2) + p2.distance(p3);
    p0.distance(p3) + control_net_length / 2.0
}

/// Zerlegt ein Segment bei `t` (de Casteljau) in zwei formgleiche Teilsegmente.
pub fn split_segment(segment: &CubicSegment, t: f32) -> (CubicSegment, CubicSegment) {
    let [p0, p1, p2, p3] = *segment;
    let a1 = p0.lerp(p1, t);
    let a2 = p1.lerp(p2, t);
    let a3 = p2.lerp(p3, t);
    let b1 = a1.lerp(a2, t);
    let b2 = a2.lerp(a3, t);
    let point_on_curve = b1.lerp(b2, t);
    ([p0, a1, b1, point_on_curve], [point_on_curve, b2, a3, p3])
}

/// Parameterwerte in [0, 1], an denen eine Achse der Ableitung verschwindet.
///
/// B'(t) = a·t² + b·t + c mit
/// a = 3(-P0 + 3P1 - 3P2 + P3), b = 6(P0 - 2P1 + P2), c = 3(P1 - P0)
pub fn extreme_point_times(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Vec<f32> {
    let a = 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3);
    let b = 6.0 * (p0 - 2.0 * p1 + p2);
    let c = 3.0 * (p1 - p0);

    let mut times = Vec::with_capacity(6);
    for axis in 0..3 {
        stationary_point_times(a[axis], b[axis], c[axis], &mut times);
    }
    times
}

/// Nullstellen von a·t² + b·t + c in [0, 1].
fn stationary_point_times(a: f32, b: f32, c: f32, out: &mut Vec<f32>) {
    let mut push = |t: f32| {
        if (0.0..=1.0).contains(&t) {
            out.push(t);
        }
    };

    if a != 0.0 {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let s = discriminant.sqrt();
            push((-b + s) / (2.0 * a));
            if discriminant != 0.0 {
                push((-b - s) / (2.0 * a));
            }
        }
    } else if b != 0.0 {
        push(-c / b);
    }
}

/// Exakte Bounding-Box eines Segments (Endpunkte + Wendepunkte je Achse).
pub fn segment_bounds(segment: &CubicSegment) -> Bounds {
    let [p0, p1, p2, p3] = *segment;
    let mut bounds = Bounds::from_point(p0);
    bounds.encapsulate(p3);
    for t in extreme_point_times(p0, p1, p2, p3) {
        bounds.encapsulate(cubic_bezier(p0, p1, p2, p3, t));
    }
    bounds
}
