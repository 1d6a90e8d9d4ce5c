//! Reine Vektor-/Winkel-Hilfsfunktionen für Pfad-Geometrie.
//!
//! Layer-neutral: wird von `core::bezier`, `core::control_path`, `core::subdivide`
//! und `core::vertex_path` gemeinsam genutzt. Alle Winkel in Grad.

use glam::{Mat3, Quat, Vec3};

/// Quadrierte Länge, unterhalb derer ein Vektor als Nullvektor gilt.
pub const DEGENERATE_SQR_LENGTH: f32 = 1e-12;

/// Ungerichteter Winkel (Grad) zwischen `a` und `b`.
///
/// Nullvektoren liefern 0° statt NaN.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() < DEGENERATE_SQR_LENGTH || b.length_squared() < DEGENERATE_SQR_LENGTH {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}

/// Innenwinkel (Grad) am Punkt `b` im Dreieck `a`–`b`–`c`.
///
/// Fällt einer der Schenkel auf Länge 0 zusammen, gilt der Verlauf als gerade (180°).
pub fn min_angle(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    let ab = a - b;
    let cb = c - b;
    if ab.length_squared() < DEGENERATE_SQR_LENGTH || cb.length_squared() < DEGENERATE_SQR_LENGTH {
        return 180.0;
    }
    ab.angle_between(cb).to_degrees()
}

/// Vorzeichenbehafteter Winkel (Grad) von `from` nach `to` um `axis`.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let unsigned = angle_between(from, to);
    if axis.dot(from.cross(to)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Kürzeste vorzeichenbehaftete Differenz zweier Winkel, Ergebnis in (-180, 180].
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Interpoliert zwei Winkel entlang des kürzeren Kreisbogens (t wird auf [0, 1] begrenzt).
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    a + delta_angle(a, b) * t.clamp(0.0, 1.0)
}

/// Normiert einen Winkel auf [0, 360). Nicht-endliche Werte werden zu 0.
pub fn wrap_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid kann bei sehr kleinen negativen Werten exakt 360.0 liefern
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wiederholt `t` periodisch im Intervall [0, length).
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Pendelt `t` zwischen 0 und `length` hin und her.
pub fn ping_pong(t: f32, length: f32) -> f32 {
    let t = repeat(t, length * 2.0);
    length - (t - length).abs()
}

/// Umkehrung von `lerp`: Anteil von `value` zwischen `a` und `b`, begrenzt auf [0, 1].
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}

/// Rotiert `v` um `axis` (muss nicht normiert sein) um `degrees`.
///
/// Bei Null-Achse bleibt `v` unverändert.
pub fn rotate_about_axis(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO || degrees == 0.0 {
        return v;
    }
    Quat::from_axis_angle(axis, degrees.to_radians()) * v
}

/// Rotation, die `+Z` auf `forward` und `+Y` möglichst auf `up` abbildet.
///
/// Degenerierte Eingaben (Null-Forward) ergeben die Identität. Ist `up`
/// parallel zu `forward`, wird eine beliebige Senkrechte gewählt.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let forward = forward.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = up.cross(forward);
    if right.length_squared() < DEGENERATE_SQR_LENGTH {
        right = forward.any_orthonormal_vector().cross(forward);
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
}

/// Nächster Punkt auf der Strecke `a`–`b` zu `point`.
pub fn closest_point_on_segment(point: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let dir = b - a;
    let sqr_length = dir.length_squared();
    if sqr_length <= DEGENERATE_SQR_LENGTH {
        a
    } else {
        let factor = (point - a).dot(dir) / sqr_length;
        a + dir * factor.clamp(0.0, 1.0)
    }
}
