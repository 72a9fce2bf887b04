//! Vector math in the anisotropic unit square.
//!
//! Node positions live in [0,1]², but the two axes map to different pixel extents. Lengths and
//! angles are therefore measured after scaling `x` by the drawable width and `y` by the drawable
//! height, and mapped back afterwards.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Lateral gap (in pixels) kept between the two edges of a reciprocal pair.
pub const EDGE_SPACING: f64 = 2.0;

/// Half-angle of an arrowhead, in radians.
pub const HEAD_ANGLE: f64 = 0.5;

/// Returns `s` such that `(s * v.x * width, s * v.y * height)` is `length` pixels long.
///
/// `None` for the zero vector (no direction to scale along).
pub fn scale_to_length(v: Vector, width: f64, height: f64, length: f64) -> Option<f64> {
    let x2 = (v.x * width).powi(2);
    let y2 = (v.y * height).powi(2);
    let norm = (x2 + y2).sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(length.abs() / norm)
}

/// Rotates `v` by `angle` radians (counter-clockwise) in pixel space.
pub fn rotate(v: Vector, width: f64, height: f64, angle: f64) -> Vector {
    let dx = v.x * width;
    let dy = v.y * height;
    let (sin, cos) = angle.sin_cos();

    let rx = dx * cos - dy * sin;
    let ry = dx * sin + dy * cos;

    vector(rx / width, ry / height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_len(v: Vector, width: f64, height: f64) -> f64 {
        ((v.x * width).powi(2) + (v.y * height).powi(2)).sqrt()
    }

    #[test]
    fn scaled_vectors_have_the_requested_screen_length() {
        let cases = [
            (vector(1.0, 0.0), 696.0, 381.0, 10.0),
            (vector(-0.3, 0.7), 696.0, 381.0, 1.5),
            (vector(1e-4, -2.0), 100.0, 900.0, 42.0),
            (vector(5.0, 5.0), 1.0, 1.0, 0.25),
        ];
        for (v, w, h, len) in cases {
            let s = scale_to_length(v, w, h, len).expect("non-zero vector");
            let got = pixel_len(v * s, w, h);
            assert!((got - len).abs() < 1e-9, "{v:?}: {got} != {len}");
        }
    }

    #[test]
    fn zero_vector_has_no_scale() {
        assert_eq!(scale_to_length(vector(0.0, 0.0), 800.0, 450.0, 10.0), None);
    }

    #[test]
    fn rotation_round_trips() {
        let v = vector(0.25, -0.8);
        for angle in [0.5, -0.5, 1.0, 3.0] {
            let back = rotate(rotate(v, 696.0, 381.0, angle), 696.0, 381.0, -angle);
            assert!((back.x - v.x).abs() < 1e-12);
            assert!((back.y - v.y).abs() < 1e-12);
        }
    }

    #[test]
    fn rotation_is_measured_in_pixel_space() {
        // A quarter turn of a horizontal unit vector on a 2:1 canvas.
        let r = rotate(vector(1.0, 0.0), 200.0, 100.0, std::f64::consts::FRAC_PI_2);
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 2.0).abs() < 1e-12);
        assert!((pixel_len(r, 200.0, 100.0) - 200.0).abs() < 1e-9);
    }
}
