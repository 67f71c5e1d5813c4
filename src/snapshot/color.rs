/// One RGB sample, 8 bits per channel
pub type Rgb = [u8; 3];

/// Euclidean distance between two colors in plain RGB space
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Convert HSV (hue in degrees, saturation and value in 0..=1) to RGB
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let c = v * s;
    let h_prime = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_zero_for_same_color() {
        assert_eq!(color_distance([12, 200, 31], [12, 200, 31]), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric_and_non_negative() {
        let samples: [Rgb; 4] = [[0, 0, 0], [255, 255, 255], [10, 20, 30], [200, 3, 99]];
        for &a in &samples {
            for &b in &samples {
                let d = color_distance(a, b);
                assert!(d >= 0.0);
                assert_eq!(d, color_distance(b, a));
            }
        }
    }

    #[test]
    fn test_distance_value() {
        assert_eq!(color_distance([0, 0, 0], [3, 4, 0]), 5.0);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsv_to_rgb(42.0, 0.0, 0.0), [0, 0, 0]);
    }
}
