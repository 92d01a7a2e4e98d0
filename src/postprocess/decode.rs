use crate::result::BoundingBox;

/// Map a normalized `(y_min, x_min, y_max, x_max)` box onto the pixel grid
/// of a `width` x `height` image.
///
/// Pure arithmetic; non-finite inputs propagate into the result untouched.
pub fn decode(raw: [f32; 4], width: u32, height: u32) -> BoundingBox {
    let [y_min, x_min, y_max, x_max] = raw;
    let w = width as f32;
    let h = height as f32;
    BoundingBox {
        x: x_min * w,
        y: y_min * h,
        width: (x_max - x_min) * w,
        height: (y_max - y_min) * h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_frame_box_round_trips() {
        let rect = decode([0.0, 0.0, 1.0, 1.0], 640, 480);
        assert_eq!(
            rect,
            BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 640.0,
                height: 480.0,
            }
        );
    }

    #[test]
    fn scales_each_axis_independently() {
        let rect = decode([0.25, 0.5, 0.75, 1.0], 200, 100);
        assert_eq!(rect.x, 100.0);
        assert_eq!(rect.y, 25.0);
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 50.0);
    }

    #[test]
    fn non_finite_input_propagates() {
        let rect = decode([f32::NAN, 0.0, 1.0, 1.0], 10, 10);
        assert!(rect.y.is_nan());
        assert!(rect.height.is_nan());
        assert_eq!(rect.x, 0.0);
    }
}
