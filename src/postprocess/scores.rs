/// Collapse the per-box per-class score buffer into one `(max score,
/// class index)` pair per box.
///
/// `scores` is row-major, box-major: box `i` owns
/// `scores[i * num_classes .. (i + 1) * num_classes]`. Ties resolve to the
/// first (lowest) class index achieving the maximum; the scan is a strict
/// `>` over ascending class indices.
pub fn reduce_scores(
    scores: &[f32],
    num_boxes: usize,
    num_classes: usize,
) -> (Vec<f32>, Vec<usize>) {
    let mut max_scores = Vec::with_capacity(num_boxes);
    let mut classes = Vec::with_capacity(num_boxes);

    for box_index in 0..num_boxes {
        let row = &scores[box_index * num_classes..(box_index + 1) * num_classes];
        let mut best = f32::NEG_INFINITY;
        let mut best_class = 0usize;
        for (class_index, &score) in row.iter().enumerate() {
            if score > best {
                best = score;
                best_class = class_index;
            }
        }
        max_scores.push(best);
        classes.push(best_class);
    }

    (max_scores, classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_best_class_per_box() {
        // Two boxes, two classes: box 0 favors class 0, box 1 favors class 1.
        let scores = [0.9, 0.1, 0.2, 0.95];
        let (max_scores, classes) = reduce_scores(&scores, 2, 2);
        assert_eq!(max_scores, vec![0.9, 0.95]);
        assert_eq!(classes, vec![0, 1]);
    }

    #[test]
    fn ties_resolve_to_the_lowest_class_index() {
        let scores = [0.5, 0.5, 0.5, 0.2, 0.7, 0.7];
        let (max_scores, classes) = reduce_scores(&scores, 2, 3);
        assert_eq!(max_scores, vec![0.5, 0.7]);
        assert_eq!(classes, vec![0, 1]);
    }

    #[test]
    fn matches_brute_force_argmax() {
        let num_boxes = 7;
        let num_classes = 5;
        // Deterministic pseudo-varied scores.
        let scores: Vec<f32> = (0..num_boxes * num_classes)
            .map(|i| ((i * 31 + 17) % 97) as f32 / 97.0)
            .collect();

        let (max_scores, classes) = reduce_scores(&scores, num_boxes, num_classes);

        for box_index in 0..num_boxes {
            let row = &scores[box_index * num_classes..(box_index + 1) * num_classes];
            let brute_best = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let brute_class = row.iter().position(|&s| s == brute_best).unwrap();
            assert_eq!(max_scores[box_index], brute_best);
            assert_eq!(classes[box_index], brute_class);
        }
    }

    #[test]
    fn all_negative_rows_still_reduce() {
        let scores = [-0.4, -0.2, -0.9];
        let (max_scores, classes) = reduce_scores(&scores, 1, 3);
        assert_eq!(max_scores, vec![-0.2]);
        assert_eq!(classes, vec![1]);
    }

    #[test]
    fn zero_boxes_reduce_to_empty() {
        let (max_scores, classes) = reduce_scores(&[], 0, 4);
        assert!(max_scores.is_empty());
        assert!(classes.is_empty());
    }
}
