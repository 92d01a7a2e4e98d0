use anyhow::anyhow;

use crate::error::DetectError;

/// Raw forward-pass output, produced fresh per inference call and consumed
/// by score reduction and box decoding.
#[derive(Clone, Debug, Default)]
pub struct RawInferenceOutput {
    /// `num_boxes * num_classes` scores, row-major, box-major.
    pub scores: Vec<f32>,
    /// `num_boxes * 4` normalized `(y_min, x_min, y_max, x_max)` quadruples
    /// in `[0, 1]`.
    pub boxes: Vec<f32>,
    pub num_boxes: usize,
    pub num_classes: usize,
}

impl RawInferenceOutput {
    /// Check buffer lengths against the declared shape.
    ///
    /// Exactly one output format is supported; a mismatch means the graph
    /// is not a single-stage box+score detector and is reported as an
    /// inference error rather than guessed around.
    pub fn validate(&self) -> Result<(), DetectError> {
        let expected_scores = self
            .num_boxes
            .checked_mul(self.num_classes)
            .ok_or_else(|| DetectError::Inference(anyhow!("score tensor shape overflows")))?;
        if self.scores.len() != expected_scores {
            return Err(DetectError::Inference(anyhow!(
                "score buffer holds {} values, shape {}x{} needs {}",
                self.scores.len(),
                self.num_boxes,
                self.num_classes,
                expected_scores
            )));
        }
        let expected_boxes = self
            .num_boxes
            .checked_mul(4)
            .ok_or_else(|| DetectError::Inference(anyhow!("box tensor shape overflows")))?;
        if self.boxes.len() != expected_boxes {
            return Err(DetectError::Inference(anyhow!(
                "box buffer holds {} values, {} boxes need {}",
                self.boxes.len(),
                self.num_boxes,
                expected_boxes
            )));
        }
        Ok(())
    }

    /// Coordinate quadruple of box `index`. Callers pass indices below
    /// `num_boxes` on a validated output.
    pub fn box_at(&self, index: usize) -> [f32; 4] {
        let base = index * 4;
        [
            self.boxes[base],
            self.boxes[base + 1],
            self.boxes[base + 2],
            self.boxes[base + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_shapes_validate() {
        let output = RawInferenceOutput {
            scores: vec![0.0; 6],
            boxes: vec![0.0; 8],
            num_boxes: 2,
            num_classes: 3,
        };
        assert!(output.validate().is_ok());
    }

    #[test]
    fn score_length_mismatch_is_inference_error() {
        let output = RawInferenceOutput {
            scores: vec![0.0; 5],
            boxes: vec![0.0; 8],
            num_boxes: 2,
            num_classes: 3,
        };
        let err = output.validate().unwrap_err();
        assert!(matches!(err, DetectError::Inference(_)));
    }

    #[test]
    fn box_length_mismatch_is_inference_error() {
        let output = RawInferenceOutput {
            scores: vec![0.0; 6],
            boxes: vec![0.0; 7],
            num_boxes: 2,
            num_classes: 3,
        };
        let err = output.validate().unwrap_err();
        assert!(matches!(err, DetectError::Inference(_)));
    }

    #[test]
    fn box_at_reads_quadruples() {
        let output = RawInferenceOutput {
            scores: vec![0.0; 2],
            boxes: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8],
            num_boxes: 2,
            num_classes: 1,
        };
        assert_eq!(output.box_at(1), [0.5, 0.6, 0.7, 0.8]);
    }
}
