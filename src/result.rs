use serde::Serialize;

/// Pixel-space rectangle of a detection on the source image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Final labeled detection.
///
/// A `detect` call returns detections in suppression emission order, i.e.
/// score-descending among the survivors, not in raw box order.
#[derive(Clone, Debug, Serialize)]
pub struct Detection {
    /// Class name from the label table.
    pub class: String,
    /// Best class score in `[0, 1]`.
    pub score: f32,
    /// Box in pixel units of the source image.
    #[serde(rename = "boundingBox")]
    pub bounding_box: BoundingBox,
}
