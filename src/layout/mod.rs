pub mod geometry;
pub mod text;

pub use geometry::{Grid, Orientation, Point, Segment, SignatureNode};
pub use text::{FittedText, Flow, TextFitter};
