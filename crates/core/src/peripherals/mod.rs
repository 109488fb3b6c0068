pub mod indicators;
pub mod input;
pub mod matrix;

pub use indicators::Indicators;
pub use input::{line_offset, InputLines, InputPins};
pub use matrix::{Frame, MatrixDisplay};
