pub mod dataset;
pub mod grid;
pub mod puzzle;
pub mod selection;
pub mod styled_text;

pub use dataset::Dataset;
pub use grid::Grid;
pub use puzzle::{Example, Puzzle, TestCase};
pub use selection::{PuzzleRequest, Selection};
pub use styled_text::{LinkSpan, StyledText, TextRun};
