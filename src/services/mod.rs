pub mod publisher;
pub mod puzzle_source;
pub mod today_resolver;

pub use publisher::{BskyPublisher, PostResult, Publisher};
pub use puzzle_source::{GithubPuzzleSource, PuzzleSource};
pub use today_resolver::{BrowserTodayResolver, TodayPuzzle, TodayResolver};
