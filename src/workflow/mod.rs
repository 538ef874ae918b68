pub mod caption;
pub mod selection;

pub use caption::{alt_text, compose_caption};
pub use selection::{datasets_for, pick_random, resolve_selection};
