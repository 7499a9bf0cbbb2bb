//! Document state and logic (UI-agnostic).

mod ops;
mod state;
mod view;

pub use state::{Document, Selection};
