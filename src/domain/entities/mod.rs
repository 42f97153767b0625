//! Domain entity definitions.

mod asset;
mod category;
mod load_state;

pub use asset::Asset;
pub use category::{Category, FAVORITES_NAME};
pub use load_state::LoadState;
