//! Client-side collections: persisted favorites and the comparison set

mod comparison;
mod favorites;
mod storage;

pub use comparison::*;
pub use favorites::*;
pub use storage::*;
