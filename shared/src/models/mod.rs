//! Domain models for the weather dashboard

mod comparison;
mod favorite;
mod historical;
mod observation;
mod place;

pub use comparison::*;
pub use favorite::*;
pub use historical::*;
pub use observation::*;
pub use place::*;
