pub mod loader;
pub mod model;
pub mod wire;

pub use loader::{OpusMtLoader, OpusMtSettings};
pub use model::OpusMtModel;
