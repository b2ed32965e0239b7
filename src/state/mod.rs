mod context;
mod store;

pub use context::*;
pub use store::*;
