mod coins_model;
mod coins_store;
mod coins_traits;

pub use coins_model::*;
pub use coins_store::*;
pub use coins_traits::*;
