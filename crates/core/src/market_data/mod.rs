mod market_data_client;
mod market_data_traits;

pub use market_data_client::*;
pub use market_data_traits::*;
