pub mod emergency_pause;
pub mod initialize;
pub mod mint_lever;
pub mod mint_stable;
pub mod port;
pub mod redeem_lever;
pub mod redeem_stable;
pub mod refresh_pyth_price;
pub mod sync_exchange_rate;
pub mod update_parameters;
pub mod update_prices;

pub use emergency_pause::*;
pub use initialize::*;
pub use mint_lever::*;
pub use mint_stable::*;
pub use redeem_lever::*;
pub use redeem_stable::*;
pub use refresh_pyth_price::*;
pub use sync_exchange_rate::*;
pub use update_parameters::*;
pub use update_prices::*;
