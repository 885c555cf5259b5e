pub mod protocol_state;

pub use protocol_state::*;
