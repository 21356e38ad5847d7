//! Domain types and the ports the round-up depends on.

pub mod account;
pub mod amount;
pub mod ports;
pub mod round_up;
pub mod savings_goal;
pub mod transaction;
