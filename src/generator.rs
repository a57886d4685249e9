//! Generator Control Logic
//!
//! Operator-facing behavior of the signal generator. The engines here
//! take over the CPU while they run and hand control back once the
//! operator presses a key.

pub mod state;
pub mod timing;
pub mod modulation;
pub mod sweep;
pub mod command;
