//! Command Handlers module
//!
//! Handlers that turn expense-form commands into decoded boletos.

mod commands;
mod decode_handler;


pub use commands::*;
pub use decode_handler::{decode_entry, DecodeBatchHandler, DecodeBoletoHandler};
