//! Configuration section definitions.
//!
//! Each module corresponds to a section in `semdoc.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `enhance` | `[enhance]`  | Date locale, absent bids, highlights |
//! | `output`  | `[output]`   | JSON formatting                      |

mod enhance;
mod output;

pub use enhance::EnhanceConfig;
pub use output::OutputConfig;
