//! UI utilities for terminal output
//!
//! Progress spinners shown while list results are being paged in.

mod spinner;

pub use spinner::{create_spinner, finish_spinner, update_spinner};
