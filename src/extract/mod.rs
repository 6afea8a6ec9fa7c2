//! Embedded-JSON extraction
//!
//! Finds the first syntactically balanced JSON object or array inside
//! arbitrary surrounding text (log lines, rendered documentation, code
//! samples with prose around them).
//!
//! # Overview
//!
//! Extraction never fails loudly: text without a balanced bracket pair
//! yields `None`, and a candidate that does not parse as JSON is treated
//! as "no value here" rather than an error.

mod scanner;

pub use scanner::{extract_balanced_json, parse_embedded_json};
