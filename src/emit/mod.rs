//! Code emission
//!
//! Turns an extraction table and processed root schema into Zod validator
//! declarations, and defines the formatting collaborator the conversion
//! pipeline awaits as its single suspension point.

mod formatter;
mod zod;

pub use formatter::{BuiltinFormatter, CodeFormatter, PassthroughFormatter, StyleParser};
pub use zod::{strip_strictness, EmittedSource, ZodEmitter};
