//! RFC 8259 JSON parsing and encoding with strict UTF-8 validation
//! (RFC 3629) and insertion-order-preserving objects.
//!
//! The parser and the string encoder are both table-driven byte machines;
//! numbers keep their original textual form, and object keys iterate in
//! insertion order unless explicitly re-sorted.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod base64;
mod encoder;
mod ordered_map;
mod parser;
mod value;

pub use base64::{base64_decode, base64_encode, Base64Error};
pub use encoder::encode_string;
pub use ordered_map::{IndexedIter, Iter, OrderedMap};
pub use parser::{parse, parse_str};
pub use value::{Array, Kind, Map, NumberError, Value, Whitespace};

#[cfg(test)]
mod tests;
