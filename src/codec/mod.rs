//! Binary row codec
//!
//! A row is encoded as the concatenation of its fields in schema order. Every
//! field has a fixed width, so the encoded size of a row depends only on its
//! schema:
//!
//! | Type        | Width          | Encoding                          |
//! |-------------|----------------|-----------------------------------|
//! | Int32       | 4              | zig-zag varint, zero padded       |
//! | Int64       | 8              | zig-zag varint, zero padded       |
//! | UInt32      | 4              | unsigned varint, zero padded      |
//! | UInt64      | 8              | unsigned varint, zero padded      |
//! | FixedString | declared       | raw bytes, exact length           |
//! | Date        | 8              | zig-zag varint of Unix seconds    |

pub mod decoding;
pub mod encoding;
pub mod error;
pub mod varint;

pub use self::decoding::decode_row;
pub use self::encoding::{encode_row, encode_values};
pub use self::error::{CodecError, CodecResult};
