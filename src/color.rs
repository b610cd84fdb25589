//! Deterministic edge colors derived from a foreign key's identity.
//!
//! The color depends only on the `(source table, source column, target table,
//! target column)` tuple, so the same relationship gets the same color no matter
//! which SQL syntax declared it.

use md5::{Digest, Md5};

/// Keeps the high bit and bit 3 of every channel: each of R, G, B is one of
/// `0x00`, `0x08`, `0x80`, `0x88`.
pub const CHANNEL_MASK: u32 = 0x88_8888;

/// Compute the edge color for a foreign key.
///
/// Hashes `"{t1}-{c1}-{t2}-{c2}"` with MD5, takes the first 24 bits of the
/// digest, masks them with [`CHANNEL_MASK`] and formats the result as `#rrggbb`.
#[must_use]
pub fn edge_color(source_table: &str, source_column: &str, target_table: &str, target_column: &str) -> String {
    let key = format!("{source_table}-{source_column}-{target_table}-{target_column}");
    let digest = Md5::digest(key.as_bytes());
    let prefix = (u32::from(digest[0]) << 16) | (u32::from(digest[1]) << 8) | u32::from(digest[2]);
    format!("#{:06x}", prefix & CHANNEL_MASK)
}

#[cfg(test)]
#[path = "color_test.rs"]
mod tests;
