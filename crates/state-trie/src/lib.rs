//! # state-trie
//!
//! Key-compaction helpers for the Merkle-Patricia state trie.
//!
//! Trie traversal works on half-byte nibbles; storage works on packed bytes.
//! This crate converts between the two: a key expands to a nibble path with
//! a terminator marker, and a path packs into the compact encoding whose
//! first byte carries the terminator and odd-length flags.

pub mod nibbles;

pub use nibbles::{NibblePath, TERMINATOR};
