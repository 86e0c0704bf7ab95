//! Signatures re-identifying the execution of one example row.

use std::fmt;

/// Builds the canonical signature of an example row.
///
/// A signature is compared for equality with the `parameters` of the
/// [`ResultRecord`](../model/struct.ResultRecord.html)s of an outline.
/// Implementations must be deterministic and injective over non-empty rows:
/// two different rows never share a signature, even when their cells contain
/// characters the framework escapes.
///
/// ```
/// use verdict_api::signature::{ExampleSignatureBuilder, push_escaped};
///
/// #[derive(Debug)]
/// struct Piped;
///
/// impl ExampleSignatureBuilder for Piped {
///     fn build(&self, cells: &[&str]) -> String {
///         let mut signature = String::new();
///         for (i, cell) in cells.iter().enumerate() {
///             if i > 0 {
///                 signature.push('|');
///             }
///             push_escaped(&mut signature, cell, &['|']);
///         }
///         signature
///     }
/// }
///
/// assert_eq!("a\\|b|c", Piped.build(&["a|b", "c"]));
/// ```
pub trait ExampleSignatureBuilder: fmt::Debug + Send + Sync {
    /// Returns the signature of the row made of `cells`, in column order.
    fn build(&self, cells: &[&str]) -> String;
}

/// Appends `value` to `target`, prefixing backslashes and the `reserved` characters with a backslash.
pub fn push_escaped(target: &mut String, value: &str, reserved: &[char]) {
    for c in value.chars() {
        if c == '\\' || reserved.contains(&c) {
            target.push('\\');
        }
        target.push(c);
    }
}

/// Joins `cells` with `separator` after escaping each of them with [`push_escaped`](fn.push_escaped.html).
///
/// The separator characters must be part of `reserved` for the result to be injective.
pub fn join_escaped(cells: &[&str], separator: &str, reserved: &[char]) -> String {
    let mut signature = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            signature.push_str(separator);
        }
        push_escaped(&mut signature, cell, reserved);
    }
    signature
}
