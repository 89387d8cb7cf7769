/// Quill credential library
///
/// Syntactic validation of signup fields and the salted-hash scheme used
/// to store passwords. Everything here is pure: no I/O, no store access.

pub mod hash;
pub mod validate;
