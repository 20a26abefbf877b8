//! Storage file name derivation.
//!
//! An uploaded `cat.png` is stored as `cat-<millis>.png`, where `millis` is
//! the Unix time in milliseconds when the name was generated. Two uploads of
//! the same original name in the same millisecond get the same stored name.
//!
//! The base is everything before the *first* occurrence of the extension,
//! not the last dot: `image.pngsomething.png` has extension `.png` and base
//! `image`.

use chrono::Utc;

/// Strip any directory components from a client-supplied file name.
fn file_component(original_name: &str) -> &str {
    original_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original_name)
}

/// Extension of `name` from its last dot, or `""` if there is none.
///
/// A dot that starts the name does not begin an extension (`.bashrc`), and
/// `..` has none. Other leading dots do not matter: `..png` has `.png`.
pub fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(_) if name == ".." => "",
        Some(i) => &name[i..],
    }
}

/// Part of `name` before the first occurrence of `extension`.
///
/// An empty extension yields the whole name.
pub fn base_name<'a>(name: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return name;
    }
    match name.find(extension) {
        Some(i) => &name[..i],
        None => name,
    }
}

/// Derive the stored name for `original_name` at the given timestamp.
pub fn stored_name_at(original_name: &str, timestamp_millis: i64) -> String {
    let name = file_component(original_name);
    let ext = extension(name);
    let base = base_name(name, ext);
    format!("{base}-{timestamp_millis}{ext}")
}

/// Derive the stored name for `original_name` using the current time.
pub fn stored_name(original_name: &str) -> String {
    stored_name_at(original_name, Utc::now().timestamp_millis())
}
