/// Suffix and format appended to every exported composite
pub const OUTPUT_SUFFIX: &str = "_wm.png";

/// Output name used when the source had no file name at all
pub const DEFAULT_OUTPUT_NAME: &str = "image_wm.png";

/// Derive the export file name from the source file name.
///
/// A trailing `.ext` (ASCII letters, digits, underscore) is replaced by
/// `_wm.png`; a name without one gets `_wm.png` appended.
pub fn output_filename(source_name: Option<&str>) -> String {
    let Some(name) = source_name.filter(|name| !name.is_empty()) else {
        return DEFAULT_OUTPUT_NAME.to_string();
    };

    let stem = match name.rsplit_once('.') {
        Some((stem, ext)) if is_word(ext) => stem,
        _ => name,
    };
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

/// Stand-in source name for the `index`-th (zero based) unnamed image
pub fn fallback_source_name(index: usize) -> String {
    format!("image_{}.png", index + 1)
}

fn is_word(ext: &str) -> bool {
    !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
