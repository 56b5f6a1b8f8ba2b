//! Path normalization per dialect.

use std::borrow::Cow;

use crate::domain::{
    registry,
    value_objects::{DialectId, PathStyle},
};

/// Rewrite a canonical `/`-separated relative path into the separator
/// convention of `dialect`. No quoting happens here.
pub fn normalize(relative_path: &str, dialect: DialectId) -> Cow<'_, str> {
    normalize_for_style(relative_path, registry::descriptor(dialect).path_style)
}

pub fn normalize_for_style(relative_path: &str, style: PathStyle) -> Cow<'_, str> {
    match style {
        PathStyle::Posix => Cow::Borrowed(relative_path),
        PathStyle::Windows if relative_path.contains('/') => {
            Cow::Owned(relative_path.replace('/', "\\"))
        }
        PathStyle::Windows => Cow::Borrowed(relative_path),
    }
}
