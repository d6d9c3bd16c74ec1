//! Entry classification
//!
//! Maps a file name found inside a package directory to its semantic kind.
//! Classification is purely syntactic (name and extension only); file
//! contents are never inspected.

use std::path::Path;

/// APK extension
const APK_EXTENSION: &str = "apk";

/// Expansion file extension
const OBB_EXTENSION: &str = "obb";

/// Attributes file extension
const ATTRIBUTES_EXTENSION: &str = "json";

/// Prefix of a main expansion file (`main.<version>.<package>.obb`)
const MAIN_OBB_PREFIX: &str = "main.";

/// Prefix of a patch expansion file (`patch.<version>.<package>.obb`)
const PATCH_OBB_PREFIX: &str = "patch.";

/// Semantic kind of a file inside a package directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// The cached application bundle
    Apk,
    /// Main expansion file
    MainObb,
    /// Patch expansion file
    PatchObb,
    /// Package metadata file
    AttributesJson,
    /// Anything the cache has no use for
    Unexpected,
}

/// Classify a file name.
///
/// Total function: unrecognized names fold into [`FileKind::Unexpected`]
/// rather than erroring. An `.obb` that follows neither expansion-file
/// naming convention is unexpected too.
pub fn classify(file_name: &str) -> FileKind {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match extension {
        APK_EXTENSION => FileKind::Apk,
        ATTRIBUTES_EXTENSION => FileKind::AttributesJson,
        OBB_EXTENSION => {
            if file_name.starts_with(MAIN_OBB_PREFIX) {
                FileKind::MainObb
            } else if file_name.starts_with(PATCH_OBB_PREFIX) {
                FileKind::PatchObb
            } else {
                FileKind::Unexpected
            }
        }
        _ => FileKind::Unexpected,
    }
}
