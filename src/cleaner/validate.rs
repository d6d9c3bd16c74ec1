//! Package validation
//!
//! Applies the structural rules to one package directory's classified
//! children. Pure function, no I/O: the scanner gathers the counts, the
//! validator only judges them.

use std::fmt;

use crate::cleaner::classify::FileKind;

/// Classified-children counts for one package directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageContents {
    pub apk_count: usize,
    pub main_obb_count: usize,
    pub patch_obb_count: usize,
    pub attributes_count: usize,
    pub unexpected_count: usize,
    pub has_subdirectory: bool,
}

impl PackageContents {
    /// Record one classified child file
    pub fn record(&mut self, kind: FileKind) {
        match kind {
            FileKind::Apk => self.apk_count += 1,
            FileKind::MainObb => self.main_obb_count += 1,
            FileKind::PatchObb => self.patch_obb_count += 1,
            FileKind::AttributesJson => self.attributes_count += 1,
            FileKind::Unexpected => self.unexpected_count += 1,
        }
    }
}

/// Why a package directory failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    HasSubdirectory,
    UnexpectedFile,
    BadApkCount(usize),
    BadAttributesCount(usize),
    TooManyMainObb(usize),
    TooManyPatchObb(usize),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::HasSubdirectory => write!(f, "contains a subdirectory"),
            Violation::UnexpectedFile => write!(f, "contains an unexpected file"),
            Violation::BadApkCount(n) => write!(f, "expected exactly 1 APK, found {}", n),
            Violation::BadAttributesCount(n) => {
                write!(f, "expected exactly 1 attributes file, found {}", n)
            }
            Violation::TooManyMainObb(n) => {
                write!(f, "expected at most 1 main expansion file, found {}", n)
            }
            Violation::TooManyPatchObb(n) => {
                write!(f, "expected at most 1 patch expansion file, found {}", n)
            }
        }
    }
}

impl Violation {
    /// Stable short code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Violation::HasSubdirectory => "has_subdirectory",
            Violation::UnexpectedFile => "unexpected_file",
            Violation::BadApkCount(_) => "bad_apk_count",
            Violation::BadAttributesCount(_) => "bad_attributes_count",
            Violation::TooManyMainObb(_) => "too_many_main_obb",
            Violation::TooManyPatchObb(_) => "too_many_patch_obb",
        }
    }
}

/// Validate one package directory's contents.
///
/// Any single violation condemns the whole directory; the first failing
/// rule (in the fixed order below) names the reported reason.
pub fn validate(contents: &PackageContents) -> Result<(), Violation> {
    if contents.has_subdirectory {
        return Err(Violation::HasSubdirectory);
    }
    if contents.unexpected_count > 0 {
        return Err(Violation::UnexpectedFile);
    }
    if contents.apk_count != 1 {
        return Err(Violation::BadApkCount(contents.apk_count));
    }
    if contents.attributes_count != 1 {
        return Err(Violation::BadAttributesCount(contents.attributes_count));
    }
    if contents.main_obb_count > 1 {
        return Err(Violation::TooManyMainObb(contents.main_obb_count));
    }
    if contents.patch_obb_count > 1 {
        return Err(Violation::TooManyPatchObb(contents.patch_obb_count));
    }
    Ok(())
}
