//! Swizzle classification and normalization
//!
//! Three naming conventions select the same four axes: `xyzw` (positions),
//! `rgba` (colors) and `stpq` (texture coordinates). Position `i` means the
//! same axis in every convention, so any swizzle maps onto the canonical
//! `xyzw` alphabet character by character.

use crate::error::CompilationError;

/// Component alphabets, canonical convention first
pub const CONVENTIONS: [&str; 3] = ["xyzw", "rgba", "stpq"];

/// Canonical component alphabet
pub const CANONICAL: &str = CONVENTIONS[0];

/// Maximum number of components a swizzle can select
pub const MAX_COMPONENTS: usize = 4;

/// True if `swz` contains at least one component character of any convention.
///
/// This is a cheap containment test, not validation: `"xg"` or `"xm"` pass.
/// Use [`is_valid_swizzle`] for an anchored check.
pub fn looks_like_swizzle(swz: &str) -> bool {
    CONVENTIONS
        .iter()
        .any(|alphabet| swz.chars().any(|c| alphabet.contains(c)))
}

/// Rewrite a swizzle into the canonical `xyzw` convention.
///
/// Returns `None` when `swz` is not recognized as a swizzle at all. Characters
/// outside every alphabet are left in place.
pub fn normalize(swz: &str) -> Option<String> {
    if !looks_like_swizzle(swz) {
        return None;
    }

    Some(
        swz.chars()
            .map(|c| match c {
                'r' | 's' => 'x',
                'g' | 't' => 'y',
                'b' | 'p' => 'z',
                'a' | 'q' => 'w',
                other => other,
            })
            .collect(),
    )
}

/// True iff every character of `swz` is drawn from `allowed`.
///
/// The empty swizzle is valid against any set.
pub fn is_valid_swizzle(swz: &str, allowed: &str) -> bool {
    swz.chars().all(|c| allowed.contains(c))
}

/// The first `len` canonical components (`canonical_prefix(2) == "xy"`)
pub fn canonical_prefix(len: usize) -> &'static str {
    &CANONICAL[..len.min(MAX_COMPONENTS)]
}

/// True if the swizzle already lists its components in ascending canonical order
/// starting at `x`, i.e. it selects a register the way it is laid out.
pub fn is_canonical(swz: &str) -> bool {
    normalize(swz).is_some_and(|n| n == canonical_prefix(n.len()))
}

/// Validate a source-level swizzle against a value with `components` components.
///
/// Returns the canonical form on success.
pub fn check_components(swz: &str, components: usize) -> Result<String, CompilationError> {
    let normalized = normalize(swz).ok_or_else(|| CompilationError::NotASwizzle {
        text: swz.to_string(),
    })?;

    if !is_valid_swizzle(&normalized, CANONICAL) || !same_convention(swz) {
        return Err(CompilationError::ComponentMismatch {
            swizzle: swz.to_string(),
            allowed: CANONICAL.to_string(),
        });
    }

    if normalized.is_empty() || normalized.len() > MAX_COMPONENTS {
        return Err(CompilationError::NotASwizzle {
            text: swz.to_string(),
        });
    }

    if !is_valid_swizzle(&normalized, canonical_prefix(components)) {
        return Err(CompilationError::SwizzleOutOfRange {
            swizzle: swz.to_string(),
            components,
        });
    }

    Ok(normalized)
}

/// True if all characters belong to a single convention
fn same_convention(swz: &str) -> bool {
    CONVENTIONS
        .iter()
        .any(|alphabet| is_valid_swizzle(swz, alphabet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("rgba").as_deref(), Some("xyzw"));
        assert_eq!(normalize("stq").as_deref(), Some("xzw"));
        assert_eq!(normalize("xyz").as_deref(), Some("xyz"));
        assert_eq!(normalize("bgr").as_deref(), Some("zyx"));
        assert_eq!(normalize("m"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_looks_like_swizzle_is_containment() {
        assert!(looks_like_swizzle("x"));
        assert!(looks_like_swizzle("xg"));
        assert!(looks_like_swizzle("mx"));
        assert!(!looks_like_swizzle("mn"));
    }

    #[test]
    fn test_is_valid_swizzle_is_anchored() {
        assert!(is_valid_swizzle("xy", "xyzw"));
        assert!(is_valid_swizzle("yx", "xy"));
        assert!(!is_valid_swizzle("xz", "xy"));
        assert!(!is_valid_swizzle("mx", "xyzw"));
        assert!(is_valid_swizzle("", "x"));
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("x"));
        assert!(is_canonical("xyz"));
        assert!(is_canonical("rg"));
        assert!(!is_canonical("yx"));
        assert!(!is_canonical("y"));
        assert!(!is_canonical("xz"));
    }

    #[test]
    fn test_check_components() {
        assert_eq!(check_components("rg", 2).unwrap(), "xy");
        assert_eq!(check_components("yxx", 3).unwrap(), "yxx");

        assert!(matches!(
            check_components("xyz", 2),
            Err(CompilationError::SwizzleOutOfRange { components: 2, .. })
        ));
        assert!(matches!(
            check_components("xg", 4),
            Err(CompilationError::ComponentMismatch { .. })
        ));
        assert!(matches!(
            check_components("foo", 4),
            Err(CompilationError::NotASwizzle { .. })
        ));
        assert!(matches!(
            check_components("xyzwx", 4),
            Err(CompilationError::NotASwizzle { .. })
        ));
    }
}
