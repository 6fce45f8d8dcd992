//! Option resolvers
//!
//! Turn one configuration entry into directive lines. Every line is built by
//! [`resolve_base_option`], so trimming and tab separation are identical for
//! scalar, list and map entries.
//!
//! ```text
//! // @noframes                      flag (boolean value)
//! // @version<TAB>1.0.0             scalar
//! // @resource<TAB>logo<TAB>url     map entry
//! ```

use crate::error::{Error, Result};
use crate::types::Scalar;

/// Format a single directive line
///
/// Booleans produce a flag-only line regardless of their value. Any other
/// scalar is trimmed and appended after a tab.
///
/// # Errors
///
/// [`Error::InvalidKey`] when `key` is empty after trimming.
///
/// # Example
///
/// ```rust
/// use userscript_meta::{resolve_base_option, Scalar};
///
/// let line = resolve_base_option(" version ", &Scalar::Text(" 1.0.0 ".into()))?;
/// assert_eq!(line, "// @version\t1.0.0");
///
/// let flag = resolve_base_option("noframes", &Scalar::Bool(false))?;
/// assert_eq!(flag, "// @noframes");
/// # Ok::<(), userscript_meta::Error>(())
/// ```
pub fn resolve_base_option(key: &str, value: &Scalar) -> Result<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidKey {
            key: key.to_string(),
        });
    }

    if value.is_bool() {
        return Ok(format!("// @{}", trimmed));
    }
    Ok(format!("// @{}\t{}", trimmed, value.to_string().trim()))
}

/// Format one directive line per list element, in order
///
/// An empty list yields no lines and skips key validation.
pub fn resolve_array_option(key: &str, values: &[Scalar]) -> Result<Vec<String>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    if key.trim().is_empty() {
        return Err(Error::InvalidKey {
            key: key.to_string(),
        });
    }

    values
        .iter()
        .map(|value| resolve_base_option(key, value))
        .collect()
}

/// Format one directive line per map entry, in insertion order
///
/// The sub-key and sub-value are joined with a tab before the line is
/// formatted. A boolean sub-value collapses to the sub-key alone. An empty
/// map yields no lines.
pub fn resolve_object_option(key: &str, values: &[(String, Scalar)]) -> Result<Vec<String>> {
    values
        .iter()
        .map(|(sub_key, sub_value)| {
            let joined = if sub_value.is_bool() {
                sub_key.trim().to_string()
            } else {
                format!("{}\t{}", sub_key.trim(), sub_value.to_string().trim())
            };
            resolve_base_option(key, &Scalar::Text(joined))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    #[test]
    fn test_base_string_value() {
        assert_eq!(
            resolve_base_option("key", &text("value")).unwrap(),
            "// @key\tvalue"
        );
    }

    #[test]
    fn test_base_number_values() {
        assert_eq!(
            resolve_base_option("version", &Scalar::Integer(1)).unwrap(),
            "// @version\t1"
        );
        assert_eq!(
            resolve_base_option("version", &Scalar::Float(2.5)).unwrap(),
            "// @version\t2.5"
        );
    }

    #[test]
    fn test_base_boolean_is_flag() {
        assert_eq!(
            resolve_base_option("key", &Scalar::Bool(true)).unwrap(),
            "// @key"
        );
        assert_eq!(
            resolve_base_option("key", &Scalar::Bool(false)).unwrap(),
            "// @key"
        );
    }

    #[test]
    fn test_base_trims_key_and_value() {
        assert_eq!(
            resolve_base_option("  name\t", &text("  Test  ")).unwrap(),
            "// @name\tTest"
        );
    }

    #[test]
    fn test_base_trim_is_idempotent() {
        let first = resolve_base_option(" key ", &text(" value ")).unwrap();
        let second = resolve_base_option("key", &text("value")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_base_empty_key() {
        assert!(matches!(
            resolve_base_option("", &text("value")),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            resolve_base_option("   ", &text("value")),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_array_empty_values() {
        assert!(resolve_array_option("key", &[]).unwrap().is_empty());
        // No key check when there is nothing to emit
        assert!(resolve_array_option("", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_array_string_values() {
        let lines = resolve_array_option("key", &[text("value1"), text("value2")]).unwrap();
        assert_eq!(lines, ["// @key\tvalue1", "// @key\tvalue2"]);
    }

    #[test]
    fn test_array_boolean_values() {
        let lines = resolve_array_option("key", &[Scalar::Bool(true), Scalar::Bool(false)]).unwrap();
        assert_eq!(lines, ["// @key", "// @key"]);
    }

    #[test]
    fn test_array_number_values() {
        let lines = resolve_array_option("key", &[Scalar::Integer(1), Scalar::Integer(2)]).unwrap();
        assert_eq!(lines, ["// @key\t1", "// @key\t2"]);
    }

    #[test]
    fn test_array_empty_key() {
        assert!(matches!(
            resolve_array_option("", &[text("value1")]),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_object_empty_values() {
        assert!(resolve_object_option("test_key", &[]).unwrap().is_empty());
        assert!(resolve_object_option("", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_object_key_and_values() {
        let values = vec![
            ("value1".to_string(), text("option1")),
            ("value2".to_string(), text("option2")),
        ];
        let lines = resolve_object_option("test_key", &values).unwrap();
        assert_eq!(
            lines,
            [
                "// @test_key\tvalue1\toption1",
                "// @test_key\tvalue2\toption2"
            ]
        );
    }

    #[test]
    fn test_object_boolean_values_collapse() {
        let values = vec![
            ("value1".to_string(), Scalar::Bool(true)),
            ("value2".to_string(), Scalar::Bool(false)),
        ];
        let lines = resolve_object_option("key", &values).unwrap();
        assert_eq!(lines, ["// @key\tvalue1", "// @key\tvalue2"]);
    }

    #[test]
    fn test_object_trims_map_key_and_value() {
        let values = vec![("  http://x/img.png  ".to_string(), text("  data:...  "))];
        let lines = resolve_object_option("resource", &values).unwrap();
        assert_eq!(lines, ["// @resource\thttp://x/img.png\tdata:..."]);
    }

    #[test]
    fn test_object_empty_key() {
        let values = vec![("value1".to_string(), text("option1"))];
        assert!(matches!(
            resolve_object_option("", &values),
            Err(Error::InvalidKey { .. })
        ));
    }
}
