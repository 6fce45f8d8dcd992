//! Header block assembly
//!
//! [`build_user_script_options`] turns a whole [`HeaderOptions`] into the
//! newline-joined directive block, and [`wrap_with_userscript_tag`] frames a
//! block with the `==UserScript==` markers.

use crate::error::Result;
use crate::resolver::{resolve_array_option, resolve_base_option, resolve_object_option};
use crate::types::{HeaderOptions, OptionValue};
use tracing::debug;

/// Opening marker line of a metadata block
pub const OPEN_TAG: &str = "// ==UserScript==";

/// Closing marker line of a metadata block
pub const CLOSE_TAG: &str = "// ==/UserScript==";

/// Build the directive block for a configuration
///
/// Lines follow the configuration's entry order, and list or map entries
/// expand in their own order. The block has no trailing newline; an empty
/// configuration yields an empty string. The first invalid entry aborts the
/// build.
///
/// # Example
///
/// ```rust
/// use userscript_meta::{build_user_script_options, HeaderOptions};
///
/// let options = HeaderOptions::new()
///     .text("name", "Test")
///     .list("require", ["jquery", "lodash"]);
///
/// assert_eq!(
///     build_user_script_options(&options)?,
///     "// @name\tTest\n// @require\tjquery\n// @require\tlodash"
/// );
/// # Ok::<(), userscript_meta::Error>(())
/// ```
pub fn build_user_script_options(options: &HeaderOptions) -> Result<String> {
    let mut meta: Vec<String> = Vec::new();

    for (key, value) in options.entries() {
        match value {
            OptionValue::List(values) => meta.extend(resolve_array_option(key, values)?),
            OptionValue::Map(values) => meta.extend(resolve_object_option(key, values)?),
            OptionValue::Scalar(value) => meta.push(resolve_base_option(key, value)?),
        }
    }

    debug!(
        entries = options.len(),
        lines = meta.len(),
        "built userscript directive block"
    );
    Ok(meta.join("\n"))
}

/// Frame a block with the UserScript opening and closing markers
pub fn wrap_with_userscript_tag(block: &str) -> String {
    format!("{}\n{}\n{}\n", OPEN_TAG, block, CLOSE_TAG)
}
