//! Header injection step
//!
//! [`UserScriptPlugin`] is built once from the plugin options, which renders
//! and wraps the header up front. When the host build tool has produced its
//! artifacts, [`UserScriptPlugin::inject`] (or [`BuildPlugin::generate_bundle`])
//! prepends that header to the code of the entry artifact.
//!
//! Injection is not idempotent: running it twice on the same bundle adds the
//! header twice. Hosts call it once per build.

use crate::config::UserScriptPluginOptions;
use crate::error::{Error, Result};
use crate::header::{build_user_script_options, wrap_with_userscript_tag};
use crate::types::HeaderOptions;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Name reported by [`UserScriptPlugin::name`]
pub const PLUGIN_NAME: &str = "add-userscript-metaheader";

/// One output record of the host build
pub trait Artifact {
    /// Whether this record is the script's main entry
    fn is_entry(&self) -> bool;

    /// Mutable code payload, if the record carries emitted code
    fn code_mut(&mut self) -> Option<&mut String>;
}

/// Output record of a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleArtifact {
    /// Emitted code
    Chunk { is_entry: bool, code: String },
    /// Static asset without a code payload
    Asset { source: Vec<u8> },
    /// File left unread in an output directory
    OnDisk { path: PathBuf },
}

impl BundleArtifact {
    pub fn entry_chunk(code: impl Into<String>) -> Self {
        BundleArtifact::Chunk {
            is_entry: true,
            code: code.into(),
        }
    }

    pub fn chunk(code: impl Into<String>) -> Self {
        BundleArtifact::Chunk {
            is_entry: false,
            code: code.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            BundleArtifact::Chunk { code, .. } => Some(code),
            BundleArtifact::Asset { .. } | BundleArtifact::OnDisk { .. } => None,
        }
    }
}

impl Artifact for BundleArtifact {
    fn is_entry(&self) -> bool {
        matches!(self, BundleArtifact::Chunk { is_entry: true, .. })
    }

    fn code_mut(&mut self) -> Option<&mut String> {
        match self {
            BundleArtifact::Chunk { code, .. } => Some(code),
            BundleArtifact::Asset { .. } | BundleArtifact::OnDisk { .. } => None,
        }
    }
}

/// Artifacts of one build, keyed by file name
pub type Bundle = BTreeMap<String, BundleArtifact>;

/// A named build step run once after the host has generated its artifacts
pub trait BuildPlugin {
    fn name(&self) -> &str;

    /// Post-process the generated artifacts; an error aborts the build
    fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()>;
}

/// Prepends a precomputed UserScript header to the entry artifact
///
/// # Example
///
/// ```rust
/// use userscript_meta::{Bundle, BundleArtifact, HeaderOptions, UserScriptPlugin};
///
/// let plugin = UserScriptPlugin::from_headers(
///     &HeaderOptions::new().text("name", "Test").flag("noframes"),
/// )?;
///
/// let mut bundle = Bundle::new();
/// bundle.insert("main.js".to_string(), BundleArtifact::entry_chunk("run();"));
/// plugin.inject(bundle.values_mut())?;
///
/// assert_eq!(
///     bundle["main.js"].code(),
///     Some("// ==UserScript==\n// @name\tTest\n// @noframes\n// ==/UserScript==\nrun();")
/// );
/// # Ok::<(), userscript_meta::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct UserScriptPlugin {
    header: String,
}

impl UserScriptPlugin {
    /// Render and wrap the header from plugin options
    pub fn new(options: &UserScriptPluginOptions) -> Result<Self> {
        Self::from_headers(&options.headers)
    }

    /// Render and wrap the header from header options alone
    pub fn from_headers(headers: &HeaderOptions) -> Result<Self> {
        let block = build_user_script_options(headers)?;
        let header = wrap_with_userscript_tag(&block);
        debug!(bytes = header.len(), "prepared userscript header");
        Ok(Self { header })
    }

    pub fn name(&self) -> &str {
        PLUGIN_NAME
    }

    /// The wrapped header, including the closing marker's newline
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Prepend the header to a single code slot
    pub fn prepend_to(&self, slot: &mut String) {
        slot.insert_str(0, &self.header);
    }

    /// Prepend the header to the first artifact flagged as entry
    ///
    /// An entry without a code payload is left untouched.
    ///
    /// # Errors
    ///
    /// [`Error::EntryNotFound`] when no artifact is flagged as entry.
    pub fn inject<'a, A, I>(&self, artifacts: I) -> Result<()>
    where
        A: Artifact + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        let mut entries = artifacts.into_iter().filter(|artifact| artifact.is_entry());
        let entry = entries.next().ok_or(Error::EntryNotFound)?;

        let extra = entries.count();
        if extra > 0 {
            warn!(extra, "multiple entry artifacts, using the first");
        }

        match entry.code_mut() {
            Some(code) => {
                self.prepend_to(code);
                info!("injected userscript header into entry artifact");
            }
            None => debug!("entry artifact has no code payload, skipping"),
        }
        Ok(())
    }
}

impl BuildPlugin for UserScriptPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        self.inject(bundle.values_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_headers() -> HeaderOptions {
        HeaderOptions::new()
            .text("name", "Test")
            .text("version", "1.0.0")
            .text("description", "Test description")
            .text("author", "Test author")
            .text("match", "https://example.com/*")
            .text("namespace", "test")
    }

    /// Minimal host record used to exercise the trait seam
    struct HostChunk {
        entry: bool,
        code: Option<String>,
    }

    impl Artifact for HostChunk {
        fn is_entry(&self) -> bool {
            self.entry
        }

        fn code_mut(&mut self) -> Option<&mut String> {
            self.code.as_mut()
        }
    }

    #[test]
    fn test_plugin_name() {
        let plugin = UserScriptPlugin::from_headers(&HeaderOptions::new()).unwrap();
        assert_eq!(plugin.name(), "add-userscript-metaheader");
        assert_eq!(BuildPlugin::name(&plugin), "add-userscript-metaheader");
    }

    #[test]
    fn test_header_is_precomputed() {
        let plugin = UserScriptPlugin::from_headers(&test_headers()).unwrap();
        assert!(plugin.header().starts_with("// ==UserScript==\n// @name\tTest\n"));
        assert!(plugin.header().ends_with("// @namespace\ttest\n// ==/UserScript==\n"));
    }

    #[test]
    fn test_invalid_headers_fail_at_construction() {
        let result = UserScriptPlugin::from_headers(&HeaderOptions::new().text("", "x"));
        assert!(matches!(result, Err(Error::InvalidKey { .. })));
    }

    #[test]
    fn test_prepends_header_to_entry() {
        let plugin = UserScriptPlugin::from_headers(&test_headers()).unwrap();
        let mut bundle = Bundle::new();
        bundle.insert(
            "file.js".to_string(),
            BundleArtifact::entry_chunk(r#"console.log("Hello, world!");"#),
        );

        plugin.generate_bundle(&mut bundle).unwrap();

        let expected = "// ==UserScript==\n// @name\tTest\n// @version\t1.0.0\n\
                        // @description\tTest description\n// @author\tTest author\n\
                        // @match\thttps://example.com/*\n// @namespace\ttest\n\
                        // ==/UserScript==\nconsole.log(\"Hello, world!\");";
        assert_eq!(bundle["file.js"].code(), Some(expected));
    }

    #[test]
    fn test_non_entry_chunks_untouched() {
        let plugin = UserScriptPlugin::from_headers(&test_headers()).unwrap();
        let mut bundle = Bundle::new();
        bundle.insert("a-vendor.js".to_string(), BundleArtifact::chunk("vendor();"));
        bundle.insert("b-main.js".to_string(), BundleArtifact::entry_chunk("main();"));

        plugin.generate_bundle(&mut bundle).unwrap();

        assert_eq!(bundle["a-vendor.js"].code(), Some("vendor();"));
        assert!(bundle["b-main.js"].code().unwrap().ends_with("// ==/UserScript==\nmain();"));
    }

    #[test]
    fn test_no_entry_found() {
        let plugin = UserScriptPlugin::from_headers(&test_headers()).unwrap();

        let mut empty = Bundle::new();
        assert!(matches!(
            plugin.generate_bundle(&mut empty),
            Err(Error::EntryNotFound)
        ));

        let mut no_entry = Bundle::new();
        no_entry.insert("chunk.js".to_string(), BundleArtifact::chunk("x();"));
        let err = plugin.generate_bundle(&mut no_entry).unwrap_err();
        assert_eq!(err.to_string(), "No entry file found");
        assert_eq!(no_entry["chunk.js"].code(), Some("x();"));
    }

    #[test]
    fn test_entry_without_code_is_noop() {
        let plugin = UserScriptPlugin::from_headers(&test_headers()).unwrap();
        let mut records = vec![
            HostChunk {
                entry: false,
                code: Some("other();".to_string()),
            },
            HostChunk {
                entry: true,
                code: None,
            },
        ];

        plugin.inject(records.iter_mut()).unwrap();

        assert_eq!(records[0].code.as_deref(), Some("other();"));
        assert!(records[1].code.is_none());
    }

    #[test]
    fn test_first_entry_wins() {
        let plugin = UserScriptPlugin::from_headers(&HeaderOptions::new().text("name", "T")).unwrap();
        let mut records = vec![
            HostChunk {
                entry: true,
                code: Some("first();".to_string()),
            },
            HostChunk {
                entry: true,
                code: Some("second();".to_string()),
            },
        ];

        plugin.inject(records.iter_mut()).unwrap();

        assert!(records[0].code.as_deref().unwrap().starts_with("// ==UserScript=="));
        assert_eq!(records[1].code.as_deref(), Some("second();"));
    }

    #[test]
    fn test_prepend_to_slot() {
        let plugin = UserScriptPlugin::from_headers(&HeaderOptions::new()).unwrap();
        let mut slot = String::from("body();");
        plugin.prepend_to(&mut slot);
        assert_eq!(slot, "// ==UserScript==\n\n// ==/UserScript==\nbody();");
    }

    #[test]
    fn test_second_injection_prepends_again() {
        let plugin = UserScriptPlugin::from_headers(&HeaderOptions::new().text("name", "T")).unwrap();
        let mut bundle = Bundle::new();
        bundle.insert("main.js".to_string(), BundleArtifact::entry_chunk("m();"));

        plugin.generate_bundle(&mut bundle).unwrap();
        plugin.generate_bundle(&mut bundle).unwrap();

        let code = bundle["main.js"].code().unwrap();
        assert_eq!(code.matches("// ==UserScript==").count(), 2);
    }
}
