//! # userscript-meta - UserScript metadata header generator
//!
//! This library renders the `// ==UserScript==` metadata block used by
//! userscript managers (Greasemonkey, Tampermonkey, Violentmonkey) from a
//! typed configuration, and prepends it to the entry artifact of a build.
//!
//! ## Features
//!
//! - Ordered header configuration with scalar, list and map directives
//! - Uniform trimming and tab-separated formatting for every directive line
//! - Boolean directives rendered as flag-only lines (`// @noframes`)
//! - Header computed once and injected into the entry artifact of a bundle
//! - JSON options files that keep the directive order of the document
//! - Injection into a bundler's output directory
//!
//! ## Quick Start
//!
//! ### Building a Header
//!
//! ```rust
//! use userscript_meta::{build_user_script_options, wrap_with_userscript_tag, HeaderOptions};
//!
//! let options = HeaderOptions::new()
//!     .text("name", "Example")
//!     .text("namespace", "https://example.com")
//!     .push("version", "1.2.0")
//!     .list("match", ["https://example.com/*", "https://www.example.com/*"])
//!     .map("resource", [("logo", "https://example.com/logo.png")])
//!     .flag("noframes");
//!
//! let block = build_user_script_options(&options)?;
//! let header = wrap_with_userscript_tag(&block);
//!
//! assert_eq!(
//!     header,
//!     "// ==UserScript==\n\
//!      // @name\tExample\n\
//!      // @namespace\thttps://example.com\n\
//!      // @version\t1.2.0\n\
//!      // @match\thttps://example.com/*\n\
//!      // @match\thttps://www.example.com/*\n\
//!      // @resource\tlogo\thttps://example.com/logo.png\n\
//!      // @noframes\n\
//!      // ==/UserScript==\n"
//! );
//! # Ok::<(), userscript_meta::Error>(())
//! ```
//!
//! ### Injecting into a Bundle
//!
//! ```rust
//! use userscript_meta::{BuildPlugin, Bundle, BundleArtifact, UserScriptPlugin, UserScriptPluginOptions};
//!
//! let options = UserScriptPluginOptions::from_json_str(
//!     r#"{"headers": {"name": "Example", "grant": "none"}}"#,
//! )?;
//! let plugin = UserScriptPlugin::new(&options)?;
//!
//! let mut bundle = Bundle::new();
//! bundle.insert("index.js".to_string(), BundleArtifact::entry_chunk("start();"));
//! plugin.generate_bundle(&mut bundle)?;
//!
//! assert!(bundle["index.js"].code().unwrap().starts_with("// ==UserScript==\n// @name\tExample\n"));
//! # Ok::<(), userscript_meta::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All functions return [`Result<T, Error>`]. Nothing is recovered
//! internally; the first invalid entry or a missing entry artifact aborts
//! the operation:
//!
//! ```rust
//! use userscript_meta::{build_user_script_options, Error, HeaderOptions};
//!
//! let options = HeaderOptions::new().text("  ", "nameless");
//! match build_user_script_options(&options) {
//!     Ok(block) => println!("{}", block),
//!     Err(Error::InvalidKey { key }) => eprintln!("bad key {:?}", key),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

// Re-export all public types at crate root
pub use types::{HeaderOptions, Numeric, OptionValue, RunAt, Scalar};

// Re-export error types
pub use error::{Error, Result};

pub use config::UserScriptPluginOptions;

// Re-export all public functions at crate root
pub use header::{build_user_script_options, wrap_with_userscript_tag, CLOSE_TAG, OPEN_TAG};
pub use resolver::{resolve_array_option, resolve_base_option, resolve_object_option};

pub use plugin::{Artifact, BuildPlugin, Bundle, BundleArtifact, UserScriptPlugin, PLUGIN_NAME};

pub use dist::{inject_dist, load_dist_bundle, write_dist_bundle};

// All modules are private - use re-exports above for public API
mod config;
mod dist;
mod error;
mod header;
mod plugin;
mod resolver;
mod types;
