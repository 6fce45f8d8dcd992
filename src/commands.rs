use anyhow::Context;
use std::path::Path;
use userscript_meta::{inject_dist, UserScriptPlugin, UserScriptPluginOptions};

fn load_plugin(config: &Path) -> anyhow::Result<UserScriptPlugin> {
    let options = UserScriptPluginOptions::from_file(config).with_context(|| {
        format!(
            "Failed to read options from {}. Make sure the file exists and contains a \"headers\" object.",
            config.display()
        )
    })?;

    UserScriptPlugin::new(&options).context("Failed to build the UserScript header")
}

/// Print the wrapped header for an options file
pub fn print_header(config: &Path) -> anyhow::Result<()> {
    let plugin = load_plugin(config)?;
    print!("{}", plugin.header());
    Ok(())
}

/// Inject the header into the entry script of a build output directory
pub fn inject(config: &Path, dist: &Path, entry: &str) -> anyhow::Result<()> {
    let plugin = load_plugin(config)?;

    let path = inject_dist(dist, entry, &plugin).with_context(|| {
        format!(
            "Failed to inject header into {} (entry pattern '{}')",
            dist.display(),
            entry
        )
    })?;

    println!("{}", path.display());
    Ok(())
}
