//! Website build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use slipway_assemble::{AssembleConfig, Assembler, AssetSource, IndexSource};

use crate::Cli;

/// Configuration file structure (site.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    assets: AssetsConfig,
}

#[derive(Debug, Deserialize, Default)]
struct SiteConfig {
    /// Directory containing the built game artifacts
    game_build: Option<String>,
    /// Destination directory for the assembled site
    output: Option<String>,
    #[serde(default)]
    force_https: bool,
    #[serde(default)]
    clear_first: bool,
    /// Standalone index.html template to copy into the site
    index_template: Option<String>,
    /// Take index.html from the game build instead of a template
    #[serde(default)]
    index_from_build: bool,
}

#[derive(Debug, Deserialize, Default)]
struct AssetsConfig {
    /// Copy this whole directory tree into the site
    dir: Option<String>,
    /// Copy these files individually into the site root
    files: Option<Vec<String>>,
}

/// Load configuration from site.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Merge CLI flags over the config file into an assembly configuration.
/// CLI flags win; file values fill the gaps; built-in defaults come last.
fn resolve(cli: &Cli, file: ConfigFile, url: Option<String>) -> AssembleConfig {
    let index_source = if file.site.index_from_build {
        IndexSource::GameBuild
    } else {
        let template = file
            .site
            .index_template
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("src/website/index.html"));
        IndexSource::Template(template)
    };

    let asset_source = if let Some(dir) = file.assets.dir {
        AssetSource::Tree(PathBuf::from(dir))
    } else if let Some(files) = file.assets.files {
        AssetSource::Files(files.into_iter().map(PathBuf::from).collect())
    } else {
        AssembleConfig::default().asset_source
    };

    AssembleConfig {
        game_build_path: cli
            .game_build_path
            .clone()
            .or_else(|| file.site.game_build.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("build")),
        build_path: cli
            .build_path
            .clone()
            .or_else(|| file.site.output.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("build-website")),
        url,
        force_https: cli.force_url_https || file.site.force_https,
        clear_first: cli.clear_first || file.site.clear_first,
        index_source,
        asset_source,
    }
}

/// Run the build command.
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("Assembling website...");

    let file_config = load_config(&cli.config)?;
    let url = std::env::var("URL").ok();
    let config = resolve(&cli, file_config, url);

    let report = Assembler::new(config).assemble()?;

    tracing::info!(
        "Copied {} files and replaced {} placeholders in {}ms",
        report.files_copied,
        report.substitutions,
        report.duration_ms
    );

    tracing::info!("Output: {}", report.build_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("slipway").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_the_classic_layout() {
        let config = resolve(&cli(&[]), ConfigFile::default(), None);

        assert_eq!(config.game_build_path, PathBuf::from("build"));
        assert_eq!(config.build_path, PathBuf::from("build-website"));
        assert!(!config.force_https);
        assert!(!config.clear_first);
        assert!(matches!(
            config.index_source,
            IndexSource::Template(ref p) if p == &PathBuf::from("src/website/index.html")
        ));
        assert!(matches!(config.asset_source, AssetSource::Files(ref f) if f.len() == 2));
    }

    #[test]
    fn cli_flags_override_config_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [site]
            game_build = "dist/game"
            output = "public"
            "#,
        )
        .unwrap();

        let config = resolve(&cli(&["-b", "out", "--force-url-https"]), file, None);

        assert_eq!(config.game_build_path, PathBuf::from("dist/game"));
        assert_eq!(config.build_path, PathBuf::from("out"));
        assert!(config.force_https);
    }

    #[test]
    fn assets_dir_selects_the_tree_strategy() {
        let file: ConfigFile = toml::from_str(
            r#"
            [assets]
            dir = "assets"
            "#,
        )
        .unwrap();

        let config = resolve(&cli(&[]), file, None);
        assert!(matches!(
            config.asset_source,
            AssetSource::Tree(ref p) if p == &PathBuf::from("assets")
        ));
    }

    #[test]
    fn index_from_build_skips_the_template() {
        let file: ConfigFile = toml::from_str(
            r#"
            [site]
            index_from_build = true
            "#,
        )
        .unwrap();

        let config = resolve(&cli(&[]), file, None);
        assert!(matches!(config.index_source, IndexSource::GameBuild));
    }
}
