//! Website assembler.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use crate::assets::{self, AssetSource};
use crate::templates;

/// Fixed set of game artifacts copied from the game build directory.
pub const GAME_ARTIFACTS: &[&str] = &["game.html", "game.js", "game.wasm"];

/// Where the site's `index.html` comes from.
///
/// Historically both variants exist: some game builds emit their own
/// `index.html`, others ship a standalone template next to the game sources.
#[derive(Debug, Clone)]
pub enum IndexSource {
    /// Copy a standalone template file into the destination.
    Template(PathBuf),
    /// `index.html` is a build artifact, copied along with the game triple.
    GameBuild,
}

/// Configuration for assembling a website.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Directory containing the built game artifacts
    pub game_build_path: PathBuf,

    /// Destination directory for the assembled site
    pub build_path: PathBuf,

    /// Site URL substituted for the `{{url}}` placeholder; required
    pub url: Option<String>,

    /// Upgrade a leading `http` scheme to `https` before substitution
    pub force_https: bool,

    /// Delete the destination tree before rebuilding
    pub clear_first: bool,

    /// Where `index.html` comes from
    pub index_source: IndexSource,

    /// How static assets are populated
    pub asset_source: AssetSource,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            game_build_path: PathBuf::from("build"),
            build_path: PathBuf::from("build-website"),
            url: None,
            force_https: false,
            clear_first: false,
            index_source: IndexSource::Template(PathBuf::from("src/website/index.html")),
            asset_source: AssetSource::Files(vec![
                PathBuf::from("screenshot.png"),
                PathBuf::from("screenshot-2-by-1.png"),
            ]),
        }
    }
}

/// Result of an assembly run.
#[derive(Debug)]
pub struct AssembleReport {
    /// Number of files copied into the destination
    pub files_copied: usize,

    /// Number of `{{url}}` occurrences replaced
    pub substitutions: usize,

    /// Total assembly time in milliseconds
    pub duration_ms: u64,

    /// Destination directory
    pub build_path: PathBuf,
}

/// Errors that can occur during assembly.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("No site URL provided: set the URL environment variable")]
    MissingUrl,

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to copy {from} to {to}: {message}")]
    Copy {
        from: String,
        to: String,
        message: String,
    },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Failed to clear {path}: {message}")]
    Clear { path: String, message: String },
}

/// Upgrade a leading `http` scheme token to `https`.
///
/// Only the prefix is rewritten; `http` substrings appearing later in the
/// path or query are left alone. A URL already starting with `https` is
/// returned unchanged.
pub fn force_https(url: &str) -> String {
    if url.starts_with("http") && !url.starts_with("https") {
        url.replacen("http", "https", 1)
    } else {
        url.to_string()
    }
}

/// Website assembler.
pub struct Assembler {
    config: AssembleConfig,
}

impl Assembler {
    /// Create a new assembler.
    pub fn new(config: AssembleConfig) -> Self {
        Self { config }
    }

    /// Assemble the website.
    ///
    /// Steps run in a fixed order: resolve the URL, optionally clear the
    /// destination, create it, copy the index template, assets, and game
    /// artifacts, then substitute `{{url}}` in the copied HTML. A failed
    /// copy leaves the destination partially populated; there is no
    /// rollback.
    pub fn assemble(&self) -> Result<AssembleReport, AssembleError> {
        let start = Instant::now();

        // The URL is validated before any filesystem mutation.
        let url = self.config.url.clone().ok_or(AssembleError::MissingUrl)?;
        let url = if self.config.force_https {
            force_https(&url)
        } else {
            url
        };
        tracing::debug!("Resolved site URL: {}", url);

        if self.config.clear_first {
            self.clear_destination()?;
        }

        fs::create_dir_all(&self.config.build_path).map_err(|e| AssembleError::Write {
            path: self.config.build_path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut files_copied = 0;

        if let IndexSource::Template(ref template) = self.config.index_source {
            assets::copy_file(template, &self.config.build_path.join("index.html"))?;
            tracing::debug!("Copied index template from {}", template.display());
            files_copied += 1;
        }

        files_copied += assets::populate(&self.config.asset_source, &self.config.build_path)?;
        files_copied += self.copy_game_artifacts()?;

        let substitutions = templates::resolve_placeholders(&self.config.build_path, &url)?;

        Ok(AssembleReport {
            files_copied,
            substitutions,
            duration_ms: start.elapsed().as_millis() as u64,
            build_path: self.config.build_path.clone(),
        })
    }

    /// Remove the destination tree. A missing destination is a no-op.
    fn clear_destination(&self) -> Result<(), AssembleError> {
        match fs::remove_dir_all(&self.config.build_path) {
            Ok(()) => {
                tracing::debug!("Cleared {}", self.config.build_path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssembleError::Clear {
                path: self.config.build_path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Copy the fixed game artifact set from the game build directory.
    fn copy_game_artifacts(&self) -> Result<usize, AssembleError> {
        let mut names: Vec<&str> = GAME_ARTIFACTS.to_vec();
        if matches!(self.config.index_source, IndexSource::GameBuild) {
            names.push("index.html");
        }

        for name in &names {
            assets::copy_file(
                &self.config.game_build_path.join(name),
                &self.config.build_path.join(name),
            )?;
        }

        tracing::debug!(
            "Copied {} game artifacts from {}",
            names.len(),
            self.config.game_build_path.display()
        );

        Ok(names.len())
    }
}
