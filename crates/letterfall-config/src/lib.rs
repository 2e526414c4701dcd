//! Configuration file loading for letterfall.
//!
//! The file lives at `<config_dir>/letterfall/config.toml`. Every field is
//! optional; a missing file means all defaults. Physics tuning is fixed per
//! preset and cannot be configured here.

use std::{fs, io, path::PathBuf};

use color_eyre::eyre::{WrapErr, bail, eyre};
use directories::ProjectDirs;
use letterfall_core::{Preset, Rgba};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "letterfall";
pub const DEFAULT_TAGLINE: &str = "letters fall, collide and pile up around this card";

/// User configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Starting preset.
    pub preset: Preset,
    /// Heading of the title card.
    pub title: Option<String>,
    /// Line under the heading.
    pub tagline: Option<String>,
    /// Paper colour as `#rrggbb`.
    pub paper: Option<String>,
    /// Draw walls and blockers with a faint tint.
    pub show_bounds: bool,
    /// World units per terminal column.
    pub cell_width: Option<f32>,
    /// World units per terminal row.
    pub cell_height: Option<f32>,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> color_eyre::Result<Self> {
        let config: Config = toml::from_str(text).wrap_err("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> color_eyre::Result<()> {
        if let Some(paper) = &self.paper
            && Rgba::parse_hex(paper).is_none()
        {
            bail!("paper must be a #rrggbb colour, got {paper:?}");
        }
        for (name, value) in [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ] {
            if let Some(value) = value
                && !(value.is_finite() && value > 0.0)
            {
                bail!("{name} must be a positive number, got {value}");
            }
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn tagline(&self) -> &str {
        self.tagline.as_deref().unwrap_or(DEFAULT_TAGLINE)
    }

    /// The configured paper colour, if one was set.
    pub fn paper_color(&self) -> Option<Rgba> {
        self.paper.as_deref().and_then(Rgba::parse_hex)
    }
}

/// Project directories for letterfall, if the platform has a home directory.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "letterfall")
}

/// Location of the configuration file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the configuration file, falling back to defaults when it is absent.
pub fn load() -> color_eyre::Result<Config> {
    let Some(path) = config_path() else {
        log::warn!("no home directory; using default configuration");
        return Ok(Config::default());
    };
    match fs::read_to_string(&path) {
        Ok(text) => {
            log::info!("loading configuration from {}", path.display());
            Config::from_toml(&text).wrap_err_with(|| format!("in {}", path.display()))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} not found; using defaults", path.display());
            Ok(Config::default())
        }
        Err(err) => Err(eyre!(err)).wrap_err_with(|| format!("reading {}", path.display())),
    }
}
