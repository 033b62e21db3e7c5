//! Configuration file for the dotfield app.
//!
//! Read from `DOTFIELD_CONFIG` when set, otherwise from `config.toml` in the
//! platform config directory. A missing file means defaults.
//!
//! ```toml
//! theme = "light"
//! profile = "ripple"
//! frame_interval_ms = 33
//!
//! [cell]
//! cell_width = 8.0
//! cell_height = 16.0
//!
//! [field]
//! spacing = 32.0
//! pointer_policy = "repel"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, ensure};
use directories::ProjectDirs;
use dotfield_core::{
    CellMetrics, EaseCurve, FieldSettings, PointerPolicy, Profile, SwirlStyle, Theme,
};
use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "DOTFIELD_CONFIG";

/// Largest accepted influence radius. Keeps the off-surface pointer sentinel
/// out of reach.
pub const MAX_INFLUENCE_RADIUS: f32 = 10_000.0;

/// Smallest accepted dot spacing, in surface units.
pub const MIN_SPACING: f32 = 1.0;

/// Largest accepted cell width or height, in surface units.
pub const MAX_CELL_SIZE: f32 = 1_000.0;

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme at startup.
    pub theme: Theme,
    /// Animation profile at startup.
    pub profile: Profile,
    /// Delay between frames.
    pub frame_interval_ms: u64,
    /// Surface units per terminal cell.
    pub cell: CellMetrics,
    /// Per-field overrides applied on top of every profile.
    pub field: FieldOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            profile: Profile::default(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            cell: CellMetrics::default(),
            field: FieldOverrides::default(),
        }
    }
}

/// Optional replacements for [`FieldSettings`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOverrides {
    pub time_step: Option<f32>,
    pub wave_speed_scale: Option<f32>,
    pub damping: Option<f32>,
    pub pointer_policy: Option<PointerPolicy>,
    pub ease_curve: Option<EaseCurve>,
    pub swirl: Option<SwirlStyle>,
    pub swirl_strength: Option<f32>,
    pub breathing: Option<bool>,
    pub spacing: Option<f32>,
    pub influence_radius: Option<f32>,
    pub pull_strength: Option<f32>,
    pub max_displacement: Option<f32>,
}

impl FieldOverrides {
    /// Apply the overrides that are set.
    pub fn apply(&self, mut settings: FieldSettings) -> FieldSettings {
        if let Some(value) = self.time_step {
            settings.time_step = value;
        }
        if let Some(value) = self.wave_speed_scale {
            settings.wave_speed_scale = value;
        }
        if let Some(value) = self.damping {
            settings.damping = value;
        }
        if let Some(value) = self.pointer_policy {
            settings.pointer_policy = value;
        }
        if let Some(value) = self.ease_curve {
            settings.ease_curve = value;
        }
        if let Some(value) = self.swirl {
            settings.swirl = value;
        }
        if let Some(value) = self.swirl_strength {
            settings.swirl_strength = value;
        }
        if let Some(value) = self.breathing {
            settings.breathing = value;
        }
        if let Some(value) = self.spacing {
            settings.spacing = value;
        }
        if let Some(value) = self.influence_radius {
            settings.influence_radius = value;
        }
        if let Some(value) = self.pull_strength {
            settings.pull_strength = value;
        }
        if let Some(value) = self.max_displacement {
            settings.max_displacement = value;
        }
        settings
    }
}

impl Config {
    /// Location of the config file, if one can be determined.
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "dotfield").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).wrap_err("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Settings for the configured profile.
    pub fn field_settings(&self) -> FieldSettings {
        self.settings_for(self.profile)
    }

    /// Settings for `profile` with the overrides applied.
    pub fn settings_for(&self, profile: Profile) -> FieldSettings {
        self.field.apply(profile.settings())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.frame_interval_ms > 0, "frame_interval_ms must be positive");
        ensure!(
            [self.cell.cell_width, self.cell.cell_height]
                .iter()
                .all(|size| *size > 0.0 && *size <= MAX_CELL_SIZE),
            "cell dimensions must be in (0, {MAX_CELL_SIZE}]"
        );

        for profile in [Profile::Drift, Profile::Ripple] {
            let s = self.settings_for(profile);
            let name = profile.name();
            ensure!(
                s.spacing.is_finite() && s.spacing >= MIN_SPACING,
                "{name}: spacing must be finite and at least {MIN_SPACING}"
            );
            ensure!(
                s.influence_radius > 0.0 && s.influence_radius <= MAX_INFLUENCE_RADIUS,
                "{name}: influence_radius must be in (0, {MAX_INFLUENCE_RADIUS}]"
            );
            ensure!(
                s.damping > 0.0 && s.damping <= 1.0,
                "{name}: damping must be in (0, 1]"
            );
            ensure!(
                s.time_step > 0.0 && s.wave_speed_scale > 0.0,
                "{name}: time_step and wave_speed_scale must be positive"
            );
            ensure!(
                s.pull_strength >= 0.0 && s.swirl_strength >= 0.0 && s.max_displacement >= 0.0,
                "{name}: strengths must not be negative"
            );
        }
        Ok(())
    }
}
