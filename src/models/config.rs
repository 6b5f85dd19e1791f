use std::path::{Path, PathBuf};

use jab_palette::{
    generate_with_profile, ColorMode, DistanceMetric, DitherPolicy, FourColorProfile, Palette,
};
use serde::Deserialize;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "JABCOLOR_CONFIG";

/// Application configuration loaded from a YAML file.
///
/// Every field is optional in the file; command-line flags override the
/// loaded values.
///
/// ```yaml
/// colors: 16
/// metric: luma_weighted
/// dither: always
/// four_color_profile: cmyk
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Palette size used when a command does not specify one
    #[serde(default = "default_colors")]
    pub colors: ColorMode,

    /// Nearest-color metric
    #[serde(default)]
    pub metric: DistanceMetric,

    /// When to apply error diffusion
    #[serde(default)]
    pub dither: DitherPolicy,

    /// Color assignment for the 4-color mode
    #[serde(default)]
    pub four_color_profile: FourColorProfile,
}

fn default_colors() -> ColorMode {
    ColorMode::Colors8
}

impl AppConfig {
    /// Load configuration from `path`, or from the file named by
    /// [`CONFIG_ENV`] when `path` is `None`.
    ///
    /// A missing path yields the defaults. A file that cannot be read or
    /// parsed is logged and also yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        colors = %config.colors,
                        metric = ?config.metric,
                        dither = ?config.dither,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// The canonical palette for `mode` under this configuration's
    /// 4-color profile.
    pub fn palette_for(&self, mode: ColorMode) -> Palette {
        generate_with_profile(mode, self.four_color_profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            metric: DistanceMetric::default(),
            dither: DitherPolicy::default(),
            four_color_profile: FourColorProfile::default(),
        }
    }
}
