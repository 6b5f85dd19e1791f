use std::fmt::Write as _;

use jab_palette::{ColorMode, Palette, QualityReport, Rgb};
use serde::Serialize;

/// Output format for palette listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// One palette entry as written to reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub index: usize,
    pub hex: String,
    pub rgb: [u8; 3],
}

/// Serializable description of a mode's palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteDump {
    pub colors: usize,
    pub nc: u8,
    pub bits_per_module: u32,
    /// True when the entries are the 64-color embedded subset
    pub embedded: bool,
    pub quality: QualityReport,
    pub entries: Vec<PaletteEntry>,
}

impl PaletteDump {
    pub fn new(mode: ColorMode, palette: &Palette, embedded: bool) -> Self {
        Self {
            colors: mode.color_count(),
            nc: mode.nc(),
            bits_per_module: mode.bits_per_module(),
            embedded,
            quality: QualityReport::for_palette(palette),
            entries: palette
                .iter()
                .enumerate()
                .map(|(index, color)| PaletteEntry {
                    index,
                    hex: color.to_string(),
                    rgb: color.to_bytes(),
                })
                .collect(),
        }
    }

    pub fn render(&self, format: DumpFormat) -> anyhow::Result<String> {
        Ok(match format {
            DumpFormat::Text => self.to_text(),
            DumpFormat::Json => serde_json::to_string_pretty(self)? + "\n",
            DumpFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Human-readable table, one entry per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let label = if self.embedded { " (embedded subset)" } else { "" };
        let _ = writeln!(
            out,
            "{} colors, Nc={}, {} bits/module{label}",
            self.colors, self.nc, self.bits_per_module
        );
        for entry in &self.entries {
            let [r, g, b] = entry.rgb;
            let _ = writeln!(out, "{:>4}  {}  {r:>3} {g:>3} {b:>3}", entry.index, entry.hex);
        }
        let _ = writeln!(
            out,
            "min separation {:.2}, variation {:.2}, accurate: {}",
            self.quality.min_separation, self.quality.variation, self.quality.accurate
        );
        out
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().map(|e| Rgb::from_bytes(e.rgb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jab_palette::{generate, generate_embedded};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dump_describes_mode() {
        let dump = PaletteDump::new(ColorMode::Colors8, &generate(ColorMode::Colors8), false);
        assert_eq!(dump.colors, 8);
        assert_eq!(dump.nc, 2);
        assert_eq!(dump.bits_per_module, 3);
        assert_eq!(dump.entries.len(), 8);
        assert_eq!(
            dump.entries[1],
            PaletteEntry {
                index: 1,
                hex: "#0000FF".to_string(),
                rgb: [0, 0, 255],
            }
        );
        assert!(dump.quality.passes());
    }

    #[test]
    fn test_embedded_dump_lists_64_entries() {
        let mode = ColorMode::Colors256;
        let dump = PaletteDump::new(mode, &generate_embedded(mode), true);
        assert_eq!(dump.colors, 256);
        assert_eq!(dump.entries.len(), 64);
        assert!(dump.to_text().contains("(embedded subset)"));
    }

    #[test]
    fn test_text_format() {
        let dump = PaletteDump::new(ColorMode::Colors4, &generate(ColorMode::Colors4), false);
        let text = dump.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "4 colors, Nc=1, 2 bits/module");
        assert_eq!(lines[1], "   0  #000000    0   0   0");
        assert_eq!(lines[2], "   1  #00FFFF    0 255 255");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_json_format_round_trips_through_serde() {
        let dump = PaletteDump::new(ColorMode::Colors16, &generate(ColorMode::Colors16), false);
        let json = dump.render(DumpFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["colors"], 16);
        assert_eq!(value["entries"][15]["hex"], "#FFFFFF");
        assert_eq!(value["quality"]["accurate"], true);
    }

    #[test]
    fn test_yaml_format() {
        let dump = PaletteDump::new(ColorMode::Colors4, &generate(ColorMode::Colors4), false);
        let yaml = dump.render(DumpFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["nc"].as_u64(), Some(1));
        assert_eq!(value["entries"][3]["hex"].as_str(), Some("#FFFF00"));
    }

    #[test]
    fn test_colors_iterator_matches_palette() {
        let palette = generate(ColorMode::Colors32);
        let dump = PaletteDump::new(ColorMode::Colors32, &palette, false);
        let colors: Vec<Rgb> = dump.colors().collect();
        assert_eq!(colors, palette.colors());
    }
}
