pub mod config;
pub mod palette_dump;

pub use config::{AppConfig, CONFIG_ENV};
pub use palette_dump::{DumpFormat, PaletteDump, PaletteEntry};
