use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IconError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "nowplaying-icons.conf";

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Asset catalog icon set that receives the app icon PNGs.
    pub app_icon_dir: PathBuf,
    /// Directory for the DMG icon PNGs, the staging iconset and the `.icns`.
    pub dmg_dir: PathBuf,
    pub iconset_name: String,
    pub icns_name: String,
    pub compiler_program: String,
    pub write_contents_json: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            app_icon_dir: PathBuf::from("PlexWidget/PlexWidget/Assets.xcassets/AppIcon.appiconset"),
            dmg_dir: PathBuf::from("PlexWidget"),
            iconset_name: "dmg-icon.iconset".to_string(),
            icns_name: "dmg-volume-icon.icns".to_string(),
            compiler_program: "iconutil".to_string(),
            write_contents_json: true,
            log_file: None,
        }
    }
}

/// Parse `key = value` lines on top of the defaults. Unknown keys are ignored.
pub fn parse_config(content: &str) -> Result<BuildConfig> {
    let mut cfg = BuildConfig::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else { continue };
        let v = v.trim();
        match k.trim() {
            "app_icon_dir" => cfg.app_icon_dir = PathBuf::from(v),
            "dmg_dir" => cfg.dmg_dir = PathBuf::from(v),
            "iconset_name" => cfg.iconset_name = file_name_value("iconset_name", v)?,
            "icns_name" => cfg.icns_name = file_name_value("icns_name", v)?,
            "compiler_program" => {
                if !v.is_empty() {
                    cfg.compiler_program = v.to_string();
                }
            }
            "write_contents_json" => {
                cfg.write_contents_json = v.parse::<u8>().map(|n| n != 0).unwrap_or(true)
            }
            "log_file" => cfg.log_file = (!v.is_empty()).then(|| PathBuf::from(v)),
            _ => {}
        }
    }
    Ok(cfg)
}

// Both names are joined onto dmg_dir and the staging dir gets deleted
fn file_name_value(key: &str, v: &str) -> Result<String> {
    if v.is_empty() || v.contains('/') || v.contains('\\') || v == "." || v == ".." {
        return Err(IconError::InvalidArgument(format!("{} must be a plain file name, got '{}'", key, v)));
    }
    Ok(v.to_string())
}

pub fn read_config(path: &Path) -> Result<BuildConfig> {
    let content = fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
    parse_config(&content)
}

/// An explicit path must exist; otherwise the default file is used when present.
pub fn load_config(explicit: Option<&str>) -> Result<BuildConfig> {
    match explicit {
        Some(p) => read_config(Path::new(p)),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                read_config(fallback)
            } else {
                Ok(BuildConfig::default())
            }
        }
    }
}
