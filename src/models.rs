use serde::{Deserialize, Serialize};

use crate::error::{IconError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Gradient panel, white bars, white badge with orange chevron.
    Standard,
    /// Transparent panel with white bars and a hollow badge, for compositing
    /// over the DMG window background.
    Cutout,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Cutout => "cutout",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "app" => Some(Variant::Standard),
            "cutout" | "dmg" | "drive" => Some(Variant::Cutout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    target_size: u32,
    variant: Variant,
}

impl RenderRequest {
    pub fn new(target_size: u32, variant: Variant) -> Result<Self> {
        if target_size == 0 {
            return Err(IconError::InvalidArgument(
                "target size must be at least 1 pixel".to_string(),
            ));
        }
        Ok(Self { target_size, variant })
    }

    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }
}

/// One output file: base name (without `.png`) and square pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconTarget {
    pub name: &'static str,
    pub size: u32,
}

impl IconTarget {
    pub const fn new(name: &'static str, size: u32) -> Self {
        Self { name, size }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}

// macOS AppIcon.appiconset: 16/32/128/256/512pt at 1x and 2x
pub const APP_ICON_TARGETS: [IconTarget; 10] = [
    IconTarget::new("icon_16x16", 16),
    IconTarget::new("icon_16x16@2x", 32),
    IconTarget::new("icon_32x32", 32),
    IconTarget::new("icon_32x32@2x", 64),
    IconTarget::new("icon_128x128", 128),
    IconTarget::new("icon_128x128@2x", 256),
    IconTarget::new("icon_256x256", 256),
    IconTarget::new("icon_256x256@2x", 512),
    IconTarget::new("icon_512x512", 512),
    IconTarget::new("icon_512x512@2x", 1024),
];

pub const DMG_ICON_TARGETS: [IconTarget; 5] = [
    IconTarget::new("dmg-icon_16x16", 16),
    IconTarget::new("dmg-icon_32x32", 32),
    IconTarget::new("dmg-icon_128x128", 128),
    IconTarget::new("dmg-icon_256x256", 256),
    IconTarget::new("dmg-icon_512x512", 512),
];

/// iconutil slot file name -> DMG icon it is copied from.
pub const ICONSET_SLOTS: [(&str, &str); 8] = [
    ("icon_16x16.png", "dmg-icon_16x16"),
    ("icon_16x16@2x.png", "dmg-icon_32x32"),
    ("icon_32x32.png", "dmg-icon_32x32"),
    ("icon_128x128.png", "dmg-icon_128x128"),
    ("icon_128x128@2x.png", "dmg-icon_256x256"),
    ("icon_256x256.png", "dmg-icon_256x256"),
    ("icon_256x256@2x.png", "dmg-icon_512x512"),
    ("icon_512x512.png", "dmg-icon_512x512"),
];

/// `Contents.json` of an Xcode asset catalog icon set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub images: Vec<AssetImage>,
    pub info: AssetInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetImage {
    pub filename: String,
    pub idiom: String,
    pub scale: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub author: String,
    pub version: u32,
}

impl AssetCatalog {
    /// Describe app icon targets named `icon_<pt>x<pt>[@2x]`.
    pub fn for_targets(targets: &[IconTarget]) -> Self {
        let images = targets
            .iter()
            .map(|t| {
                let (points, scale) = match t.name.strip_suffix("@2x") {
                    Some(base) => (base, "2x"),
                    None => (t.name, "1x"),
                };
                let size = points.trim_start_matches("icon_").to_string();
                AssetImage {
                    filename: t.file_name(),
                    idiom: "mac".to_string(),
                    scale: scale.to_string(),
                    size,
                }
            })
            .collect();
        Self {
            images,
            info: AssetInfo { author: "xcode".to_string(), version: 1 },
        }
    }
}
