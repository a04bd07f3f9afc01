use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::IconCompiler;
use crate::config::BuildConfig;
use crate::error::{IconError, Result};
use crate::icon::render_png;
use crate::logger::{log_error, log_line};
use crate::models::{
    APP_ICON_TARGETS, AssetCatalog, DMG_ICON_TARGETS, ICONSET_SLOTS, IconTarget, RenderRequest,
    Variant,
};

const CONTENTS_JSON: &str = "Contents.json";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub app_icons: Vec<PathBuf>,
    pub dmg_icons: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub volume_icon: PathBuf,
}

/// Renders both icon families to disk and packs the DMG set into an `.icns`.
pub struct IconSetBuilder {
    config: BuildConfig,
}

impl IconSetBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.config.dmg_dir.join(&self.config.iconset_name)
    }

    pub fn volume_icon_path(&self) -> PathBuf {
        self.config.dmg_dir.join(&self.config.icns_name)
    }

    pub fn write_app_icons(&self) -> Result<Vec<PathBuf>> {
        write_targets(&APP_ICON_TARGETS, Variant::Standard, &self.config.app_icon_dir)
    }

    pub fn write_dmg_icons(&self) -> Result<Vec<PathBuf>> {
        write_targets(&DMG_ICON_TARGETS, Variant::Cutout, &self.config.dmg_dir)
    }

    /// Write `Contents.json` for the app icon set unless one already exists.
    pub fn write_manifest(&self) -> Result<Option<PathBuf>> {
        let path = self.config.app_icon_dir.join(CONTENTS_JSON);
        if path.exists() {
            return Ok(None);
        }
        ensure_dir(&self.config.app_icon_dir)?;
        let catalog = AssetCatalog::for_targets(&APP_ICON_TARGETS);
        let json = serde_json::to_string_pretty(&catalog)?;
        fs::write(&path, json).map_err(|e| IconError::io(&path, e))?;
        log_line(&format!("Created {}", path.display()));
        Ok(Some(path))
    }

    /// Recreate the staging iconset from the DMG PNGs under iconutil's slot names.
    pub fn stage_iconset(&self) -> Result<PathBuf> {
        let staging = self.staging_dir();
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| IconError::io(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| IconError::io(&staging, e))?;

        for (slot, source) in ICONSET_SLOTS {
            let from = self.config.dmg_dir.join(format!("{}.png", source));
            let to = staging.join(slot);
            fs::copy(&from, &to).map_err(|e| IconError::io(&from, e))?;
        }
        Ok(staging)
    }

    /// Stage, compile and clean up. The staging dir is removed even when the
    /// compiler fails.
    pub fn build_volume_icon(&self, compiler: &dyn IconCompiler) -> Result<PathBuf> {
        let staging = self.stage_iconset()?;
        let output = self.volume_icon_path();
        log_line(&format!("Converting {} to {}", staging.display(), output.display()));

        let compiled = compiler.compile(&staging, &output);
        let cleanup = fs::remove_dir_all(&staging).map_err(|e| IconError::io(&staging, e));

        let icns = compiled?;
        if let Err(e) = &cleanup {
            log_error("staging cleanup", e);
        }
        cleanup?;
        log_line(&format!("DMG volume icon created: {}", icns.display()));
        Ok(icns)
    }

    pub fn run(&self, compiler: &dyn IconCompiler) -> Result<BuildReport> {
        let app_icons = self.write_app_icons()?;
        let manifest = if self.config.write_contents_json {
            self.write_manifest()?
        } else {
            None
        };
        let dmg_icons = self.write_dmg_icons()?;
        let volume_icon = self.build_volume_icon(compiler)?;
        Ok(BuildReport { app_icons, dmg_icons, manifest, volume_icon })
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| IconError::io(dir, e))
}

fn write_targets(targets: &[IconTarget], variant: Variant, dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::with_capacity(targets.len());
    for target in targets {
        let request = RenderRequest::new(target.size, variant)?;
        let png = render_png(&request)?;
        let path = dir.join(target.file_name());
        fs::write(&path, png).map_err(|e| IconError::io(&path, e))?;
        log_line(&format!(
            "Created {} ({}x{}, {})",
            target.file_name(),
            target.size,
            target.size,
            variant.as_str()
        ));
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn builder_in(root: &Path) -> IconSetBuilder {
        IconSetBuilder::new(BuildConfig {
            app_icon_dir: root.join("Assets.xcassets").join("AppIcon.appiconset"),
            dmg_dir: root.join("dmg"),
            ..BuildConfig::default()
        })
    }

    #[test]
    fn full_run_writes_everything_and_cleans_staging() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_in(dir.path());
        let staged = RefCell::new(Vec::new());

        let fake = |staging: &Path, output: &Path| -> Result<PathBuf> {
            let mut names: Vec<String> = fs::read_dir(staging)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect();
            names.sort();
            *staged.borrow_mut() = names;

            // 32px DMG icon fills both the 16@2x and 32x32 slots
            let dmg32 = fs::read(staging.parent().unwrap().join("dmg-icon_32x32.png")).unwrap();
            assert_eq!(fs::read(staging.join("icon_16x16@2x.png")).unwrap(), dmg32);
            assert_eq!(fs::read(staging.join("icon_32x32.png")).unwrap(), dmg32);

            fs::write(output, b"icns").unwrap();
            Ok(output.to_path_buf())
        };

        let report = builder.run(&fake).unwrap();

        assert_eq!(report.app_icons.len(), APP_ICON_TARGETS.len());
        for (path, target) in report.app_icons.iter().zip(APP_ICON_TARGETS.iter()) {
            let img = image::open(path).unwrap();
            assert_eq!((img.width(), img.height()), (target.size, target.size));
        }
        assert_eq!(report.dmg_icons.len(), DMG_ICON_TARGETS.len());
        assert!(report.dmg_icons.iter().all(|p| p.is_file()));
        assert_eq!(report.manifest, Some(builder.config().app_icon_dir.join(CONTENTS_JSON)));

        let mut expected: Vec<String> = ICONSET_SLOTS.iter().map(|(slot, _)| slot.to_string()).collect();
        expected.sort();
        assert_eq!(*staged.borrow(), expected);

        assert_eq!(report.volume_icon, builder.volume_icon_path());
        assert_eq!(fs::read(&report.volume_icon).unwrap(), b"icns");
        assert!(!builder.staging_dir().exists());
    }

    #[test]
    fn failed_compile_still_removes_staging() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_in(dir.path());
        builder.write_dmg_icons().unwrap();

        let broken = |_: &Path, _: &Path| -> Result<PathBuf> {
            Err(IconError::Spawn {
                program: "iconutil".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            })
        };
        let err = builder.build_volume_icon(&broken).unwrap_err();

        assert!(matches!(err, IconError::Spawn { .. }));
        assert!(!builder.staging_dir().exists());
        assert!(!builder.volume_icon_path().exists());
    }

    #[test]
    fn staging_without_dmg_icons_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_in(dir.path());
        match builder.stage_iconset().unwrap_err() {
            IconError::Io { path, .. } => assert!(path.ends_with("dmg-icon_16x16.png")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stale_staging_contents_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_in(dir.path());
        builder.write_dmg_icons().unwrap();
        fs::create_dir_all(builder.staging_dir()).unwrap();
        fs::write(builder.staging_dir().join("leftover.png"), b"old").unwrap();

        let staging = builder.stage_iconset().unwrap();

        assert!(!staging.join("leftover.png").exists());
        assert_eq!(fs::read_dir(&staging).unwrap().count(), ICONSET_SLOTS.len());
    }

    #[test]
    fn existing_manifest_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_in(dir.path());

        let written = builder.write_manifest().unwrap().unwrap();
        let catalog: AssetCatalog = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(catalog, AssetCatalog::for_targets(&APP_ICON_TARGETS));

        fs::write(&written, "{\"custom\": true}").unwrap();
        assert_eq!(builder.write_manifest().unwrap(), None);
        assert_eq!(fs::read_to_string(&written).unwrap(), "{\"custom\": true}");
    }

    #[test]
    fn manifest_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = builder_in(dir.path()).config().clone();
        config.write_contents_json = false;
        let builder = IconSetBuilder::new(config);

        let ok = |_: &Path, output: &Path| -> Result<PathBuf> { Ok(output.to_path_buf()) };
        let report = builder.run(&ok).unwrap();

        assert_eq!(report.manifest, None);
        assert!(!builder.config().app_icon_dir.join(CONTENTS_JSON).exists());
    }
}
