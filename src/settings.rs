//! Start-up configuration of the desk-scene viewer.

use std::path::PathBuf;

use cgmath::{Deg, Point3};

/// Overrides [`Settings::asset_root`].
pub const SCENE_NGIN_ASSETS: &str = "SCENE_NGIN_ASSETS";
/// Overrides [`Settings::title`].
pub const SCENE_NGIN_TITLE: &str = "SCENE_NGIN_TITLE";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: String,
    /// Texture paths of a scene are resolved against this directory.
    pub asset_root: PathBuf,
    pub clear_colour: wgpu::Color,
    pub camera_position: Point3<f32>,
    pub camera_yaw: Deg<f32>,
    pub camera_pitch: Deg<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Desk Scene".to_owned(),
            asset_root: PathBuf::from("assets"),
            clear_colour: wgpu::Color::BLACK,
            // In front of the desk, looking down at it.
            camera_position: Point3::new(0.0, 5.5, 10.0),
            camera_yaw: Deg(-90.0),
            camera_pitch: Deg(-25.0),
            fovy: Deg(45.0),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Settings {
    /// Defaults overridden by the process environment.
    ///
    /// Without [`SCENE_NGIN_ASSETS`] and without an `assets` directory in the
    /// working directory, the copy the build script placed next to the build
    /// output is used.
    pub fn from_env() -> Self {
        let mut settings = Self::with_env(|key| std::env::var(key).ok());
        if std::env::var_os(SCENE_NGIN_ASSETS).is_none() && !settings.asset_root.is_dir() {
            if let Some(bundled) = option_env!("SCENE_NGIN_BUNDLED_ASSETS") {
                log::debug!("Using bundled assets at {bundled}");
                settings.asset_root = PathBuf::from(bundled);
            }
        }
        settings
    }

    /// Defaults overridden by whatever `lookup` returns for the `SCENE_NGIN_*` keys.
    pub fn with_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(root) = lookup(SCENE_NGIN_ASSETS).filter(|root| !root.is_empty()) {
            settings.asset_root = PathBuf::from(root);
        }
        if let Some(title) = lookup(SCENE_NGIN_TITLE).filter(|title| !title.is_empty()) {
            settings.title = title;
        }
        settings
    }
}
