pub mod compiler;
pub mod config;
pub mod error;
pub mod icon;
pub mod iconset;
pub mod logger;
pub mod models;

pub use compiler::{IconCompiler, Iconutil};
pub use config::BuildConfig;
pub use error::IconError;
pub use icon::{Layout, render, render_png};
pub use iconset::{BuildReport, IconSetBuilder};
pub use models::{RenderRequest, Variant};
