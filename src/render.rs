//! Output renderers.
//!
//! A renderer turns a finished [`LocalizationModel`] into platform files.
//! It exposes exactly three capabilities:
//!
//! - `tag`: the platform name. It selects the CLI subcommand and doubles as
//!   the name of the platform's override column in a sheet.
//! - `normalize`: rewrites a primary value into the platform's placeholder
//!   conventions. The model builder calls it before escaping.
//! - `export`: writes the files for one locale.
//!
//! ```text
//! Renderers (tag -> renderer, built once at startup)
//!     │
//!     ├─ "android" -> AndroidRenderer   values[-<locale>]/generated_strings.xml
//!     └─ "ios"     -> IosRenderer       <locale>.lproj/Localizable.strings
//!                                       <locale>.lproj/Localizable.stringsdict
//!                                       <locale>.lproj/Strings.swift
//! ```
//!
//! Adding a platform means adding a module here and registering it in
//! [`Renderers::standard`]; the builder does not change.

#[path = "render/android.rs"]
mod android;
#[path = "render/ios.rs"]
mod ios;

pub use android::AndroidRenderer;
pub use ios::IosRenderer;

use crate::error::{Error, RenderError};
use crate::model::LocalizationModel;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Locale name of the base sheet.
pub const DEFAULT_LOCALE: &str = "default";

pub trait Renderer: Send + Sync {
    fn tag(&self) -> &'static str;

    /// Convert placeholders (`%1$s` vs `%1$@`) and similar platform quirks.
    fn normalize(&self, value: &str) -> String;

    /// Write the files for `locale` and return their paths.
    fn export(&self, locale: &str, model: &LocalizationModel) -> Result<Vec<PathBuf>, RenderError>;
}

/// Immutable tag -> renderer map.
pub struct Renderers {
    by_tag: BTreeMap<&'static str, Box<dyn Renderer>>,
}

impl Renderers {
    /// Register `renderers` by tag. A later renderer replaces an earlier one with the same tag.
    pub fn new(renderers: Vec<Box<dyn Renderer>>) -> Self {
        Renderers { by_tag: renderers.into_iter().map(|r| (r.tag(), r)).collect() }
    }

    /// Android and iOS renderers writing below `output_dir`.
    pub fn standard(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let renderers: Vec<Box<dyn Renderer>> =
            vec![Box::new(AndroidRenderer::new(output_dir.clone())), Box::new(IosRenderer::new(output_dir))];
        Renderers::new(renderers)
    }

    pub fn get(&self, tag: &str) -> Option<&dyn Renderer> {
        self.by_tag.get(tag).map(|r| r.as_ref())
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_tag.keys().copied()
    }

    /// Look up every tag, failing on the first unknown one.
    pub fn select<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<&dyn Renderer>, Error> {
        tags.iter()
            .map(|tag| self.get(tag.as_ref()).ok_or_else(|| Error::UnknownRenderer(tag.as_ref().to_string())))
            .collect()
    }
}

impl std::fmt::Debug for Renderers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderers").field("tags", &self.by_tag.keys().collect::<Vec<_>>()).finish()
    }
}

/// Create `dir` if needed and write `contents` to `dir/name`.
pub(crate) fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(dir).map_err(|source| RenderError::Io { path: dir.to_path_buf(), source })?;
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|source| RenderError::Io { path: path.clone(), source })?;
    tracing::info!(path = %path.display(), "wrote");
    Ok(path)
}
