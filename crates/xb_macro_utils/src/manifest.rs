use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// The Cargo.toml of the crate a macro is expanded in.
///
/// Used to find a path to an `xb` crate that is valid from the caller, which
/// may depend on the crate directly or only through the `xb_core` umbrella.
///
/// # Example
///
/// ```rust
/// # use xb_macro_utils::Manifest;
/// let p: syn::Path = Manifest::crate_path("xb_bind");
/// assert_eq!(p.segments.len(), 1);
/// ```
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. An `xb_*` crate resolves through `xb_core` or `xb` when the caller
///    depends on one of them (e.g. `xb_bind` -> `::xb_core::bind`).
/// 3. Steps 1-2 are repeated for `dev-dependencies`.
/// 4. Otherwise the result is `::crate_name`.
///
/// A crate naming itself should declare `extern crate self as crate_name;`
/// so that rule 4 also holds inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAMES: [&str; 2] = ["xb_core", "xb"];
const PREFIX: &str = "xb_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    fn load(path: &Path) -> Option<Self> {
        let modified_time = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        let manifest = Document::parse(text).ok()?;
        Some(Self {
            manifest,
            modified_time,
        })
    }

    fn absolute(name: &str) -> syn::Path {
        let ident = syn::Ident::new(name, Span::call_site());
        let mut path = syn::Path::from(ident);
        path.leading_colon = Some(Default::default());
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(name));
        }
        let module = name.strip_prefix(PREFIX)?;
        let umbrella = UMBRELLA_NAMES.iter().find(|u| deps.contains_key(u))?;
        let mut path = Self::absolute(umbrella);
        path.segments.push(syn::Ident::new(module, Span::call_site()).into());
        Some(path)
    }

    /// Returns a path to the crate `name`, valid from the caller.
    ///
    /// See the type documentation for the resolution rules.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|key| match self.manifest.get(key) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| Self::find_in_deps(deps, name))
            .unwrap_or_else(|| Self::absolute(name))
    }

    /// Runs `func` with the caller's manifest, or returns `None` when it
    /// cannot be read.
    ///
    /// Manifests are cached per path and reloaded when the file changes.
    pub fn try_shared<R>(func: impl FnOnce(&Self) -> R) -> Option<R> {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path()?;
        let modified_time = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return Some(func(manifest));
        }
        drop(manifests);

        let manifest = Self::load(&path)?;
        let result = func(&manifest);
        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        Some(result)
    }

    /// Resolves the path of crate `name` from the caller's manifest, falling
    /// back to `::name` when no manifest is available.
    ///
    /// Reads the manifest, so callers should resolve once per macro invocation.
    pub fn crate_path(name: &str) -> syn::Path {
        Self::try_shared(|manifest| manifest.get_crate_path(name))
            .unwrap_or_else(|| Self::absolute(name))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Manifest;
    use quote::ToTokens;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.into()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_of(manifest: &Manifest, name: &str) -> String {
        manifest
            .get_crate_path(name)
            .to_token_stream()
            .to_string()
            .replace(' ', "")
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nxb_bind = \"0.0.1\"\n");
        assert_eq!(path_of(&m, "xb_bind"), "::xb_bind");
    }

    #[test]
    fn through_umbrella() {
        let m = manifest("[dependencies]\nxb_core = \"0.0.1\"\n");
        assert_eq!(path_of(&m, "xb_bind"), "::xb_core::bind");

        let dev = manifest("[dev-dependencies]\nxb = { path = \"..\" }\n");
        assert_eq!(path_of(&dev, "xb_node"), "::xb::node");
    }

    #[test]
    fn fallback_is_absolute() {
        let m = manifest("[package]\nname = \"demo\"\n");
        assert_eq!(path_of(&m, "xb_bind"), "::xb_bind");
    }
}
