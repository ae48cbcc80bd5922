//! Ownership of the active mapping and its host styles.
//!
//! The store is the only place that holds a [`WordColorMapping`] and the
//! [`StyleHandle`]s created for it. Replacing the mapping always goes
//! through [`ConfigStore::replace`], which releases every old handle before
//! allocating new ones.

use std::path::{Path, PathBuf};

use crate::mapping::WordColorMapping;
use crate::matcher::WordMatcher;
use crate::style::{RenderStyle, Renderer, StyleHandle};
use crate::HighlightResult;

/// One configured word with its compiled matcher and host style.
#[derive(Debug)]
pub struct StyledWord {
    matcher: WordMatcher,
    color: String,
    handle: StyleHandle,
}

impl StyledWord {
    pub fn word(&self) -> &str {
        self.matcher.word()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn matcher(&self) -> &WordMatcher {
        &self.matcher
    }

    pub fn handle(&self) -> &StyleHandle {
        &self.handle
    }
}

/// Current mapping plus the live styles allocated for it.
#[derive(Debug, Default)]
pub struct ConfigStore {
    mapping: WordColorMapping,
    styles: Vec<StyledWord>,
    source: Option<PathBuf>,
}

impl ConfigStore {
    /// Creates an empty store. Nothing is highlighted until a mapping is
    /// installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-reads `path` and installs its mapping.
    ///
    /// On a read or parse failure the current mapping and its styles stay
    /// exactly as they were.
    pub fn reload<R>(
        &mut self,
        path: impl AsRef<Path>,
        renderer: &mut R,
    ) -> HighlightResult<&WordColorMapping>
    where
        R: Renderer + ?Sized,
    {
        let path = path.as_ref();
        let mapping = WordColorMapping::load(path)?;
        self.replace(mapping, renderer);
        self.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            words = self.mapping.len(),
            styles = self.styles.len(),
            "Loaded highlight configuration"
        );
        Ok(&self.mapping)
    }

    /// Installs `mapping`, releasing every style of the previous one first.
    pub fn replace<R>(&mut self, mapping: WordColorMapping, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        let released = self.release_styles(renderer);

        let mut styles = Vec::with_capacity(mapping.len());
        for (word, color) in mapping.iter() {
            let matcher = match WordMatcher::new(word) {
                Ok(matcher) => matcher,
                Err(err) => {
                    tracing::warn!(word, %err, "Skipping word that cannot be matched");
                    continue;
                }
            };
            let handle = renderer.create_style(&RenderStyle::for_color(color));
            styles.push(StyledWord {
                matcher,
                color: color.to_string(),
                handle,
            });
        }

        tracing::debug!(released, created = styles.len(), "Replaced highlight styles");
        self.styles = styles;
        self.mapping = mapping;
    }

    /// Releases every style and forgets the mapping.
    ///
    /// Returns how many styles were released.
    pub fn clear<R>(&mut self, renderer: &mut R) -> usize
    where
        R: Renderer + ?Sized,
    {
        let released = self.release_styles(renderer);
        self.mapping = WordColorMapping::new();
        self.source = None;
        released
    }

    /// The mapping currently in effect.
    pub fn mapping(&self) -> &WordColorMapping {
        &self.mapping
    }

    /// Styled words in mapping order.
    pub fn styles(&self) -> &[StyledWord] {
        &self.styles
    }

    /// Path the current mapping was read from, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    fn release_styles<R>(&mut self, renderer: &mut R) -> usize
    where
        R: Renderer + ?Sized,
    {
        let count = self.styles.len();
        for styled in self.styles.drain(..) {
            renderer.release_style(styled.handle);
        }
        count
    }
}

impl Drop for ConfigStore {
    fn drop(&mut self) {
        if !self.styles.is_empty() {
            tracing::warn!(
                styles = self.styles.len(),
                "ConfigStore dropped without releasing its styles"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HighlightError;
    use std::collections::HashSet;
    use wordlight_buffer::PositionRange;

    /// Renderer that tracks live handles.
    #[derive(Default)]
    struct CountingRenderer {
        next_id: u64,
        live: HashSet<u64>,
        created: usize,
        released: usize,
    }

    impl Renderer for CountingRenderer {
        fn create_style(&mut self, _style: &RenderStyle) -> StyleHandle {
            self.next_id += 1;
            self.created += 1;
            self.live.insert(self.next_id);
            StyleHandle::new(self.next_id)
        }

        fn set_highlights(&mut self, _handle: &StyleHandle, _ranges: &[PositionRange]) {}

        fn release_style(&mut self, handle: StyleHandle) {
            assert!(self.live.remove(&handle.id()), "double release of {handle}");
            self.released += 1;
        }
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("words.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reload_installs_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r##"{"foo":"#ff0000","bar":"#00ff00"}"##);
        let mut renderer = CountingRenderer::default();
        let mut store = ConfigStore::new();

        let mapping = store.reload(&path, &mut renderer).unwrap();
        assert_eq!(
            mapping.iter().collect::<Vec<_>>(),
            vec![("foo", "#ff0000"), ("bar", "#00ff00")]
        );
        assert_eq!(store.styles().len(), 2);
        assert_eq!(store.styles()[1].word(), "bar");
        assert_eq!(store.styles()[1].color(), "#00ff00");
        assert_eq!(store.source(), Some(path.as_path()));
        assert_eq!(renderer.live.len(), 2);

        store.clear(&mut renderer);
    }

    #[test]
    fn test_reload_twice_releases_previous_styles() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r##"{"foo":"#ff0000","bar":"#00ff00","baz":"blue"}"##);
        let mut renderer = CountingRenderer::default();
        let mut store = ConfigStore::new();

        let first = store.reload(&path, &mut renderer).unwrap().clone();
        let second = store.reload(&path, &mut renderer).unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(renderer.created, 6);
        assert_eq!(renderer.released, 3);
        assert_eq!(renderer.live.len(), 3);

        assert_eq!(store.clear(&mut renderer), 3);
        assert!(renderer.live.is_empty());
        assert!(store.mapping().is_empty());
    }

    #[test]
    fn test_parse_failure_keeps_previous_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r##"{"foo":"#ff0000"}"##);
        let mut renderer = CountingRenderer::default();
        let mut store = ConfigStore::new();
        store.reload(&path, &mut renderer).unwrap();

        std::fs::write(&path, "{not valid").unwrap();
        let err = store.reload(&path, &mut renderer).unwrap_err();

        assert!(err.is_parse_error());
        assert_eq!(store.mapping().get("foo"), Some("#ff0000"));
        assert_eq!(renderer.released, 0);
        assert_eq!(renderer.live.len(), 1);

        store.clear(&mut renderer);
    }

    #[test]
    fn test_missing_file_keeps_previous_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r##"{"foo":"#ff0000"}"##);
        let mut renderer = CountingRenderer::default();
        let mut store = ConfigStore::new();
        store.reload(&path, &mut renderer).unwrap();

        let err = store
            .reload(dir.path().join("nope.json"), &mut renderer)
            .unwrap_err();

        assert!(matches!(err, HighlightError::ConfigRead { .. }));
        assert_eq!(store.mapping().len(), 1);
        assert_eq!(store.source(), Some(path.as_path()));

        store.clear(&mut renderer);
    }

    #[test]
    fn test_failure_on_first_load_leaves_store_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = CountingRenderer::default();
        let mut store = ConfigStore::new();

        assert!(store.reload(dir.path().join("nope.json"), &mut renderer).is_err());
        assert!(store.is_empty());
        assert_eq!(renderer.created, 0);
    }

    #[test]
    fn test_replace_with_empty_mapping_releases_all() {
        let mut renderer = CountingRenderer::default();
        let mut store = ConfigStore::new();
        store.replace([("a", "red"), ("b", "blue")].into_iter().collect(), &mut renderer);
        assert_eq!(renderer.live.len(), 2);

        store.replace(WordColorMapping::new(), &mut renderer);
        assert!(renderer.live.is_empty());
        assert!(store.is_empty());
    }
}
