use core::fmt;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use swatch_logging::debug;

use crate::brush::{Brush, SolidBrush};
use crate::color::{Color, HexParser, SpecParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The caller handed us an empty (or all-whitespace) color spec where
    /// one was required.
    EmptySpec,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::EmptySpec => f.write_str("empty color spec"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A memoizing resolver from color specs to frozen brushes.
///
/// Two tables sit behind this type: spec -> [`Color`] and [`Color`] ->
/// [`Brush`]. Each distinct key is resolved at most once for the lifetime
/// of the cache; everything after that is a lookup. Entries are never
/// evicted, which is fine because an application uses a small, finite set
/// of distinct colors.
///
/// The cache is meant to be created once at startup and shared; it is
/// `Send + Sync`, and concurrent resolution of the same key yields one
/// winning construction that every caller observes from then on.
pub struct BrushCache {
    parser: Box<dyn SpecParser + Send + Sync>,
    colors: Mutex<FxHashMap<String, Color>>,
    brushes: Mutex<FxHashMap<Color, Brush>>,
    transparent: Brush,
}

impl BrushCache {
    pub fn new() -> Self {
        Self::with_parser(Box::new(HexParser))
    }

    /// Creates a cache that resolves specs through `parser` instead of the
    /// built-in hex parser.
    pub fn with_parser(parser: Box<dyn SpecParser + Send + Sync>) -> Self {
        let mut transparent = SolidBrush::new(Color::TRANSPARENT);
        transparent.freeze();

        Self {
            parser,
            colors: Mutex::new(FxHashMap::default()),
            brushes: Mutex::new(FxHashMap::default()),
            transparent: Arc::new(transparent),
        }
    }

    /// Resolves a textual color spec to a [`Color`], parsing it at most
    /// once per distinct spec.
    ///
    /// Lookups are case-insensitive: the spec is uppercased before it is
    /// used as a key, so `"#ff0000"` and `"#FF0000"` share one entry.
    /// A non-empty spec the parser cannot make sense of resolves to
    /// [`Color::TRANSPARENT`] rather than failing; that fallback is cached
    /// like any other result.
    pub fn resolve_color(&self, spec: &str) -> Result<Color, ResolveError> {
        let key = normalize(spec)?;

        let mut colors = self.colors.lock().expect("color table lock poisoned");
        if let Some(color) = colors.get(&key) {
            return Ok(*color);
        }

        let color = match self.parser.parse(&key) {
            Ok(color) => color,
            Err(err) => {
                debug!("treating unparseable color spec {:?} as transparent: {}", key, err);
                Color::TRANSPARENT
            }
        };

        // Cache the fallback too, so malformed input is parsed only once.
        colors.insert(key, color);

        Ok(color)
    }

    /// Resolves a textual color spec all the way to a frozen [`Brush`].
    pub fn resolve_brush(&self, spec: &str) -> Result<Brush, ResolveError> {
        let color = self.resolve_color(spec)?;
        Ok(self.brush_for_color(color))
    }

    /// Returns the shared brush for `color`, building and freezing it on
    /// first use.
    ///
    /// Every fully transparent color (alpha of zero, whatever the other
    /// channels say) maps to one shared transparent brush; those never
    /// enter the table.
    pub fn brush_for_color(&self, color: Color) -> Brush {
        let mut brushes = self.brushes.lock().expect("brush table lock poisoned");
        if let Some(brush) = brushes.get(&color) {
            return brush.clone();
        }

        if color.is_transparent() {
            return self.transparent.clone();
        }

        debug!("building brush for {:?}", color);
        let mut brush = SolidBrush::new(color);
        brush.freeze();

        let brush: Brush = Arc::new(brush);
        brushes.insert(color, brush.clone());

        brush
    }
}

impl Default for BrushCache {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(spec: &str) -> Result<String, ResolveError> {
    if spec.trim().is_empty() {
        return Err(ResolveError::EmptySpec);
    }
    Ok(spec.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::color::ColorParseError;

    /// Counts how often the cache actually reaches for the parser.
    struct CountingParser {
        calls: Arc<AtomicUsize>,
    }

    impl SpecParser for CountingParser {
        fn parse(&self, spec: &str) -> Result<Color, ColorParseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            HexParser.parse(spec)
        }
    }

    fn counting_cache() -> (BrushCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = BrushCache::with_parser(Box::new(CountingParser {
            calls: calls.clone(),
        }));
        (cache, calls)
    }

    #[test]
    fn resolve_color_parses_each_spec_once() {
        let (cache, calls) = counting_cache();

        let first = cache.resolve_color("#FF0000").unwrap();
        let second = cache.resolve_color("#FF0000").unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn resolve_color_is_case_insensitive() {
        let (cache, calls) = counting_cache();

        let upper = cache.resolve_color("#FF0000").unwrap();
        let lower = cache.resolve_color("#ff0000").unwrap();

        assert_eq!(upper, lower);
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "differently-cased specs share one cache entry"
        );
    }

    #[test]
    fn malformed_specs_resolve_to_transparent() {
        let (cache, calls) = counting_cache();

        assert_eq!(
            cache.resolve_color("not-a-color").unwrap(),
            Color::TRANSPARENT
        );

        // The fallback is cached as well.
        assert_eq!(
            cache.resolve_color("not-a-color").unwrap(),
            Color::TRANSPARENT
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_specs_are_rejected_before_the_cache() {
        let (cache, calls) = counting_cache();

        assert_eq!(cache.resolve_color(""), Err(ResolveError::EmptySpec));
        assert_eq!(cache.resolve_color("   "), Err(ResolveError::EmptySpec));
        assert!(cache.resolve_brush("").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn equal_colors_share_one_brush() {
        let cache = BrushCache::new();
        let color = Color::from_rgb(0, 255, 0);

        let first = cache.brush_for_color(color);
        let second = cache.brush_for_color(color);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.is_frozen());
        assert_eq!(first.color(), color);
    }

    #[test]
    fn distinct_colors_get_distinct_brushes() {
        let cache = BrushCache::new();

        let red = cache.brush_for_color(Color::from_rgb(255, 0, 0));
        let blue = cache.brush_for_color(Color::from_rgb(0, 0, 255));

        assert!(!Arc::ptr_eq(&red, &blue));
    }

    #[test]
    fn zero_alpha_colors_share_the_transparent_singleton() {
        let cache = BrushCache::new();

        let a = cache.brush_for_color(Color::from_argb(0, 255, 0, 0));
        let b = cache.brush_for_color(Color::from_argb(0, 0, 0, 255));
        let c = cache.brush_for_color(Color::TRANSPARENT);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
        assert!(a.is_frozen());
        assert_eq!(a.color(), Color::TRANSPARENT);
    }

    #[test]
    fn resolve_brush_goes_through_the_color_table() {
        let (cache, calls) = counting_cache();

        let first = cache.resolve_brush("#00FF00").unwrap();
        let second = cache.resolve_brush("#00ff00").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
