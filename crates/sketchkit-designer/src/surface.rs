//! Immediate-mode drawing surface abstraction.
//!
//! Shapes draw through a [`Painter`], which owns a backend [`Surface`] and a
//! [`PaintCache`] of compiled paints.

use crate::style::{LineCap, LineJoin, Paint, PaintKey, Shadow};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Canvas-like 2D drawing backend.
///
/// Coordinates are surface-local pixels with the origin at the top-left.
/// Angles passed to [`Surface::rotate`] and [`Surface::arc`] are radians.
pub trait Surface {
    /// Backend handle for a compiled paint (colour, gradient or pattern).
    type Paint;

    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);

    fn fill(&mut self);
    fn stroke(&mut self);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Compile a paint descriptor. Returns `None` when the backend cannot
    /// resolve it (bad colour string, empty gradient, malformed pattern).
    fn create_paint(&mut self, paint: &Paint) -> Option<Self::Paint>;
    fn set_fill_paint(&mut self, paint: &Self::Paint);
    fn set_stroke_paint(&mut self, paint: &Self::Paint);

    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_global_alpha(&mut self, alpha: f64);
    /// `None` disables the shadow.
    fn set_shadow(&mut self, shadow: Option<&Shadow>);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.begin_path();
        self.rect(x, y, width, height);
        self.fill();
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.begin_path();
        self.rect(x, y, width, height);
        self.stroke();
    }
}

const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Compiled paint handles keyed by descriptor content.
///
/// Failed compilations are cached too, so an unresolvable paint is only
/// attempted once per distinct descriptor.
pub struct PaintCache<P> {
    entries: HashMap<PaintKey, Option<P>>,
    capacity: usize,
    compiled: usize,
}

impl<P> PaintCache<P> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            compiled: 0,
        }
    }

    /// Cached handle for `paint`, compiling it with `compile` on a miss.
    pub fn get_or_compile<F>(&mut self, paint: &Paint, compile: F) -> Option<&P>
    where
        F: FnOnce(&Paint) -> Option<P>,
    {
        let key = paint.key();
        if !self.entries.contains_key(&key) {
            if self.entries.len() >= self.capacity {
                tracing::trace!("Paint cache full ({} entries), clearing", self.entries.len());
                self.entries.clear();
            }
            let handle = compile(paint);
            if handle.is_none() {
                tracing::trace!("Paint could not be compiled: {:?}", paint);
            }
            self.compiled += 1;
            self.entries.insert(key, handle);
        }
        self.entries.get(&key).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of compilations performed since creation.
    pub fn compile_count(&self) -> usize {
        self.compiled
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<P> Default for PaintCache<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// A surface plus its paint cache. Dereferences to the surface for path and
/// state calls.
pub struct Painter<S: Surface> {
    surface: S,
    cache: PaintCache<S::Paint>,
}

impl<S: Surface> Painter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            cache: PaintCache::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn cache(&self) -> &PaintCache<S::Paint> {
        &self.cache
    }

    /// Select `paint` for filling. Returns false when it cannot be resolved,
    /// in which case the caller skips the fill.
    pub fn set_fill(&mut self, paint: &Paint) -> bool {
        let surface = &mut self.surface;
        let compiled = self.cache.get_or_compile(paint, |p| surface.create_paint(p));
        match compiled {
            Some(handle) => {
                self.surface.set_fill_paint(handle);
                true
            }
            None => false,
        }
    }

    /// Select `paint` for stroking. Patterns are fill-only and always rejected.
    pub fn set_stroke(&mut self, paint: &Paint) -> bool {
        if paint.is_pattern() {
            tracing::trace!("Pattern paints cannot stroke, skipping");
            return false;
        }
        let surface = &mut self.surface;
        let compiled = self.cache.get_or_compile(paint, |p| surface.create_paint(p));
        match compiled {
            Some(handle) => {
                self.surface.set_stroke_paint(handle);
                true
            }
            None => false,
        }
    }
}

impl<S: Surface> Deref for Painter<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface> DerefMut for Painter<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
