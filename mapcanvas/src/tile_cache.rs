//! Tile image cache: one `<img>` per wrapped tile, loaded in the background.
//!
//! Each request installs `onload` / `onerror` handlers that flip the entry's
//! state. A load calls the host's ready callback so it can schedule a redraw;
//! a failure is logged and the tile stays blank. Handlers are detached before
//! an entry is dropped.

#[cfg(test)]
#[path = "tile_cache_test.rs"]
mod tile_cache_test;

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

use crate::consts::MAX_CACHED_TILES;
use crate::tile::{TileCoord, TileSource};

/// Load state of a cached tile image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Loading,
    Loaded,
    Failed,
}

struct TileEntry {
    image: HtmlImageElement,
    state: Rc<Cell<TileState>>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl TileEntry {
    fn detach(&self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

pub struct TileCache {
    entries: HashMap<TileCoord, TileEntry>,
    on_ready: Rc<dyn Fn()>,
}

impl TileCache {
    #[must_use]
    pub fn new(on_ready: Rc<dyn Fn()>) -> Self {
        Self { entries: HashMap::new(), on_ready }
    }

    /// Start loading `coord` unless it is already cached (loaded, loading or failed).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the image element cannot be created.
    pub fn request(&mut self, coord: TileCoord, source: &TileSource) -> Result<(), JsValue> {
        let key = coord.wrapped();
        if self.entries.contains_key(&key) {
            return Ok(());
        }

        let url = source.url(key);
        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));
        let state = Rc::new(Cell::new(TileState::Loading));

        let onload = {
            let state = Rc::clone(&state);
            let on_ready = Rc::clone(&self.on_ready);
            Closure::wrap(Box::new(move || {
                state.set(TileState::Loaded);
                on_ready();
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let state = Rc::clone(&state);
            let url = url.clone();
            Closure::wrap(Box::new(move || {
                state.set(TileState::Failed);
                log::debug!("tile failed to load: {url}");
            }) as Box<dyn FnMut()>)
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(&url);

        self.entries.insert(key, TileEntry { image, state, _onload: onload, _onerror: onerror });
        Ok(())
    }

    /// The image for `coord` once it has loaded.
    #[must_use]
    pub fn loaded(&self, coord: TileCoord) -> Option<&HtmlImageElement> {
        self.entries
            .get(&coord.wrapped())
            .filter(|entry| entry.state.get() == TileState::Loaded)
            .map(|entry| &entry.image)
    }

    /// Drop every tile outside `visible` once the cache grows past its limit.
    pub fn prune(&mut self, visible: &[TileCoord]) {
        let visible: Vec<TileCoord> = visible.iter().map(|coord| coord.wrapped()).collect();
        for key in stale_tiles(self.entries.keys().copied(), &visible, MAX_CACHED_TILES) {
            if let Some(entry) = self.entries.remove(&key) {
                entry.detach();
            }
        }
    }

    /// Detach every handler and drop all images.
    pub fn clear(&mut self) {
        for (_, entry) in self.entries.drain() {
            entry.detach();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tiles to evict: none while `keys` holds at most `max` tiles, otherwise every
/// tile not in `visible`, whatever its zoom or load state.
#[must_use]
pub fn stale_tiles(keys: impl IntoIterator<Item = TileCoord>, visible: &[TileCoord], max: usize) -> Vec<TileCoord> {
    let keys: Vec<TileCoord> = keys.into_iter().collect();
    if keys.len() <= max {
        return Vec::new();
    }
    keys.into_iter().filter(|coord| !visible.contains(coord)).collect()
}
