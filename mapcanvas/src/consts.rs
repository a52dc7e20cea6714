//! Shared numeric constants for the map engine.

// ── Earth / projection ──────────────────────────────────────────

/// Mean earth radius in meters used for spherical length and area.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Sphere radius of the Web Mercator (EPSG:3857) projection, in meters.
pub const WEB_MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Half the width of the Web Mercator world, in meters.
pub const WEB_MERCATOR_HALF_SIZE: f64 = std::f64::consts::PI * WEB_MERCATOR_RADIUS_M;

/// Latitude limit of the Web Mercator square world, in degrees.
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

// ── View ────────────────────────────────────────────────────────

/// Edge length of a raster tile in CSS pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Resolution (meters per pixel) at zoom 0: the whole world in one tile.
pub const MAX_RESOLUTION: f64 = 2.0 * WEB_MERCATOR_HALF_SIZE / TILE_SIZE_PX;

/// Zoom level the map opens at.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Lowest zoom level the view accepts.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest zoom level the view accepts.
pub const MAX_ZOOM: f64 = 28.0;

/// Zoom change for one wheel notch, button press or keyboard zoom.
pub const ZOOM_STEP: f64 = 1.0;

/// Wheel delta in pixels that amounts to one `ZOOM_STEP`; smaller deltas zoom proportionally.
pub const WHEEL_DELTA_PER_ZOOM: f64 = 100.0;

/// Keyboard pan distance in CSS pixels.
pub const KEYBOARD_PAN_PX: f64 = 128.0;

// ── Tiles ───────────────────────────────────────────────────────

/// OpenStreetMap raster tile URL template.
pub const OSM_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Highest tile zoom served by the OpenStreetMap tile servers.
pub const OSM_MAX_TILE_ZOOM: u8 = 19;

/// Attribution required by the OpenStreetMap tile usage policy.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors.";

/// Cached tile images beyond this count are pruned to the tiles currently in view.
pub const MAX_CACHED_TILES: usize = 512;

// ── Interactions ────────────────────────────────────────────────

/// Pointer travel in pixels below which a press/release counts as a click.
pub const CLICK_TOLERANCE_PX: f64 = 6.0;

/// Distance in pixels from the first or last vertex that finishes a sketch.
pub const DRAW_FINISH_TOLERANCE_PX: f64 = 12.0;

/// Minimum number of placed vertices before a polygon sketch can finish.
pub const POLYGON_MIN_POINTS: usize = 3;

/// Pointer distance in pixels within which Modify grabs a vertex or edge.
pub const MODIFY_TOLERANCE_PX: f64 = 10.0;

/// Pointer distance in pixels within which Snap pulls to a vertex or edge.
pub const SNAP_TOLERANCE_PX: f64 = 10.0;
