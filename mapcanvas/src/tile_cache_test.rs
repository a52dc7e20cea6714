use super::*;

fn coords(z: u8, count: i64) -> Vec<TileCoord> {
    (0..count).map(|x| TileCoord::new(z, x, 0)).collect()
}

#[test]
fn nothing_is_stale_under_the_limit() {
    let mut keys = coords(2, 3);
    keys.extend(coords(5, 3));
    assert!(stale_tiles(keys, &coords(5, 1), 10).is_empty());
}

#[test]
fn limit_is_inclusive() {
    let mut keys = coords(1, 2);
    keys.extend(coords(2, 2));
    assert!(stale_tiles(keys, &[], 4).is_empty());
}

// =============================================================
// Over the limit
// =============================================================

#[test]
fn over_the_limit_other_zooms_are_stale() {
    let mut keys = coords(2, 4);
    keys.extend(coords(3, 2));
    let stale = stale_tiles(keys, &coords(3, 2), 5);
    assert_eq!(stale.len(), 4);
    assert!(stale.iter().all(|c| c.z == 2));
}

#[test]
fn same_zoom_tiles_out_of_view_are_stale() {
    let visible: Vec<TileCoord> = (100..104).map(|x| TileCoord::new(19, x, 7)).collect();
    let mut keys: Vec<TileCoord> = (0..600).map(|x| TileCoord::new(19, x, 0)).collect();
    keys.extend(visible.iter().copied());
    let stale = stale_tiles(keys, &visible, MAX_CACHED_TILES);
    assert_eq!(stale.len(), 600);
    assert!(stale.iter().all(|c| !visible.contains(c)));
}

#[test]
fn visible_tiles_survive_even_when_they_alone_exceed_the_limit() {
    let keys = coords(6, 20);
    assert!(stale_tiles(keys.clone(), &keys, 5).is_empty());
}

#[test]
fn panning_at_fixed_zoom_keeps_cache_bounded() {
    let mut cached: Vec<TileCoord> = Vec::new();
    for step in 0..50 {
        let visible: Vec<TileCoord> = (0..16).map(|i| TileCoord::new(12, step * 16 + i, 3)).collect();
        cached.extend(visible.iter().copied());
        let stale = stale_tiles(cached.iter().copied(), &visible, 64);
        cached.retain(|c| !stale.contains(c));
        assert!(cached.len() <= 64);
    }
}
