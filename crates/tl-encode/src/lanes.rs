//! Lane id parsing.

/// Split `"<road>_<index>"` into its road id and lane index.
///
/// Returns `None` for ids without a numeric suffix.
pub fn split_lane_id(lane_id: &str) -> Option<(&str, u8)> {
    let (road, index) = lane_id.rsplit_once('_')?;
    if road.is_empty() {
        return None;
    }
    index.parse().ok().map(|i| (road, i))
}
