use data_model_smap::UrlEntry;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Merges route entries and record entries into the order they are rendered in.
///
/// Entries are deduplicated by location: a later entry replaces an earlier one in place, so a
/// record entry overrides a route entry for the same URL. The result is then stably sorted by
/// last-modified date, newest first. Entries without a last-modified date come after all dated
/// entries, in their merge order.
pub fn aggregate(route_entries: Vec<UrlEntry>, record_entries: Vec<UrlEntry>) -> Vec<UrlEntry> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<UrlEntry> = Vec::with_capacity(route_entries.len() + record_entries.len());

    for entry in route_entries.into_iter().chain(record_entries) {
        match positions.get(&entry.location) {
            Some(&index) => merged[index] = entry,
            None => {
                positions.insert(entry.location.clone(), merged.len());
                merged.push(entry);
            }
        }
    }

    merged.sort_by(newest_first);
    merged
}

fn newest_first(a: &UrlEntry, b: &UrlEntry) -> Ordering {
    match (&a.last_modified, &b.last_modified) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
