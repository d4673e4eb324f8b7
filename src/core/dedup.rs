use std::collections::HashSet;

use crate::models::Listing;

/// Drop listings whose lower-cased (title, company) pair was already seen.
///
/// Stable: the first occurrence wins. Listings with an empty title or company
/// cannot be keyed and are always dropped.
pub fn dedupe(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(listings.len());

    listings
        .into_iter()
        .filter(|listing| {
            let title = listing.title.trim();
            let company = listing.company.trim();
            if title.is_empty() || company.is_empty() {
                return false;
            }
            seen.insert((title.to_lowercase(), company.to_lowercase()))
        })
        .collect()
}
