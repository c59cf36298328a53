/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Picks the working set of coins out of the catalog listing.

use seed_core::types::CoinSummary;
use std::collections::HashSet;
use tracing::debug;

use crate::types::Selection;

/// Split `listing` into whitelisted and rank-eligible coins.
///
/// Both lists keep catalog order. A whitelisted coin never shows up in
/// `ranked`, and a duplicated id only counts at its first occurrence.
pub fn select(listing: &[CoinSummary], whitelist: &HashSet<String>, max_rank: u32) -> Selection {
  let mut seen: HashSet<&str> = HashSet::with_capacity(listing.len());
  let mut selection = Selection::default();

  for coin in listing {
    if !seen.insert(coin.id.as_str()) {
      debug!("Duplicate catalog entry for {}, keeping the first", coin.id);
      continue;
    }

    if whitelist.contains(&coin.id) {
      selection.whitelisted.push(coin.clone());
    } else if coin.market_cap_rank.is_some_and(|rank| rank <= max_rank) {
      selection.ranked.push(coin.clone());
    }
  }

  selection
}
