//! Session storage of the custom order and pinned documents.
//!
//! Both lists are stored as comma separated document ids, e.g. `"5,3,9"`.

use crate::host::Host;
use tracing::warn;

/// Session key holding the custom order.
pub const POSITIONS_KEY: &str = "BufferlinePositions";

/// Session key holding pinned document ids.
pub const PINNED_KEY: &str = "BufferlinePinnedBuffers";

/// Encodes ids as a comma separated list.
#[must_use]
pub fn encode_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a comma separated list, skipping entries that are not ids.
#[must_use]
pub fn decode_ids(text: &str) -> Vec<u64> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse() {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(entry, %err, "skipping malformed persisted id");
                None
            }
        })
        .collect()
}

/// Stores `ids` under `key`.
pub fn save(host: &mut dyn Host, key: &str, ids: &[u64]) {
    host.set_session_value(key, encode_ids(ids));
}

/// Reads the ids stored under `key`; `None` when nothing was stored.
#[must_use]
pub fn load(host: &dyn Host, key: &str) -> Option<Vec<u64>> {
    host.session_value(key).map(|text| decode_ids(&text))
}
