//! Durable display identity for the settings file.
//!
//! Platform display ids are not stable across reboots or driver updates, but
//! monitor names usually are.  A memo stores both and [`resolve`] re-finds the
//! display on the next run as best it can.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::list_displays;
use super::{DisplayId, UNKNOWN_DISPLAY_NAME, UNRESOLVED_DISPLAY};
use crate::platform::DisplayBackend;

const SEPARATOR: char = '|';

/// Last known id and name of a display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayIdMemo {
    pub id: DisplayId,
    pub name: String,
}

impl Default for DisplayIdMemo {
    fn default() -> Self {
        Self::unknown()
    }
}

impl DisplayIdMemo {
    /// The `{0, "Unknown Display"}` sentinel.
    pub fn unknown() -> Self {
        Self {
            id: UNRESOLVED_DISPLAY,
            name: UNKNOWN_DISPLAY_NAME.to_string(),
        }
    }

    /// `"<id>|<name>"`.
    pub fn encode(&self) -> String {
        format!("{}{SEPARATOR}{}", self.id, self.name)
    }

    /// Inverse of [`encode`](Self::encode).  Splits on the first `|`, so names
    /// may themselves contain `|`.
    ///
    /// Without a separator the sentinel is returned.  An unparsable id becomes
    /// `0`; the name is kept since resolution matches on it first.
    pub fn decode(encoded: &str) -> Self {
        let Some((id, name)) = encoded.split_once(SEPARATOR) else {
            return Self::unknown();
        };
        Self {
            id: id.trim().parse().unwrap_or(UNRESOLVED_DISPLAY),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for DisplayIdMemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Best-effort live display id for `memo`.
///
/// 1. Displays are matched by name.  A single match wins even if its id changed.
/// 2. Several displays with that name: the one whose id equals `memo.id`,
///    otherwise the first of them.
/// 3. No name match: the primary display.
/// 4. No displays at all: `0`.
///
/// Two identical monitors that also swapped ids cannot be told apart; the
/// result is a guess, never a guarantee.
pub fn resolve(backend: &impl DisplayBackend, memo: &DisplayIdMemo) -> DisplayId {
    let displays = list_displays(backend);
    if displays.is_empty() {
        return UNRESOLVED_DISPLAY;
    }

    let named: Vec<DisplayId> = displays
        .iter()
        .filter(|info| info.name == memo.name)
        .map(|info| info.id)
        .collect();

    match named.as_slice() {
        [] => backend.primary_display(),
        [only] => *only,
        [first, ..] => named
            .iter()
            .copied()
            .find(|id| *id == memo.id)
            .unwrap_or(*first),
    }
}
