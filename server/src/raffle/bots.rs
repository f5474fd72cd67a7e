//! Accounts excluded from every draw.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Known bot and helper accounts, lower-cased. Loaded once, never mutated.
const EXCLUDED_LOGINS: &[&str] = &[
    "botrixoficial",
    "wizebot",
    "streamelements",
    "nightbot",
    "dumiya_",
    "djdubc_",
    "dabackup_",
    "housemusicislife_",
    "dubbychat",
    "dubbystestbot",
    "blerp",
    "ai_licia",
    "soundalerts",
    "moobot",
    "frostytoolsdotcom",
    "fossabot",
    "streamlabs",
    "botisimo",
    "phantombot",
    "lurxx",
    "pokemoncommunitygame",
    "sery_bot",
    "kofistreambot",
    "tangiabot",
    "own3d",
    "creatisbot",
    "regressz",
];

pub static EXCLUDED_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| EXCLUDED_LOGINS.iter().copied().collect());
