//! Default room and participant names

use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of generated name suffixes
pub const SUFFIX_LEN: usize = 6;

pub const ROOM_PREFIX: &str = "playground-";
pub const PARTICIPANT_PREFIX: &str = "user-";

/// Generates a lowercase base-36 string of `len` characters
pub fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Room from the query string, or a fresh `playground-xxxxxx`
pub fn resolve_room(requested: Option<&str>) -> String {
    resolve(requested, ROOM_PREFIX)
}

/// Participant identity from the query string, or a fresh `user-xxxxxx`
pub fn resolve_participant(requested: Option<&str>) -> String {
    resolve(requested, PARTICIPANT_PREFIX)
}

/// Only a missing or empty value is replaced. Anything else is kept as sent.
fn resolve(requested: Option<&str>, prefix: &str) -> String {
    match requested {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{}{}", prefix, random_suffix(SUFFIX_LEN)),
    }
}
