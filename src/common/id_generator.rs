//! Account IDs: `U_` followed by random Crockford Base32 characters

use rand::Rng;

/// Crockford Base32 alphabet (no I, L, O or U)
const CROCKFORD_ALPHABET: [char; 32] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H',
    'J', 'K', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'X', 'Y', 'Z',
];

const USER_ID_PREFIX: &str = "U_";
const USER_ID_LENGTH: usize = 10;

fn crockford_chars(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CROCKFORD_ALPHABET[rng.gen_range(0..CROCKFORD_ALPHABET.len())])
        .collect()
}

/// New user ID, e.g. `U_K7NP3XY2QR`
pub fn generate_user_id() -> String {
    format!("{}{}", USER_ID_PREFIX, crockford_chars(USER_ID_LENGTH))
}
