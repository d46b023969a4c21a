//! US keyboard layout: key code to typed character and back.

/// (key code, unshifted, shifted)
const US_LAYOUT: &[(u16, char, char)] = &[
    (32, ' ', ' '),
    (48, '0', ')'),
    (49, '1', '!'),
    (50, '2', '@'),
    (51, '3', '#'),
    (52, '4', '$'),
    (53, '5', '%'),
    (54, '6', '^'),
    (55, '7', '&'),
    (56, '8', '*'),
    (57, '9', '('),
    (186, ';', ':'),
    (187, '=', '+'),
    (188, ',', '<'),
    (189, '-', '_'),
    (190, '.', '>'),
    (191, '/', '?'),
    (192, '`', '~'),
    (219, '[', '{'),
    (220, '\\', '|'),
    (221, ']', '}'),
    (222, '\'', '"'),
    // Gecko variants of the same keys.
    (59, ';', ':'),
    (61, '=', '+'),
    (173, '-', '_'),
];

const KEY_A: u16 = 65;
const KEY_Z: u16 = 90;

/// Character typed by `key_code` with the given shift state, if the key is printable.
pub fn char_for_key(key_code: u16, shift: bool) -> Option<char> {
    if (KEY_A..=KEY_Z).contains(&key_code) {
        let lower = char::from(b'a' + (key_code - KEY_A) as u8);
        return Some(if shift { lower.to_ascii_uppercase() } else { lower });
    }
    US_LAYOUT
        .iter()
        .find(|(code, _, _)| *code == key_code)
        .map(|&(_, plain, shifted)| if shift { shifted } else { plain })
}

/// Key code and shift state that types `ch`, if `ch` is reachable on the layout.
pub fn key_for_char(ch: char) -> Option<(u16, bool)> {
    if ch.is_ascii_lowercase() {
        return Some((KEY_A + (ch as u8 - b'a') as u16, false));
    }
    if ch.is_ascii_uppercase() {
        return Some((KEY_A + (ch as u8 - b'A') as u16, true));
    }
    US_LAYOUT.iter().find_map(|&(code, plain, shifted)| {
        if plain == ch {
            Some((code, false))
        } else if shifted == ch {
            Some((code, true))
        } else {
            None
        }
    })
}

/// Every key code the layout can type.
pub fn printable_key_codes() -> impl Iterator<Item = u16> {
    (KEY_A..=KEY_Z).chain(US_LAYOUT.iter().map(|(code, _, _)| *code))
}
