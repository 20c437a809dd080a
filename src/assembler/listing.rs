//! Renders assembled words as an address-prefixed hex listing.

/// One listing entry per word: two uppercase hex digits of address, a
/// colon, a space, then the four hex digits of the word — `00: 2003`.
pub fn render(words: &[u16]) -> Vec<String> {
    words
        .iter()
        .enumerate()
        .map(|(address, word)| format!("{:02X}: {:04X}", address, word))
        .collect()
}
