/// Deterministic avatar background via CRC32 hash of the display name.
/// Returns (r, g, b) from the first 3 bytes of the hash.
pub fn avatar_color(name: &str) -> (u8, u8, u8) {
    let hash = crc32fast::hash(name.as_bytes());
    let bytes = hash.to_be_bytes();
    (bytes[0], bytes[1], bytes[2])
}

/// `#rrggbb` form of [`avatar_color`].
pub fn avatar_color_hex(name: &str) -> String {
    let (r, g, b) = avatar_color(name);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Uppercased first character of the name, shown when a member has no image.
pub fn initial(name: &str) -> Option<String> {
    name.trim()
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
}
