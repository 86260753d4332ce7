//! Messaging deep links.
//!
//! The "say thanks" button hands the user off to a chat with a prefilled
//! message: `https://wa.me/<number>?text=<message>`.

/// Characters `encodeURIComponent` leaves alone besides ASCII alphanumerics.
const UNRESERVED_MARKS: &[u8] = b"-_.!~*'()";

/// Percent-encode `input` as a URI component.
///
/// Every UTF-8 byte except ASCII letters, digits and `-_.!~*'()` becomes
/// `%XX` with uppercase hex digits, matching ECMAScript's
/// `encodeURIComponent`.
pub fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len() * 3);
    for &byte in input.as_bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED_MARKS.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX[(byte >> 4) as usize] as char);
            out.push(HEX[(byte & 0x0f) as usize] as char);
        }
    }
    out
}

/// Build a `wa.me` link that opens a chat with `phone` prefilled with `message`.
///
/// Everything but digits is dropped from `phone`: `wa.me` expects the
/// international number without `+`, spaces or dashes.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let number: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!(
        "https://wa.me/{}?text={}",
        number,
        encode_uri_component(message)
    )
}
