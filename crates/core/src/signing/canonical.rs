/// Separator placed between components of the signing payload.
///
/// Components are not escaped, so `["a:b"]` and `["a", "b"]` produce the same
/// payload. Counterparts depend on this exact layout.
pub const SEPARATOR: char = ':';

/// Canonical text of a timestamp: shortest round-trip decimal, always with a
/// fractional part (`1700000000.0`, `1700000000.25`).
pub fn format_timestamp(timestamp: f64) -> String {
    format!("{timestamp:?}")
}

/// Builds the exact bytes that are signed and verified.
///
/// The timestamp is appended as a trailing component, everything is joined
/// with [`SEPARATOR`], and the raw body (if any) follows with no separator.
pub fn signing_payload<S: AsRef<str>>(
    components: &[S],
    timestamp: f64,
    body: Option<&[u8]>,
) -> Vec<u8> {
    let stamp = format_timestamp(timestamp);
    let text_len: usize = components.iter().map(|c| c.as_ref().len() + 1).sum();
    let mut payload =
        Vec::with_capacity(text_len + stamp.len() + body.map_or(0, <[u8]>::len));

    for component in components {
        payload.extend_from_slice(component.as_ref().as_bytes());
        payload.push(SEPARATOR as u8);
    }
    payload.extend_from_slice(stamp.as_bytes());

    if let Some(body) = body {
        payload.extend_from_slice(body);
    }
    payload
}
