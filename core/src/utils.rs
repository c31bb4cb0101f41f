/// Maximum number of bytes rendered by `hex_preview`.
pub const HEX_PREVIEW_LEN: usize = 32;

/// Render the first bytes of a buffer as hex for logs and diagnostics.
/// Longer buffers are cut and suffixed with the total length.
pub fn hex_preview(b: &[u8]) -> String {
    if b.len() <= HEX_PREVIEW_LEN {
        hex::encode(b)
    } else {
        format!("{}.. ({} bytes)", hex::encode(&b[..HEX_PREVIEW_LEN]), b.len())
    }
}

/// Printable ASCII as a quoted byte string, anything else as hex.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Classic 16-bytes-per-line hex dump with offsets.
pub fn hex_dump(b: &[u8]) -> String {
    let mut out = String::new();
    for (i, line) in b.chunks(16).enumerate() {
        out.push_str(&format!("{:08x}  ", i * 16));
        for byte in line {
            out.push_str(&format!("{:02x} ", byte));
        }
        out.push('\n');
    }
    out
}
