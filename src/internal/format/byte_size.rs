const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// 字节数转为可读字符串：1024 进制，最多两位小数，去掉末尾的 0。
///
/// `0 → "0 Bytes"`，`1536 → "1.5 KB"`，`1_500_000 → "1.43 MB"`。
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut scale = 1u64;
    while exponent < UNITS.len() - 1 && bytes >= scale * STEP {
        scale *= STEP;
        exponent += 1;
    }

    let value = ((bytes as f64 / scale as f64) * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[exponent])
}
