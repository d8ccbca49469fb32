/// 速率尚无法估算时的文案
pub const CALCULATING: &str = "Calculating...";

/// 按恒定速率估算剩余时间。
///
/// `rate = bytes_downloaded / elapsed_ms`，`remaining = (total - downloaded) / rate`，
/// 秒数向上取整。已下载字节或耗时为 0 时返回 [`CALCULATING`]。
pub fn format_time_remaining(bytes_downloaded: u64, total_bytes: u64, elapsed_ms: u64) -> String {
    if bytes_downloaded == 0 || elapsed_ms == 0 {
        return CALCULATING.to_string();
    }

    // 整数运算：remaining_ms = remaining * elapsed / downloaded
    let remaining = u128::from(total_bytes.saturating_sub(bytes_downloaded));
    let scaled = remaining * u128::from(elapsed_ms);
    let seconds = scaled.div_ceil(u128::from(bytes_downloaded) * 1000);

    if seconds < 60 {
        return format!("{seconds} sec");
    }
    let minutes = seconds / 60;
    match seconds % 60 {
        0 => format!("{minutes} min"),
        rest => format!("{minutes} min {rest} sec"),
    }
}
