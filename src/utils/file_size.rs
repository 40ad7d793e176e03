const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Renders a byte count the way the batch summary line shows it.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// "3 files (1.20 MB)"
pub fn batch_summary(sizes: &[u64]) -> String {
    let total: u64 = sizes.iter().sum();
    let noun = if sizes.len() == 1 { "file" } else { "files" };
    format!("{} {} ({})", sizes.len(), noun, human_size(total))
}
