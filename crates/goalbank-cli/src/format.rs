//! Display helpers for won amounts and rates.

/// `1200000` -> `1,200,000`
pub fn thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1200000` -> `₩1,200,000` with the configured symbol.
pub fn won(amount: u64, symbol: &str) -> String {
    format!("{symbol}{}", thousands(amount))
}

/// Basis points as a percentage, `450` -> `4.50%`.
pub fn rate(basis_points: u32) -> String {
    format!("{}.{:02}%", basis_points / 100, basis_points % 100)
}

/// Text progress bar of `width` cells.
pub fn bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
