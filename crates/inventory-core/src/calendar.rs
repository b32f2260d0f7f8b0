/// Three-letter Spanish month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Short name for `month` (`1..=12`), `None` outside that range.
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_ABBREVIATIONS.get(idx).copied()
}

/// `"YYYY-MM"` with a zero-padded month, so keys sort chronologically as text.
pub fn period_key(year: i32, month: u32) -> String {
    format!("{}-{:02}", year, month)
}
