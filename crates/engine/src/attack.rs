pub const SINGLE: u32 = 100;
pub const DOUBLE: u32 = 300;
pub const TRIPLE: u32 = 500;
pub const QUAD: u32 = 800;

/// Points awarded for clearing `lines` rows with one placement.
pub fn line_clear_score(lines: u8) -> u32 {
    match lines {
        0 => 0,
        1 => SINGLE,
        2 => DOUBLE,
        3 => TRIPLE,
        _ => QUAD,
    }
}

/// Garbage rows sent to the opponent: one less than the rows cleared.
pub fn garbage_for_clear(lines: u8) -> u8 {
    lines.saturating_sub(1)
}
