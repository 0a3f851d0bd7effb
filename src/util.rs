// Small helpers shared by the components.

/// Spawn cell for a new world: the current time folded onto the grid.
pub fn spawn_index(now_ms: f64, width: u32) -> u32 {
    let cells = (width as u64 * width as u64).max(1);
    ((now_ms.max(0.0) as u64) % cells) as u32
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(test)]
mod tests {
    use super::spawn_index;

    #[test]
    fn spawn_index_wraps_into_grid() {
        assert_eq!(spawn_index(0.0, 8), 0);
        assert_eq!(spawn_index(65.0, 8), 1);
        assert_eq!(spawn_index(1_700_000_000_123.0, 8), (1_700_000_000_123u64 % 64) as u32);
    }

    #[test]
    fn spawn_index_tolerates_degenerate_input() {
        assert_eq!(spawn_index(-5.0, 8), 0);
        assert_eq!(spawn_index(42.0, 0), 0);
    }
}
