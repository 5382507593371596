#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub tick_count: u32,
    /// Snowpeople in the town.
    pub town_size: usize,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_count: 120,
            town_size: 12,
            seed: 0x5eed,
        }
    }
}
