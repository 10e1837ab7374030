//! Band classification by primary channel number.

/// 2.4/5 GHz unlicensed band a channel falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Ism,
    Unii1,
    Unii2A,
    Unii2B,
    Unii2C,
    Unii3,
    Unknown,
}

impl Band {
    /// Classify a primary channel. UNII-2B is a recognized variant but has
    /// no channel range currently assigned to it, matching the upstream
    /// table this crate's numbers were taken from.
    pub fn from_channel(channel: u32) -> Self {
        match channel {
            1..=14 => Band::Ism,
            32..=48 => Band::Unii1,
            50..=68 => Band::Unii2A,
            96..=144 => Band::Unii2C,
            149..=173 => Band::Unii3,
            _ => Band::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Ism => "ISM",
            Band::Unii1 => "UNII-1",
            Band::Unii2A => "UNII-2A",
            Band::Unii2B => "UNII-2B",
            Band::Unii2C => "UNII-2C",
            Band::Unii3 => "UNII-3",
            Band::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_14_is_ism_15_is_unknown() {
        assert_eq!(Band::from_channel(14), Band::Ism);
        assert_eq!(Band::from_channel(15), Band::Unknown);
        assert_eq!(Band::from_channel(31), Band::Unknown);
        assert_eq!(Band::from_channel(32), Band::Unii1);
    }

    #[test]
    fn is_total_and_deterministic() {
        for channel in 1..200u32 {
            let a = Band::from_channel(channel);
            let b = Band::from_channel(channel);
            assert_eq!(a, b);
        }
    }
}
