//! Energy contract between collectables and whoever receives their reward.

/// Receives energy granted by world objects such as fruit.
pub trait EnergyGain {
    fn grant(&mut self, amount: f32);
}

/// Plain running total, handy when no avatar is attached.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnergyTally(pub f32);

impl EnergyGain for EnergyTally {
    fn grant(&mut self, amount: f32) {
        self.0 += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_accumulates_grants() {
        let mut tally = EnergyTally::default();
        let sink: &mut dyn EnergyGain = &mut tally;
        sink.grant(10.0);
        sink.grant(2.5);
        assert_eq!(tally.0, 12.5);
    }
}
