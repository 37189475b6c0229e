//! Diverging classification of reduction percentages.
//!
//! Shared by the ASCII map and the TUI so both views bucket countries the same
//! way (green for cuts, red for rises, neutral in between).

/// Bucket for one country's percentage reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReductionBand {
    /// Cut by 30% or more.
    MajorCut,
    /// Cut by 10% up to 30%.
    Cut,
    /// Within ±10%.
    Flat,
    /// Rose by 10% up to 30%.
    Rise,
    /// Rose by 30% or more.
    MajorRise,
}

impl ReductionBand {
    pub const ALL: [ReductionBand; 5] = [
        ReductionBand::MajorCut,
        ReductionBand::Cut,
        ReductionBand::Flat,
        ReductionBand::Rise,
        ReductionBand::MajorRise,
    ];

    pub fn classify(pct: f64) -> Self {
        if pct >= 30.0 {
            ReductionBand::MajorCut
        } else if pct >= 10.0 {
            ReductionBand::Cut
        } else if pct > -10.0 {
            ReductionBand::Flat
        } else if pct > -30.0 {
            ReductionBand::Rise
        } else {
            ReductionBand::MajorRise
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ReductionBand::MajorCut => "++",
            ReductionBand::Cut => "+ ",
            ReductionBand::Flat => "~ ",
            ReductionBand::Rise => "- ",
            ReductionBand::MajorRise => "--",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReductionBand::MajorCut => "cut >=30%",
            ReductionBand::Cut => "cut 10-30%",
            ReductionBand::Flat => "within ±10%",
            ReductionBand::Rise => "rise 10-30%",
            ReductionBand::MajorRise => "rise >=30%",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(ReductionBand::classify(30.0), ReductionBand::MajorCut);
        assert_eq!(ReductionBand::classify(29.9), ReductionBand::Cut);
        assert_eq!(ReductionBand::classify(10.0), ReductionBand::Cut);
        assert_eq!(ReductionBand::classify(0.0), ReductionBand::Flat);
        assert_eq!(ReductionBand::classify(-10.0), ReductionBand::Rise);
        assert_eq!(ReductionBand::classify(-30.0), ReductionBand::MajorRise);
    }
}
