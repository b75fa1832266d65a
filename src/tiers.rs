//! Affiliate tier ladder.
//!
//! Tiers are a pure floor lookup over conversion counts: the active tier is the
//! last entry whose `min_conversions` does not exceed the affiliate's total.

pub struct Tier {
    pub min_conversions: i32,
    pub name: &'static str,
    pub commission_pct: i32,
}

/// Sorted ascending by `min_conversions`; the first entry must start at 0.
pub const TIERS: [Tier; 5] = [
    Tier { min_conversions: 0, name: "basic", commission_pct: 5 },
    Tier { min_conversions: 5, name: "silver", commission_pct: 8 },
    Tier { min_conversions: 20, name: "gold", commission_pct: 10 },
    Tier { min_conversions: 50, name: "platinum", commission_pct: 12 },
    Tier { min_conversions: 100, name: "diamond", commission_pct: 15 },
];

pub fn tier_for(conversions: i32) -> &'static Tier {
    TIERS
        .iter()
        .rev()
        .find(|t| t.min_conversions <= conversions)
        .unwrap_or(&TIERS[0])
}

pub fn tier_name(conversions: i32) -> &'static str {
    tier_for(conversions).name
}
