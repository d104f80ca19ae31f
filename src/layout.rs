pub(crate) mod grid;
pub(crate) mod tiers;
pub(crate) mod wrap;
