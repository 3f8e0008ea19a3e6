//! Growth factors based on balance-sheet and investment growth.

mod asset_growth;
mod capex_growth;

pub use asset_growth::AssetGrowth;
pub use capex_growth::CapexGrowth;
