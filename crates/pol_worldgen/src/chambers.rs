//! Generic tier-driven district builder.

use pol_algo::distribute_proportionally_min_one;
use pol_core::entities::District;
use pol_core::ids::{DistrictId, RegionId};
use pol_core::system::TierTable;
use pol_core::SimRng;
use tracing::warn;

/// Materialize the districts a region is entitled to under `table`.
///
/// The district count is drawn uniformly from the matched tier's range;
/// populations are an exact partition of `population` with no zero
/// district. Missing/empty tier data degrades to a single district with the
/// full regional population (generation must always complete).
pub fn build_districts(
    region: &RegionId,
    region_name: &str,
    population: u64,
    table: Option<&TierTable>,
    district_prefix: &str,
    rng: &mut SimRng,
) -> Vec<District> {
    let count = match table.filter(|t| !t.is_empty()).and_then(|t| t.pick(population)) {
        Some(t) => {
            let (lo, hi) = (t.min_districts.max(1), t.max_districts.max(t.min_districts).max(1));
            rng.range_u32(lo, hi)
        }
        None => {
            warn!(
                region = region.as_str(),
                "missing tier data for chamber {district_prefix}; defaulting to 1 district"
            );
            1
        }
    };

    materialize(region, region_name, population, count, district_prefix, rng)
}

/// Build exactly `count` districts partitioning `population`.
pub fn materialize(
    region: &RegionId,
    region_name: &str,
    population: u64,
    count: u32,
    district_prefix: &str,
    rng: &mut SimRng,
) -> Vec<District> {
    let count = count.max(1) as usize;
    let shares = distribute_proportionally_min_one(population, count, rng);
    shares
        .into_iter()
        .enumerate()
        .map(|(i, pop)| District {
            id: DistrictId::new(format!("{}_{}_{}", region.as_str(), district_prefix, i + 1)),
            name: format!("{region_name} {district_prefix} District {}", i + 1),
            parent_region: region.clone(),
            population: pop,
        })
        .collect()
}
