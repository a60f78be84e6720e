//! Country-specific chamber builders.
//!
//! Each country layers its own nuances over the generic tier-driven builder:
//! Japan adds a separate per-cycle Councillors seat table, the Philippines
//! splits administrative regions into provinces before districting and
//! contributes national house districts from each province.

use pol_algo::distribute_proportionally_min_one;
use pol_core::entities::{District, EntityStats, RegionEntity};
use pol_core::ids::RegionId;
use pol_core::SimRng;

use crate::chambers::build_districts;
use crate::tiers;

/// USA: state lower-house districts for every state.
pub fn usa_state_house_districts(states: &[RegionEntity], rng: &mut SimRng) -> Vec<District> {
    let table = tiers::usa_state_house();
    states
        .iter()
        .flat_map(|s| {
            build_districts(&s.id, &s.name, s.population, Some(&table), "house", rng)
        })
        .collect()
}

/// Japan: House of Representatives single-member districts per prefecture.
pub fn japan_representatives_districts(
    prefectures: &[RegionEntity],
    rng: &mut SimRng,
) -> Vec<District> {
    let table = tiers::japan_representatives();
    prefectures
        .iter()
        .flat_map(|p| {
            build_districts(&p.id, &p.name, p.population, Some(&table), "hr", rng)
        })
        .collect()
}

/// Korea: National Assembly constituencies per province/metropolitan city.
pub fn korea_assembly_districts(provinces: &[RegionEntity], rng: &mut SimRng) -> Vec<District> {
    let table = tiers::korea_assembly();
    provinces
        .iter()
        .flat_map(|p| {
            build_districts(&p.id, &p.name, p.population, Some(&table), "na", rng)
        })
        .collect()
}

/// Philippine chamber structure: provinces carved from administrative
/// regions, plus board districts and national house districts.
#[derive(Clone, Debug)]
pub struct PhilippineChambers {
    pub provinces: Vec<RegionEntity>,
    pub board_districts: Vec<District>,
    pub house_districts: Vec<District>,
}

/// Provinces per administrative region, by region population.
fn philippine_province_count(region_population: u64, rng: &mut SimRng) -> u32 {
    match region_population {
        p if p >= 10_000_000 => rng.range_u32(5, 8),
        p if p >= 4_000_000 => rng.range_u32(3, 5),
        p if p >= 1_000_000 => rng.range_u32(2, 3),
        _ => 1,
    }
}

/// Philippines: two-level generation. Administrative-region population is
/// first split across provinces; each province then gets provincial-board
/// districts and contributes districts to the national House.
pub fn philippines_chambers(
    admin_regions: &[RegionEntity],
    rng: &mut SimRng,
) -> PhilippineChambers {
    let board_table = tiers::philippines_provincial_board();
    let house_table = tiers::philippines_house();

    let mut provinces = Vec::new();
    let mut board_districts = Vec::new();
    let mut house_districts = Vec::new();

    for region in admin_regions {
        let count = philippine_province_count(region.population, rng).max(1) as usize;
        let shares = distribute_proportionally_min_one(region.population, count, rng);

        for (i, pop) in shares.into_iter().enumerate() {
            let province = RegionEntity {
                id: RegionId::new(format!("{}_prov_{}", region.id.as_str(), i + 1)),
                country: region.country.clone(),
                name: format!("{} Province {}", region.name, i + 1),
                population: pop,
                stats: EntityStats::default(),
            };

            board_districts.extend(build_districts(
                &province.id,
                &province.name,
                province.population,
                Some(&board_table),
                "board",
                rng,
            ));
            house_districts.extend(build_districts(
                &province.id,
                &province.name,
                province.population,
                Some(&house_table),
                "house",
                rng,
            ));

            provinces.push(province);
        }
    }

    PhilippineChambers { provinces, board_districts, house_districts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pol_core::ids::CountryId;

    fn region(id: &str, name: &str, population: u64) -> RegionEntity {
        RegionEntity {
            id: RegionId::new(id),
            country: CountryId::new("c1"),
            name: name.into(),
            population,
            stats: EntityStats::default(),
        }
    }

    #[test]
    fn usa_small_state_still_gets_districts() {
        let states = vec![region("us_st_wy", "Wyoming-ish", 400_000)];
        let mut rng = SimRng::from_seed(31);
        let out = usa_state_house_districts(&states, &mut rng);
        assert!(!out.is_empty());
        assert_eq!(out.iter().map(|d| d.population).sum::<u64>(), 400_000);
    }

    #[test]
    fn philippine_two_level_split_conserves_population() {
        let regions =
            vec![region("ph_r1", "Region I", 5_200_000), region("ph_r2", "Region II", 900_000)];
        let mut rng = SimRng::from_seed(33);
        let out = philippines_chambers(&regions, &mut rng);

        let province_total: u64 = out.provinces.iter().map(|p| p.population).sum();
        assert_eq!(province_total, 6_100_000);

        // Each province's board districts partition that province exactly.
        for province in &out.provinces {
            let board: u64 = out
                .board_districts
                .iter()
                .filter(|d| d.parent_region == province.id)
                .map(|d| d.population)
                .sum();
            assert_eq!(board, province.population, "province {}", province.id);
        }
        assert!(!out.house_districts.is_empty());
    }
}
