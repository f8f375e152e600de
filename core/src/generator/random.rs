use alloc::collections::BTreeSet;
use alloc::vec;
use rand::Rng;

use super::*;

/// Purely random placement drawing from a borrowed random source.
#[derive(Debug)]
pub struct RandomHazardGenerator<'a, R> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RandomHazardGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> HazardGenerator for RandomHazardGenerator<'_, R> {
    fn generate(self, config: GameConfig) -> HazardLayout {
        let config = GameConfig::new(config.grid_size, config.hazards);
        let hazards = place_hazards(config.grid_size, config.hazards, self.rng);
        HazardLayout::from_parts_unchecked(config.grid_size, hazards)
    }
}

/// Picks `min(hazard_count, grid_size²)` distinct cells uniformly at random.
pub fn place_hazards<R: Rng>(
    grid_size: Coord,
    hazard_count: CellCount,
    rng: &mut R,
) -> BTreeSet<CellIndex> {
    let total_cells = mult(grid_size, grid_size);

    // optimize for full boards
    if hazard_count >= total_cells {
        if hazard_count > total_cells {
            log::warn!(
                "Grid already full, requested {} hazards but only fits {}",
                hazard_count,
                total_cells
            );
        }
        return (0..total_cells).collect();
    }

    let mut occupied = vec![false; usize::from(total_cells)];
    let mut free_cells = total_cells;
    let mut placed = 0;

    while placed < hazard_count {
        // rank among the cells still free, so every draw lands on a new cell
        let rank = rng.random_range(0..free_cells);
        if let Some(cell) = occupied.iter_mut().filter(|cell| !**cell).nth(usize::from(rank)) {
            *cell = true;
            placed += 1;
            free_cells -= 1;
        }
    }

    let hazards: BTreeSet<CellIndex> = occupied
        .iter()
        .enumerate()
        .filter(|&(_, &is_hazard)| is_hazard)
        .map(|(index, _)| index as CellIndex)
        .collect();

    log::trace!("placed {} hazards on a {}x{} grid", hazards.len(), grid_size, grid_size);
    hazards
}
