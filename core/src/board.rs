use alloc::collections::BTreeSet;
use ndarray::Array2;
use rand::Rng;

use crate::reveal::reveal_region;
use crate::*;

/// A single game: the fixed hazard layout plus the player-visible cell states.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    layout: HazardLayout,
    cells: Array2<CellState>,
}

impl Board {
    /// Starts a new game with hazards drawn from `rng`.
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        Self::generate(config, RandomHazardGenerator::new(rng))
    }

    /// Builds a board from `generator`, clamping `config` to a playable grid first.
    pub fn generate(config: GameConfig, generator: impl HazardGenerator) -> Self {
        let config = GameConfig::new(config.grid_size, config.hazards);
        Self::from_layout(generator.generate(config))
    }

    pub fn from_layout(layout: HazardLayout) -> Self {
        let side = usize::from(layout.grid_size());
        Self {
            layout,
            cells: Array2::default((side, side)),
        }
    }

    /// Caller guarantees `cells` is `grid_size`×`grid_size` in standard layout.
    pub(crate) fn from_parts(layout: HazardLayout, cells: Array2<CellState>) -> Self {
        Self { layout, cells }
    }

    pub fn config(&self) -> GameConfig {
        self.layout.game_config()
    }

    pub fn layout(&self) -> &HazardLayout {
        &self.layout
    }

    pub fn grid_size(&self) -> Coord {
        self.layout.grid_size()
    }

    pub fn total_cells(&self) -> CellCount {
        self.layout.total_cells()
    }

    pub fn hazards(&self) -> &BTreeSet<CellIndex> {
        self.layout.hazards()
    }

    pub fn hazard_count(&self) -> CellCount {
        self.layout.hazard_count()
    }

    pub fn cell_state(&self, index: CellIndex) -> Result<CellState> {
        let index = self.layout.validate_index(index)?;
        Ok(self.cells[self.nd_index(index)])
    }

    /// All cells with their linear index, in index order.
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &cell)| (index as CellIndex, cell))
    }

    pub fn adjacent_hazard_count(&self, index: CellIndex) -> Result<u8> {
        self.layout.adjacent_hazard_count(index)
    }

    pub fn flags_placed(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Hazards minus flags; negative once the player has over-flagged.
    pub fn hazards_unflagged(&self) -> isize {
        (self.hazard_count() as isize) - (self.flags_placed() as isize)
    }

    pub fn is_win(&self) -> bool {
        is_win(self)
    }

    pub fn is_loss(&self) -> bool {
        is_loss(self)
    }

    pub fn status(&self) -> GameStatus {
        evaluate(self)
    }

    /// Flips a cell between hidden and flagged, returning its new state.
    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<CellState> {
        use CellState::*;

        let index = self.layout.validate_index(index)?;
        self.check_not_lost()?;

        let cell = &mut self.cells[split_index(index, self.layout.grid_size()).to_nd_index()];
        let next = match *cell {
            Hidden => Flagged,
            Flagged => Hidden,
            Revealed(_) | ExposedHazard => return Err(GameError::InvalidTransition),
        };
        *cell = next;

        log::trace!("cell {} is now {:?}", index, next);
        Ok(next)
    }

    pub fn select(&mut self, index: CellIndex) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let index = self.layout.validate_index(index)?;

        if self.is_loss() || !self.cells[self.nd_index(index)].is_hidden() {
            return Ok(NoChange);
        }

        if self.layout.contains_hazard(index) {
            log::debug!("hazard at {} selected, exposing all hazards", index);
            self.expose_hazards();
            return Ok(Loss);
        }

        let cells = &self.cells;
        let grid_size = self.layout.grid_size();
        let revealed = reveal_region(&self.layout, index, |neighbor| {
            cells[split_index(neighbor, grid_size).to_nd_index()].is_flagged()
        });
        log::debug!("selecting {} revealed {} cells", index, revealed.len());

        for cell_index in revealed {
            let count = self.layout.hazards_around(cell_index);
            let position = self.nd_index(cell_index);
            self.cells[position] = CellState::Revealed(count);
        }

        Ok(if self.is_win() { Win } else { Continue })
    }

    fn expose_hazards(&mut self) {
        let grid_size = self.layout.grid_size();
        for &hazard in self.layout.hazards() {
            self.cells[split_index(hazard, grid_size).to_nd_index()] = CellState::ExposedHazard;
        }
    }

    fn check_not_lost(&self) -> Result<()> {
        if self.is_loss() {
            Err(GameError::InvalidTransition)
        } else {
            Ok(())
        }
    }

    fn nd_index(&self, index: CellIndex) -> [usize; 2] {
        split_index(index, self.layout.grid_size()).to_nd_index()
    }
}
