use crate::{GridCell, Loc, Neighborhood, Random, World, WorldGrid};

/// Rendering annotation carried beside `alive`. Always recomputed together
/// with `alive` in the same transition, never set independently.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CellState {
    Born,
    Stasis,
    Death,
    #[default]
    Dormant,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LifeCell {
    pub alive: bool,
    pub state: CellState,
}

impl LifeCell {
    const BORN_ARGB: u32 = 0xFFFF_00FF;
    const STASIS_ARGB: u32 = 0xFF00_00FF;
    const DEATH_ARGB: u32 = 0xFFFF_0000;
    const DORMANT_ARGB: u32 = 0x0000_0000;

    /// The Game of Life rule. `live_neighbors` counts the eight-cell Moore
    /// neighborhood, center excluded.
    pub fn transition(self, live_neighbors: u32) -> Self {
        if self.alive && (2..=3).contains(&live_neighbors) {
            Self {
                alive: true,
                state: CellState::Stasis,
            }
        } else if !self.alive && live_neighbors == 3 {
            Self {
                alive: true,
                state: CellState::Born,
            }
        } else if self.alive {
            Self {
                alive: false,
                state: CellState::Death,
            }
        } else {
            Self {
                alive: false,
                state: CellState::Dormant,
            }
        }
    }

    fn num_live_neighbors(neighborhood: &Neighborhood<LifeCell>) -> u32 {
        let mut result = 0;
        neighborhood.for_neighbor_cells(|neighbor| {
            if neighbor.alive {
                result += 1;
            }
        });
        result
    }
}

impl GridCell for LifeCell {
    fn pixel_argb(&self) -> u32 {
        match (self.alive, self.state) {
            (false, CellState::Death) => Self::DEATH_ARGB,
            (true, CellState::Born) => Self::BORN_ARGB,
            (true, CellState::Stasis) => Self::STASIS_ARGB,
            _ => Self::DORMANT_ARGB,
        }
    }

    fn update(&self, neighborhood: &Neighborhood<LifeCell>, next_cell: &mut LifeCell) {
        *next_cell = self.transition(Self::num_live_neighbors(neighborhood));
    }
}

#[derive(Debug)]
pub struct LifeWorld {
    grid: WorldGrid<LifeCell>,
}

impl LifeWorld {
    pub fn new(width: u32, height: u32, alive_probability: f64, mut rand: Random) -> Self {
        let mut result = Self::new_empty(width, height);
        result.add_random_life(alive_probability, &mut rand);
        result
    }

    pub fn new_empty(width: u32, height: u32) -> Self {
        Self {
            grid: WorldGrid::new(width, height),
        }
    }

    fn add_random_life(&mut self, alive_probability: f64, rand: &mut Random) {
        for cell in self.grid.cells.cells_iter_mut() {
            if rand.next_bool(alive_probability) {
                cell.alive = true;
                cell.state = CellState::Born;
            }
        }
    }

    /// Stamps a single cell; used to seed fixed patterns.
    pub fn set_alive(&mut self, row: u32, col: u32, alive: bool) {
        let cell = &mut self.grid.cells[Loc::new(row, col)];
        cell.alive = alive;
        cell.state = if alive {
            CellState::Born
        } else {
            CellState::Dormant
        };
    }

    pub fn cell(&self, row: u32, col: u32) -> LifeCell {
        self.grid.cells[Loc::new(row, col)]
    }

    pub fn num_cells(&self) -> usize {
        self.grid.num_cells()
    }

    pub fn num_alive(&self) -> usize {
        self.grid.cells.cells_iter().filter(|cell| cell.alive).count()
    }
}

impl World for LifeWorld {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn update(&mut self) {
        self.grid.update();
    }

    fn pixel(&self, loc: Loc) -> u32 {
        self.grid.cells[loc].pixel_argb()
    }
}
