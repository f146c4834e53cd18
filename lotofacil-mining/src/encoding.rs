use lotofacil_data::csv_io::OneHotRow;
use lotofacil_data::models::{Draw, DrawError, PICK_COUNT, POOL_SIZE, validate_draw};
use ndarray::{Array1, Array2, Axis};

use crate::error::{MiningError, MiningResult};

/// Binary draw/number matrix: shape `(draws, 25)`, cell `(r, n - 1)` is 1 iff
/// number `n` was drawn in row `r`. Rows keep the history order.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceMatrix {
    cells: Array2<u8>,
}

/// Column of number `n`, or `None` outside 1..=25.
pub fn column_of(number: u8) -> Option<usize> {
    number
        .checked_sub(1)
        .map(usize::from)
        .filter(|&col| col < POOL_SIZE)
}

/// Bit `n - 1` is set for every number `n` in the set. Numbers outside 1..=25 set no bit.
pub fn number_mask(numbers: &[u8]) -> u32 {
    numbers
        .iter()
        .filter_map(|&n| column_of(n))
        .fold(0u32, |mask, col| mask | (1 << col))
}

/// Numbers of a mask, ascending.
pub fn mask_numbers(mask: u32) -> Vec<u8> {
    (1..=POOL_SIZE as u8).filter(|&n| mask & (1 << (n - 1)) != 0).collect()
}

/// Encode the whole history. Any malformed draw rejects the run.
pub fn encode(history: &[Draw]) -> MiningResult<OccurrenceMatrix> {
    if history.is_empty() {
        return Err(MiningError::InsufficientData("historique vide".to_string()));
    }

    let mut cells = Array2::zeros((history.len(), POOL_SIZE));
    for (row, draw) in history.iter().enumerate() {
        validate_draw(&draw.numbers).map_err(|source| MiningError::Validation { row, source })?;
        for &n in &draw.numbers {
            cells[[row, (n - 1) as usize]] = 1;
        }
    }
    Ok(OccurrenceMatrix { cells })
}

impl OccurrenceMatrix {
    /// Build from exported one-hot rows. Each row must still describe a full draw.
    pub fn from_onehot_rows(rows: &[OneHotRow]) -> MiningResult<Self> {
        if rows.is_empty() {
            return Err(MiningError::InsufficientData("matrice vide".to_string()));
        }

        let mut cells = Array2::zeros((rows.len(), POOL_SIZE));
        for (row, values) in rows.iter().enumerate() {
            let found = values.iter().filter(|&&v| v != 0).count();
            if found != PICK_COUNT {
                return Err(MiningError::Validation {
                    row,
                    source: DrawError::WrongCardinality { expected: PICK_COUNT, found },
                });
            }
            for (col, &v) in values.iter().enumerate() {
                cells[[row, col]] = u8::from(v != 0);
            }
        }
        Ok(OccurrenceMatrix { cells })
    }

    pub fn n_rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// `false` for a row past the end or a number outside 1..=25.
    pub fn contains(&self, row: usize, number: u8) -> bool {
        column_of(number)
            .and_then(|col| self.cells.get([row, col]))
            .is_some_and(|&v| v == 1)
    }

    /// One mask per row (see `number_mask`), used for support counting.
    pub fn row_masks(&self) -> Vec<u32> {
        self.cells
            .rows()
            .into_iter()
            .map(|r| {
                r.iter()
                    .enumerate()
                    .filter(|&(_, &v)| v == 1)
                    .fold(0u32, |mask, (col, _)| mask | (1 << col))
            })
            .collect()
    }

    /// Appearances of each number (index `n - 1`) over all rows.
    pub fn column_counts(&self) -> Array1<u32> {
        self.cells.mapv(|v| v as u32).sum_axis(Axis(0))
    }

    /// Appearance rate of each number over all rows.
    pub fn column_frequencies(&self) -> Array1<f64> {
        let total = self.n_rows().max(1) as f64;
        self.column_counts().mapv(|c| c as f64 / total)
    }

    /// The last `window` rows, or all rows if there are fewer.
    pub fn tail(&self, window: usize) -> OccurrenceMatrix {
        let start = self.n_rows().saturating_sub(window);
        OccurrenceMatrix {
            cells: self.cells.slice(ndarray::s![start.., ..]).to_owned(),
        }
    }

    pub fn onehot_rows(&self) -> Vec<OneHotRow> {
        self.cells
            .rows()
            .into_iter()
            .map(|r| {
                let mut out = [0u8; POOL_SIZE];
                for (col, &v) in r.iter().enumerate() {
                    out[col] = v;
                }
                out
            })
            .collect()
    }

    /// Decode rows back into draws (numbers ascending).
    pub fn draws(&self) -> Vec<Draw> {
        self.row_masks()
            .into_iter()
            .map(|mask| Draw::new(mask_numbers(mask)))
            .collect()
    }
}
