use thiserror::Error;

/// Highest number that can be drawn (numbers run from 1 to `POOL_SIZE`).
pub const POOL_SIZE: usize = 25;

/// Numbers drawn per game.
pub const PICK_COUNT: usize = 15;

/// One draw as read from input. Numbers are kept in file order and as read,
/// so a bad value like `300` or `-1` survives until `validate_draw` rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub numbers: Vec<i64>,
}

impl Draw {
    pub fn new<N: Into<i64>>(numbers: impl IntoIterator<Item = N>) -> Self {
        Self {
            numbers: numbers.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("{found} numéros au lieu de {expected}")]
    WrongCardinality { expected: usize, found: usize },

    #[error("Numéro {0} hors limites (1-{max})", max = POOL_SIZE)]
    OutOfRange(i64),

    #[error("Numéro en double : {0}")]
    Duplicate(i64),
}

pub fn validate_draw(numbers: &[i64]) -> Result<(), DrawError> {
    if numbers.len() != PICK_COUNT {
        return Err(DrawError::WrongCardinality {
            expected: PICK_COUNT,
            found: numbers.len(),
        });
    }
    for &n in numbers {
        if !(1..=POOL_SIZE as i64).contains(&n) {
            return Err(DrawError::OutOfRange(n));
        }
    }
    let mut seen = [false; POOL_SIZE];
    for &n in numbers {
        let idx = (n - 1) as usize;
        if seen[idx] {
            return Err(DrawError::Duplicate(n));
        }
        seen[idx] = true;
    }
    Ok(())
}

/// Column name of a number in the one-hot layout (`num_1` .. `num_25`).
pub fn column_name(number: u8) -> String {
    format!("num_{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Vec<i64> {
        (1..=15).collect()
    }

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&valid()).is_ok());
        assert!(validate_draw(&(11..=25).rev().collect::<Vec<i64>>()).is_ok());
    }

    #[test]
    fn test_validate_draw_wrong_cardinality() {
        let short: Vec<i64> = (1..=14).collect();
        assert_eq!(
            validate_draw(&short),
            Err(DrawError::WrongCardinality { expected: 15, found: 14 })
        );
        let long: Vec<i64> = (1..=16).collect();
        assert!(matches!(
            validate_draw(&long),
            Err(DrawError::WrongCardinality { found: 16, .. })
        ));
    }

    #[test]
    fn test_validate_draw_out_of_range() {
        let mut numbers = valid();
        numbers[0] = 0;
        assert_eq!(validate_draw(&numbers), Err(DrawError::OutOfRange(0)));
        numbers[0] = 26;
        assert_eq!(validate_draw(&numbers), Err(DrawError::OutOfRange(26)));
        numbers[0] = 300;
        assert_eq!(validate_draw(&numbers), Err(DrawError::OutOfRange(300)));
        numbers[0] = -1;
        assert_eq!(validate_draw(&numbers), Err(DrawError::OutOfRange(-1)));
    }

    #[test]
    fn test_validate_draw_duplicate() {
        let mut numbers = valid();
        numbers[14] = 3;
        assert_eq!(validate_draw(&numbers), Err(DrawError::Duplicate(3)));
    }

    #[test]
    fn test_draw_new_widens() {
        let draw = Draw::new([3u8, 25]);
        assert_eq!(draw.numbers, vec![3i64, 25]);
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(1), "num_1");
        assert_eq!(column_name(25), "num_25");
    }
}
