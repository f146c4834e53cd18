use anyhow::{Context, Result};
use std::path::Path;

use lotofacil_data::csv_io::{DrawTable, read_draws, read_table, write_onehot};
use lotofacil_data::models::Draw;
use lotofacil_mining::encoding::{OccurrenceMatrix, encode};

/// History loaded from disk, either as raw draws or as an exported matrix.
pub enum History {
    Draws(Vec<Draw>),
    Matrix(OccurrenceMatrix),
}

impl History {
    pub fn len(&self) -> usize {
        match self {
            History::Draws(draws) => draws.len(),
            History::Matrix(matrix) => matrix.n_rows(),
        }
    }

    /// Draws for pattern statistics; decoded from the matrix when needed.
    pub fn draws(&self) -> Vec<Draw> {
        match self {
            History::Draws(draws) => draws.clone(),
            History::Matrix(matrix) => matrix.draws(),
        }
    }
}

pub fn load_history(path: &Path) -> Result<History> {
    match read_table(path)? {
        DrawTable::Draws(draws) => {
            log::info!("{:?} : {} tirages bruts lus", path, draws.len());
            Ok(History::Draws(draws))
        }
        DrawTable::OneHot(rows) => {
            let matrix = OccurrenceMatrix::from_onehot_rows(&rows)
                .with_context(|| format!("Matrice one-hot invalide dans {:?}", path))?;
            log::info!("{:?} : matrice de {} lignes lue", path, matrix.n_rows());
            Ok(History::Matrix(matrix))
        }
    }
}

#[derive(Debug)]
pub struct ExportResult {
    pub rows: usize,
}

/// Encode a raw draw file and write it as `num_1..num_25` columns.
pub fn export_onehot(input: &Path, output: &Path) -> Result<ExportResult> {
    let draws = read_draws(input)?;
    let matrix = encode(&draws).with_context(|| format!("Tirages invalides dans {:?}", input))?;
    let rows = matrix.onehot_rows();
    write_onehot(output, &rows)?;
    log::info!("{} lignes exportées vers {:?}", rows.len(), output);
    Ok(ExportResult { rows: rows.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotofacil_data::models::DrawError;
    use lotofacil_mining::MiningError;
    use std::io::Write;

    fn raw_file(rows: &[Vec<u8>]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let header: Vec<String> = (1..=15).map(|i| format!("Bola{i}")).collect();
        writeln!(file, "{}", header.join(",")).unwrap();
        for row in rows {
            let cells: Vec<String> = row.iter().map(|n| n.to_string()).collect();
            writeln!(file, "{}", cells.join(",")).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_export_then_load_matrix() {
        let input = raw_file(&[(1..=15).collect(), (11..=25).collect()]);
        let output = tempfile::NamedTempFile::new().unwrap();

        let result = export_onehot(input.path(), output.path()).unwrap();
        assert_eq!(result.rows, 2);

        match load_history(output.path()).unwrap() {
            History::Matrix(matrix) => {
                assert_eq!(matrix.n_rows(), 2);
                assert!(matrix.contains(1, 25));
                assert!(!matrix.contains(0, 25));
            }
            History::Draws(_) => panic!("exported file should load as a matrix"),
        }
    }

    #[test]
    fn test_export_rejects_invalid_draw() {
        let input = raw_file(&[(1..=14).collect()]);
        let output = tempfile::NamedTempFile::new().unwrap();
        assert!(export_onehot(input.path(), output.path()).is_err());
    }

    #[test]
    fn test_export_rejects_out_of_range_as_validation() {
        let output = tempfile::NamedTempFile::new().unwrap();
        for bad in ["300", "-1"] {
            let mut input = tempfile::NamedTempFile::new().unwrap();
            let header: Vec<String> = (1..=15).map(|i| format!("Bola{i}")).collect();
            writeln!(input, "{}", header.join(",")).unwrap();
            writeln!(input, "1,2,3,4,5,6,7,8,9,10,11,12,13,14,{bad}").unwrap();
            input.flush().unwrap();

            let err = export_onehot(input.path(), output.path()).unwrap_err();
            let mining = err.downcast_ref::<MiningError>().unwrap();
            assert!(matches!(
                mining,
                MiningError::Validation { row: 0, source: DrawError::OutOfRange(_) }
            ));
        }
    }

    #[test]
    fn test_load_raw_draws() {
        let input = raw_file(&[(1..=15).collect()]);
        let history = load_history(input.path()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.draws()[0].numbers, (1..=15).collect::<Vec<i64>>());
    }
}
