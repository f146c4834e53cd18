use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::models::{Draw, POOL_SIZE, column_name};

/// One exported row: cell `i` is 1 iff number `i + 1` was drawn.
pub type OneHotRow = [u8; POOL_SIZE];

/// Contents of an input file, in file order.
#[derive(Debug, Clone)]
pub enum DrawTable {
    /// Raw draws, one row of numbers per draw.
    Draws(Vec<Draw>),
    /// Already encoded `num_1..num_25` rows.
    OneHot(Vec<OneHotRow>),
}

impl DrawTable {
    pub fn len(&self) -> usize {
        match self {
            DrawTable::Draws(draws) => draws.len(),
            DrawTable::OneHot(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn reader_for(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))
}

fn is_onehot_header(headers: &csv::StringRecord) -> bool {
    headers.len() == POOL_SIZE
        && headers
            .iter()
            .enumerate()
            .all(|(i, h)| h == column_name((i + 1) as u8))
}

/// Reads either a raw draw table or an exported one-hot table, depending on the header.
pub fn read_table(path: &Path) -> Result<DrawTable> {
    let mut reader = reader_for(path)?;
    let headers = reader
        .headers()
        .with_context(|| format!("En-tête illisible dans {:?}", path))?
        .clone();

    if is_onehot_header(&headers) {
        log::info!("{:?} : format one-hot détecté", path);
        Ok(DrawTable::OneHot(parse_onehot_records(&mut reader)?))
    } else {
        Ok(DrawTable::Draws(parse_draw_records(&mut reader)?))
    }
}

pub fn read_draws(path: &Path) -> Result<Vec<Draw>> {
    let mut reader = reader_for(path)?;
    parse_draw_records(&mut reader)
}

pub fn read_onehot(path: &Path) -> Result<Vec<OneHotRow>> {
    let mut reader = reader_for(path)?;
    let headers = reader
        .headers()
        .with_context(|| format!("En-tête illisible dans {:?}", path))?;
    if !is_onehot_header(headers) {
        bail!("{:?} n'est pas au format one-hot (num_1..num_{})", path, POOL_SIZE);
    }
    parse_onehot_records(&mut reader)
}

/// Rows with a wrong number of columns or out-of-range values are kept as-is; the encoder
/// checks them so the error carries the row index.
fn parse_draw_records<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<Draw>> {
    let mut draws = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Erreur lecture ligne {}", row))?;
        let numbers = record
            .iter()
            .filter(|field| !field.is_empty())
            .map(|field| {
                field
                    .parse::<i64>()
                    .with_context(|| format!("Impossible de parser '{}' (ligne {})", field, row))
            })
            .collect::<Result<Vec<i64>>>()?;
        draws.push(Draw::new(numbers));
    }
    Ok(draws)
}

fn parse_onehot_records<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<OneHotRow>> {
    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Erreur lecture ligne {}", row))?;
        if record.len() != POOL_SIZE {
            bail!("Ligne {} : {} colonnes au lieu de {}", row, record.len(), POOL_SIZE);
        }
        let mut cells = [0u8; POOL_SIZE];
        for (i, field) in record.iter().enumerate() {
            cells[i] = parse_cell(field)
                .with_context(|| format!("Ligne {}, colonne {}", row, column_name((i + 1) as u8)))?;
        }
        rows.push(cells);
    }
    Ok(rows)
}

// The export historically wrote floats ("1.0"), so both spellings are accepted.
fn parse_cell(field: &str) -> Result<u8> {
    let value: f64 = field
        .parse()
        .with_context(|| format!("Valeur non numérique '{}'", field))?;
    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        bail!("Valeur '{}' invalide (0 ou 1 attendu)", field)
    }
}

pub fn write_onehot(path: &Path, rows: &[OneHotRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Impossible de créer {:?}", path))?;

    let header: Vec<String> = (1..=POOL_SIZE as u8).map(column_name).collect();
    writer.write_record(&header).context("Échec de l'écriture de l'en-tête")?;

    for (row, cells) in rows.iter().enumerate() {
        writer
            .write_record(cells.iter().map(|c| c.to_string()))
            .with_context(|| format!("Échec de l'écriture de la ligne {}", row))?;
    }
    writer.flush().context("Échec du flush")?;
    Ok(())
}
