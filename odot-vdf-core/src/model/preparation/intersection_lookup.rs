use std::{
    collections::HashMap,
    io::Read,
    path::{Path, PathBuf},
};

use crate::model::preparation::{ControlCategory, PreparationError};

/// row name of the cycle length entries
pub const CYCLE_LENGTH_KEY: &str = "cyclelength";

/// signal timing assumptions by approach facility class, control category
/// and intersecting facility class.
///
/// the table is read from a CSV file shaped like
///
/// ```text
/// PLANNO,VALUE,1,3,4,5,6,7,30
/// 1,cyclelength,120,120,110,100,90,90,90
/// 1,gc4leg,0.35,0.39,0.5,0.56,0.56,0.63,0.47
/// ```
///
/// where the numbered header columns are intersecting facility classes.
#[derive(Clone, Debug, Default)]
pub struct IntersectionLookup {
    values: HashMap<(u32, String, u32), f64>,
}

impl IntersectionLookup {
    pub fn from_path(path: &Path) -> Result<IntersectionLookup, PreparationError> {
        let file = std::fs::File::open(path).map_err(|e| PreparationError::InvalidLookupTable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        IntersectionLookup::from_reader(file, path)
    }

    /// reads a lookup table. `path` is only used in error messages.
    pub fn from_reader<R: Read>(
        reader: R,
        path: &Path,
    ) -> Result<IntersectionLookup, PreparationError> {
        let error = |message: String| PreparationError::InvalidLookupTable {
            path: PathBuf::from(path),
            message,
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| error(format!("failure reading header: {e}")))?
            .clone();
        if headers.len() < 3 {
            return Err(error(format!(
                "expected PLANNO, VALUE and at least one facility class column, found {} columns",
                headers.len()
            )));
        }
        let columns = headers
            .iter()
            .skip(2)
            .map(|h| {
                h.parse::<u32>()
                    .map_err(|e| error(format!("header '{h}' is not a facility class: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = HashMap::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row.map_err(|e| error(format!("failure reading row {idx}: {e}")))?;
            let plan_no = row
                .get(0)
                .unwrap_or_default()
                .parse::<u32>()
                .map_err(|e| error(format!("row {idx} has invalid PLANNO: {e}")))?;
            let name = row.get(1).unwrap_or_default().to_lowercase();
            for (col, int_fc) in columns.iter().enumerate() {
                let cell = row.get(col + 2).unwrap_or_default();
                if cell.is_empty() {
                    continue;
                }
                let value = cell.parse::<f64>().map_err(|e| {
                    error(format!("row {idx} column {int_fc} has invalid value '{cell}': {e}"))
                })?;
                values.insert((plan_no, name.clone(), *int_fc), value);
            }
        }
        log::debug!(
            "read {} intersection lookup values from {}",
            values.len(),
            path.display()
        );
        Ok(IntersectionLookup { values })
    }

    pub fn get(&self, plan_no: u32, name: &str, intersecting_class: u32) -> Option<f64> {
        self.values
            .get(&(plan_no, name.to_string(), intersecting_class))
            .copied()
    }

    pub fn cycle_length(&self, plan_no: u32, intersecting_class: u32) -> Option<f64> {
        self.get(plan_no, CYCLE_LENGTH_KEY, intersecting_class)
    }

    /// green time over cycle length for an approach
    pub fn gc_ratio(
        &self,
        plan_no: u32,
        category: ControlCategory,
        intersecting_class: u32,
    ) -> Option<f64> {
        self.get(plan_no, category.lookup_key(), intersecting_class)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
