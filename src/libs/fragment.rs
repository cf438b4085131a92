use crate::libs::distance::{DistanceRow, CHROM_COL, NOT_AVAILABLE, POS_COL, SITE_COL};
use anyhow::Context;
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::HashMap;
use std::io::BufRead;

/// The two offset names of a fragment-length spec, in output order.
pub const OFFSET_NAMES: [&str; 2] = ["L", "H"];

//----------------------------
// FragmentLengths
//----------------------------

/// Per-enzyme fragment-length offsets, one per name in [`OFFSET_NAMES`].
///
/// Enzymes iterate in lengths-file row order, which fixes the column order
/// of the final table.
#[derive(Default)]
pub struct FragmentLengths {
    offsets: IndexMap<String, [i64; 2]>,
}

impl FragmentLengths {
    /// Loads offsets from a headered CSV with `Name`, `L` and `H` columns.
    pub fn from_csv<R: BufRead>(input: R) -> anyhow::Result<Self> {
        let mut rdr = csv::Reader::from_reader(input);
        let headers = rdr
            .headers()
            .context("could not read lengths file header")?
            .clone();

        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("lengths file lacks a '{}' column", name))
        };
        let name_idx = col("Name")?;
        let offset_idx = [col(OFFSET_NAMES[0])?, col(OFFSET_NAMES[1])?];

        let mut lengths = Self::default();
        for result in rdr.records() {
            let rec = result.context("could not read lengths row")?;
            let name = rec[name_idx].to_string();
            let mut offsets = [0i64; 2];
            for (slot, &idx) in offsets.iter_mut().zip(offset_idx.iter()) {
                *slot = rec[idx].parse().with_context(|| {
                    format!("invalid offset '{}' for enzyme '{}'", &rec[idx], name)
                })?;
            }
            lengths.offsets.insert(name, offsets);
        }

        Ok(lengths)
    }

    /// Enzyme names in file order.
    pub fn enzymes(&self) -> Vec<&str> {
        self.offsets.keys().map(|e| e.as_str()).collect()
    }

    pub fn get(&self, enzyme: &str) -> Option<&[i64; 2]> {
        self.offsets.get(enzyme)
    }

    /// Composite `<enzyme>_<offset>` column names, enzyme order crossed
    /// with [`OFFSET_NAMES`].
    ///
    /// ```
    /// use enzdist::libs::fragment::FragmentLengths;
    /// let input = "Name,L,H\nEcoRI,50,-10\nBamHI,30,60\n";
    /// let lengths = FragmentLengths::from_csv(input.as_bytes()).unwrap();
    /// assert_eq!(
    ///     lengths.columns(),
    ///     vec!["EcoRI_L", "EcoRI_H", "BamHI_L", "BamHI_H"]
    /// );
    /// ```
    pub fn columns(&self) -> Vec<String> {
        self.offsets
            .keys()
            .cartesian_product(OFFSET_NAMES)
            .map(|(enzyme, offset)| format!("{}_{}", enzyme, offset))
            .collect()
    }
}

//----------------------------
// Directions
//----------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Per-site direction assignments keyed by composite `<enzyme>_<offset>`
/// column name. Blank or unrecognized cells stay unassigned.
#[derive(Default)]
pub struct Directions {
    of_site: HashMap<String, HashMap<String, Direction>>,
}

impl Directions {
    /// Loads assignments from a headered CSV with an `IntegrationSite#`
    /// column plus one `<enzyme>_<offset>` column per assignable pair.
    pub fn from_csv<R: BufRead>(input: R) -> anyhow::Result<Self> {
        let mut rdr = csv::Reader::from_reader(input);
        let headers = rdr
            .headers()
            .context("could not read directions file header")?
            .clone();

        let site_idx = headers
            .iter()
            .position(|h| h == SITE_COL)
            .with_context(|| format!("directions file lacks a '{}' column", SITE_COL))?;

        let mut directions = Self::default();
        for result in rdr.records() {
            let rec = result.context("could not read directions row")?;
            let mut assigned = HashMap::new();
            for (idx, cell) in rec.iter().enumerate() {
                if idx == site_idx {
                    continue;
                }
                let direction = match cell {
                    "up" => Direction::Up,
                    "down" => Direction::Down,
                    _ => continue,
                };
                assigned.insert(headers[idx].to_string(), direction);
            }
            directions.of_site.insert(rec[site_idx].to_string(), assigned);
        }

        Ok(directions)
    }

    /// The assignment for one site and one composite column, if any.
    pub fn get(&self, site_id: &str, column: &str) -> Option<Direction> {
        self.of_site
            .get(site_id)
            .and_then(|assigned| assigned.get(column))
            .copied()
    }
}

//----------------------------
// Adjustment engine
//----------------------------

/// One final-table row; `values` is parallel to
/// [`FragmentLengths::columns`].
pub struct FinalRow {
    pub site_id: String,
    pub chromosome: String,
    pub position: i64,
    pub values: Vec<Option<i64>>,
}

/// Applies directional offsets to the raw distances.
///
/// For each site and each `<enzyme>_<offset>` pair the assigned direction
/// picks the upstream or downstream raw distance, and the offset is added
/// to it. An unassigned pair, or a pair whose picked distance is
/// unavailable, stays unavailable. `rows` must come from
/// `read_distances` resolved against the same `lengths`.
pub fn finalize(
    lengths: &FragmentLengths,
    directions: &Directions,
    rows: &[DistanceRow],
) -> Vec<FinalRow> {
    rows.iter()
        .map(|row| {
            let mut values = vec![];
            for (ei, (enzyme, offsets)) in lengths.offsets.iter().enumerate() {
                for (oi, offset_name) in OFFSET_NAMES.iter().enumerate() {
                    let column = format!("{}_{}", enzyme, offset_name);
                    let raw = match directions.get(&row.site_id, &column) {
                        Some(Direction::Up) => row.flanks[ei].0,
                        Some(Direction::Down) => row.flanks[ei].1,
                        None => None,
                    };
                    values.push(raw.map(|distance| distance + offsets[oi]));
                }
            }
            FinalRow {
                site_id: row.site_id.clone(),
                chromosome: row.chromosome.clone(),
                position: row.position,
                values,
            }
        })
        .collect()
}

/// Writes the final table: identity columns, then the composite columns of
/// `lengths` in order. Unavailable cells carry the sentinel token.
pub fn write_final(
    lengths: &FragmentLengths,
    rows: &[FinalRow],
    output: &str,
) -> anyhow::Result<()> {
    let writer = crate::writer(output)?;
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![SITE_COL.to_string(), CHROM_COL.to_string(), POS_COL.to_string()];
    header.extend(lengths.columns());
    wtr.write_record(&header)?;

    for row in rows {
        let mut fields = vec![
            row.site_id.clone(),
            row.chromosome.clone(),
            row.position.to_string(),
        ];
        for value in &row.values {
            fields.push(match value {
                Some(v) => v.to_string(),
                None => NOT_AVAILABLE.to_string(),
            });
        }
        wtr.write_record(&fields)?;
    }
    wtr.flush()?;

    Ok(())
}
