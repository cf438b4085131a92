use anyhow::Context;
use indexmap::IndexMap;
use itertools::Itertools;
use std::io::BufRead;

/// Finds the nearest flanking positions around `target` in an ascending list.
///
/// Upstream is the greatest element strictly smaller than `target`,
/// downstream the least element strictly greater. An element equal to
/// `target` belongs to neither side.
///
/// ```
/// use enzdist::libs::site::flanking;
/// assert_eq!(flanking(&[100, 500], 300), (Some(100), Some(500)));
/// assert_eq!(flanking(&[100, 500], 100), (None, Some(500)));
/// assert_eq!(flanking(&[100], 100), (None, None));
/// assert_eq!(flanking(&[], 300), (None, None));
/// ```
pub fn flanking(positions: &[i64], target: i64) -> (Option<i64>, Option<i64>) {
    let mut upstream = None;
    let mut downstream = None;
    for &pos in positions {
        if pos < target {
            upstream = Some(pos);
        } else if pos > target {
            downstream = Some(pos);
            break;
        }
    }
    (upstream, downstream)
}

//----------------------------
// SiteIndex
//----------------------------

/// Cut-site coordinates grouped by enzyme, then chromosome.
///
/// Enzymes iterate in the order they were first seen in the input, which
/// fixes the column order of the distance table. Position lists are sorted
/// ascending after loading.
#[derive(Default)]
pub struct SiteIndex {
    positions: IndexMap<String, IndexMap<String, Vec<i64>>>,
    dropped: usize,
}

impl SiteIndex {
    /// Loads an index from unheadered CSV rows of (enzyme, chromosome, position).
    ///
    /// Rows with a field count other than 3 are skipped with a warning;
    /// a non-integer position fails the load.
    pub fn from_csv<R: BufRead>(input: R) -> anyhow::Result<Self> {
        let mut index = Self::default();

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        for result in rdr.records() {
            let rec = result.context("could not read enzyme row")?;
            if rec.len() != 3 {
                eprintln!(
                    "Warning: skipping malformed enzyme row: {}",
                    rec.iter().join(",")
                );
                index.dropped += 1;
                continue;
            }
            let pos: i64 = rec[2]
                .parse()
                .with_context(|| format!("invalid position '{}' for enzyme '{}'", &rec[2], &rec[0]))?;
            index
                .positions
                .entry(rec[0].to_string())
                .or_default()
                .entry(rec[1].to_string())
                .or_default()
                .push(pos);
        }

        for chrom_of in index.positions.values_mut() {
            for list in chrom_of.values_mut() {
                list.sort_unstable();
            }
        }

        Ok(index)
    }

    /// Enzyme names in discovery order.
    pub fn enzymes(&self) -> Vec<&str> {
        self.positions.keys().map(|e| e.as_str()).collect()
    }

    /// Sorted positions for one enzyme on one chromosome, if any were recorded.
    pub fn positions(&self, enzyme: &str, chrom: &str) -> Option<&[i64]> {
        self.positions
            .get(enzyme)
            .and_then(|chrom_of| chrom_of.get(chrom))
            .map(|list| list.as_slice())
    }

    /// Count of malformed rows skipped during loading.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
