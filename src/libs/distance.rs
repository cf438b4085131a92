use crate::libs::site::{flanking, SiteIndex};
use anyhow::Context;
use itertools::Itertools;
use std::io::{BufRead, Write};

/// Sentinel token written for a distance with no flanking site.
pub const NOT_AVAILABLE: &str = "not available";

pub const SITE_COL: &str = "IntegrationSite#";
pub const CHROM_COL: &str = "Chromosome";
pub const POS_COL: &str = "Position";

/// Raw flanking distances for one integration site, one enzyme.
pub struct EnzymeDistance {
    pub enzyme: String,
    pub upstream: Option<i64>,
    pub downstream: Option<i64>,
}

/// One row of the wide distance table: an integration site with its
/// per-enzyme flanking distances, enzymes in index discovery order.
pub struct SiteDistances {
    pub site_id: String,
    pub chromosome: String,
    pub position: i64,
    pub enzymes: Vec<EnzymeDistance>,
}

/// Computes upstream/downstream distances for every integration site
/// against every enzyme in the index.
///
/// Integration rows are unheadered CSV (site, chromosome, position); rows
/// with a field count other than 3 are skipped with a warning. A chromosome
/// unknown to an enzyme yields unavailable distances on both sides.
pub fn calc_distances<R: BufRead>(
    index: &SiteIndex,
    input: R,
) -> anyhow::Result<Vec<SiteDistances>> {
    let mut results = vec![];

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    for result in rdr.records() {
        let rec = result.context("could not read integration row")?;
        if rec.len() != 3 {
            eprintln!(
                "Warning: skipping malformed integration row: {}",
                rec.iter().join(",")
            );
            continue;
        }
        let position: i64 = rec[2]
            .parse()
            .with_context(|| format!("invalid position '{}' for site '{}'", &rec[2], &rec[0]))?;
        let chromosome = rec[1].to_string();

        let enzymes = index
            .enzymes()
            .iter()
            .map(|&enzyme| match index.positions(enzyme, &chromosome) {
                Some(positions) => {
                    let (upstream, downstream) = flanking(positions, position);
                    EnzymeDistance {
                        enzyme: enzyme.to_string(),
                        upstream: upstream.map(|u| position - u),
                        downstream: downstream.map(|d| d - position),
                    }
                }
                None => EnzymeDistance {
                    enzyme: enzyme.to_string(),
                    upstream: None,
                    downstream: None,
                },
            })
            .collect();

        results.push(SiteDistances {
            site_id: rec[0].to_string(),
            chromosome,
            position,
            enzymes,
        });
    }

    Ok(results)
}

/// Writes the wide distance table to `output`.
///
/// With no rows nothing is written at all, not even an empty file, and
/// `false` is returned. The enzyme column set comes from the first row;
/// `calc_distances` guarantees every row carries the same enzymes.
pub fn write_distances(rows: &[SiteDistances], output: &str) -> anyhow::Result<bool> {
    if rows.is_empty() {
        eprintln!("No distance results to write");
        return Ok(false);
    }

    let writer = crate::writer(output)?;
    emit_distances(rows, writer)?;

    Ok(true)
}

fn emit_distances<W: Write>(rows: &[SiteDistances], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![SITE_COL.to_string(), CHROM_COL.to_string(), POS_COL.to_string()];
    for ed in &rows[0].enzymes {
        header.push(format!("{} UpstreamDist", ed.enzyme));
        header.push(format!("{} DownstreamDist", ed.enzyme));
    }
    wtr.write_record(&header)?;

    for row in rows {
        let mut fields = vec![
            row.site_id.clone(),
            row.chromosome.clone(),
            row.position.to_string(),
        ];
        for ed in &row.enzymes {
            fields.push(render(ed.upstream));
            fields.push(render(ed.downstream));
        }
        wtr.write_record(&fields)?;
    }
    wtr.flush()?;

    Ok(())
}

fn render(value: Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// One distance-table row read back for finalizing, with the upstream and
/// downstream values of each requested enzyme. `flanks` is parallel to the
/// enzyme list passed to [`read_distances`].
pub struct DistanceRow {
    pub site_id: String,
    pub chromosome: String,
    pub position: i64,
    pub flanks: Vec<(Option<i64>, Option<i64>)>,
}

/// Reads the wide distance table back, resolving the upstream/downstream
/// columns of each enzyme in `enzymes` from the header once. An enzyme
/// whose columns are absent from the table reads as unavailable everywhere.
pub fn read_distances<R: BufRead>(
    input: R,
    enzymes: &[&str],
) -> anyhow::Result<Vec<DistanceRow>> {
    let mut rdr = csv::Reader::from_reader(input);
    let headers = rdr.headers().context("could not read distance table header")?.clone();

    let col = |name: &str| headers.iter().position(|h| h == name);
    let site_idx = col(SITE_COL)
        .with_context(|| format!("distance table lacks a '{}' column", SITE_COL))?;
    let chrom_idx = col(CHROM_COL)
        .with_context(|| format!("distance table lacks a '{}' column", CHROM_COL))?;
    let pos_idx = col(POS_COL)
        .with_context(|| format!("distance table lacks a '{}' column", POS_COL))?;

    let flank_idx: Vec<(Option<usize>, Option<usize>)> = enzymes
        .iter()
        .map(|enzyme| {
            (
                col(&format!("{} UpstreamDist", enzyme)),
                col(&format!("{} DownstreamDist", enzyme)),
            )
        })
        .collect();

    let mut rows = vec![];
    for result in rdr.records() {
        let rec = result.context("could not read distance row")?;

        let position: i64 = rec[pos_idx].parse().with_context(|| {
            format!("invalid position '{}' for site '{}'", &rec[pos_idx], &rec[site_idx])
        })?;

        let mut flanks = Vec::with_capacity(flank_idx.len());
        for &(up, down) in &flank_idx {
            let up = match up {
                Some(i) => parse_cell(&rec[i])?,
                None => None,
            };
            let down = match down {
                Some(i) => parse_cell(&rec[i])?,
                None => None,
            };
            flanks.push((up, down));
        }

        rows.push(DistanceRow {
            site_id: rec[site_idx].to_string(),
            chromosome: rec[chrom_idx].to_string(),
            position,
            flanks,
        });
    }

    Ok(rows)
}

fn parse_cell(cell: &str) -> anyhow::Result<Option<i64>> {
    if cell == NOT_AVAILABLE {
        return Ok(None);
    }
    let value = cell
        .parse()
        .with_context(|| format!("invalid distance value '{}'", cell))?;
    Ok(Some(value))
}
