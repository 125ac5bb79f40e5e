//! CSV point input and cluster output

use anyhow::{bail, Context, Result};
use msc_cluster::Cluster;
use std::io::{Read, Write};
use std::path::Path;

/// Points read from one input, all with the same number of coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    pub points: Vec<Vec<f64>>,
    pub dim: usize,
}

impl PointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Read one point per line of comma-separated numbers.
///
/// The dimension is taken from the first record; every later record must
/// have the same number of fields.
pub fn read_points<R: Read>(reader: R) -> Result<PointSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut dim = None;
    for (i, record) in rdr.records().enumerate() {
        let record = record.context("failed to read CSV record")?;
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 1);

        let expected = *dim.get_or_insert(record.len());
        if record.len() != expected {
            bail!(
                "line {line}: expected {expected} fields, found {}",
                record.len()
            );
        }

        let point = record
            .iter()
            .map(|field| {
                field
                    .parse::<f64>()
                    .with_context(|| format!("line {line}: invalid number {field:?}"))
            })
            .collect::<Result<Vec<_>>>()?;
        points.push(point);
    }

    Ok(PointSet {
        points,
        dim: dim.unwrap_or(0),
    })
}

/// Read points from a file
pub fn read_points_from_path(path: &Path) -> Result<PointSet> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_points(file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Write `<cluster>,<x1>,...,<xd>` for every member, cluster by cluster.
///
/// Coordinates are the original input coordinates, not the shifted ones.
pub fn write_clusters<W: Write>(
    mut out: W,
    points: &PointSet,
    clusters: &[Cluster<f64>],
) -> std::io::Result<()> {
    for (c, cluster) in clusters.iter().enumerate() {
        for &index in cluster.members() {
            write!(out, "{c}")?;
            for x in &points.points[index][..points.dim] {
                write!(out, ",{x}")?;
            }
            writeln!(out)?;
        }
    }
    out.flush()
}
