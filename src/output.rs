//! The output assembler: `spec.md` §4.8.
//!
//! A fixed two-column tab-delimited table — no quoting or escaping rules to
//! honor — so a small writer over any [`std::io::Write`] is simpler than
//! wiring up a general CSV writer for a one-shot fixed schema.

use std::io::{self, Write};

use crate::core::tree::Tree;
use crate::Partition;

/// Writes one tree's partition as `SequenceName\tClusterNumber` rows.
///
/// Singleton clusters (size 1) are rendered with cluster number `-1`.
/// Non-singleton clusters are numbered `1, 2, 3, ...` in emission order.
pub fn write_partition<W: Write>(mut out: W, tree: &Tree, partition: &Partition) -> io::Result<()> {
    writeln!(out, "SequenceName\tClusterNumber")?;

    let mut cluster_number = 0usize;
    for cluster in partition {
        let label = if cluster.len() == 1 { -1 } else { cluster_number as i64 + 1 };
        if cluster.len() > 1 {
            cluster_number += 1;
        }
        for &leaf in cluster {
            let name = tree.label(leaf).expect("partition contains only leaf ids");
            writeln!(out, "{name}\t{label}")?;
        }
    }

    Ok(())
}
