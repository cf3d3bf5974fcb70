use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hgr_graph::{read_partition, HyperGraph};
use serde::Serialize;

use super::{write_json, GraphInput};

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub graph: GraphInput,
    /// Partition file, one block id per node and line.
    #[arg(long)]
    pub partition: PathBuf,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PartitionReport {
    cut_size: Vec<f64>,
    scalar_cut_size: f64,
    block_size: Vec<Vec<f64>>,
    block_cut_size: Vec<Vec<f64>>,
    block_imbalance: Vec<Vec<f64>>,
}

pub fn run(args: &EvaluateArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.graph.load()?;
    let part = read_partition(&args.partition)?;
    let report = evaluate(&graph, &part)?;
    match &args.out {
        Some(path) => write_json(path, &report)?,
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn evaluate(graph: &HyperGraph, part: &[Option<usize>]) -> Result<PartitionReport, Box<dyn Error>> {
    let cut_size = graph.cut_size(part)?;
    Ok(PartitionReport {
        scalar_cut_size: graph.edge_weight_sum(&cut_size)?,
        cut_size,
        block_size: graph.block_size(part)?,
        block_cut_size: graph.block_cut_size(part)?,
        block_imbalance: graph.block_imbalance(part)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::node_ids;

    #[test]
    fn report_collects_every_metric() {
        let mut graph = HyperGraph::with_dims(1, 1).unwrap();
        for _ in 0..4 {
            graph.add_node(&[1.0]).unwrap();
        }
        graph.add_edge(&node_ids([0, 1, 2]), &[1.0]).unwrap();
        graph.add_edge(&node_ids([2, 3]), &[2.0]).unwrap();
        let report = evaluate(&graph, &[Some(0), Some(0), Some(1), Some(1)]).unwrap();
        assert_eq!(report.cut_size, vec![1.0]);
        assert_eq!(report.scalar_cut_size, 1.0);
        assert_eq!(report.block_cut_size, vec![vec![1.0], vec![1.0]]);
        assert_eq!(report.block_imbalance, vec![vec![0.0], vec![0.0]]);
    }
}
