//! hMETIS hypergraph and partition files.
//!
//! Graph files start with `<edges> <nodes> [flags]`. The first flag character
//! set to `1` means edge lines begin with `edge_weight_dim` weights; the
//! second means `node_count` node weight lines follow the edges. Member ids are
//! 1-based on disk. Lines starting with `%` are comments. Missing weights
//! default to `1.0` per dimension.
//!
//! Partition files hold one block id per node and line, `-1` when unassigned.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use hgr_core::errors::{ErrorInfo, HgrError};
use hgr_core::{BlockId, NodeId, PartResult};
use tracing::{info, warn};

use crate::config::GraphConfig;
use crate::hypergraph::HyperGraph;

impl HyperGraph {
    /// Writes the graph to `path` in hMETIS format with edge and node weights.
    pub fn save_hmetis(&self, path: impl AsRef<Path>) -> Result<(), HgrError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| io_error(err, path))?;
        let mut writer = BufWriter::new(file);
        write_hmetis(self, &mut writer)?;
        writer.flush().map_err(|err| io_error(err, path))?;
        info!(
            path = %path.display(),
            nodes = self.node_count(),
            edges = self.edge_count(),
            "saved hMETIS graph"
        );
        Ok(())
    }

    /// Reads an hMETIS graph from `path` using the given weight factors.
    pub fn read_hmetis(
        path: impl AsRef<Path>,
        node_weight_factor: &[f64],
        edge_weight_factor: &[f64],
    ) -> Result<HyperGraph, HgrError> {
        let config = GraphConfig::new(node_weight_factor.to_vec(), edge_weight_factor.to_vec());
        read_hmetis(path, config)
    }
}

/// Writes `graph` in hMETIS format; the header always carries the `11` flag.
pub fn write_hmetis<W: Write>(graph: &HyperGraph, mut writer: W) -> Result<(), HgrError> {
    writeln!(writer, "{} {} 11", graph.edge_count(), graph.node_count())?;
    for edge in graph.edge_records() {
        let mut fields: Vec<String> = edge.weights.iter().map(|w| w.to_string()).collect();
        fields.extend(edge.members.iter().map(|m| (m.index() + 1).to_string()));
        writeln!(writer, "{}", fields.join(" "))?;
    }
    for node in graph.node_records() {
        let fields: Vec<String> = node.weights.iter().map(|w| w.to_string()).collect();
        writeln!(writer, "{}", fields.join(" "))?;
    }
    Ok(())
}

/// Reads an hMETIS graph from `path`.
pub fn read_hmetis(path: impl AsRef<Path>, config: GraphConfig) -> Result<HyperGraph, HgrError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| io_error(err, path))?;
    let graph = parse_hmetis(BufReader::new(file), config)
        .map_err(|err| err.with_context("path", path.display()))?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded hMETIS graph"
    );
    Ok(graph)
}

/// Parses an hMETIS graph from any buffered reader.
pub fn parse_hmetis<R: BufRead>(reader: R, config: GraphConfig) -> Result<HyperGraph, HgrError> {
    let mut graph = HyperGraph::new(config)?;
    let edge_dim = graph.edge_weight_dim();
    let node_dim = graph.node_weight_dim();
    let mut lines = ContentLines::new(reader);

    let (line_no, header) = lines.next_line()?.ok_or_else(|| format_error("missing-header", 0))?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 3 {
        return Err(format_error("malformed-header", line_no));
    }
    let edge_count: usize = parse_token(tokens[0], line_no)?;
    let node_count: usize = parse_token(tokens[1], line_no)?;
    let (has_edge_weights, has_node_weights) = match tokens.get(2) {
        None => (false, false),
        Some(flags) => {
            if flags.is_empty() || flags.len() > 2 || !flags.chars().all(|c| c == '0' || c == '1') {
                return Err(format_error("malformed-flags", line_no).with_context("flags", flags));
            }
            let mut chars = flags.chars();
            (chars.next() == Some('1'), chars.next() == Some('1'))
        }
    };

    let mut edges = Vec::new();
    for _ in 0..edge_count {
        let (line_no, line) = lines
            .next_line()?
            .ok_or_else(|| format_error("truncated-edges", lines.line_no))?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (weights, members) = if has_edge_weights {
            if tokens.len() < edge_dim {
                return Err(format_error("missing-edge-weights", line_no));
            }
            let weights = tokens[..edge_dim]
                .iter()
                .map(|t| parse_token::<f64>(t, line_no))
                .collect::<Result<Vec<_>, _>>()?;
            (weights, &tokens[edge_dim..])
        } else {
            (vec![1.0; edge_dim], &tokens[..])
        };
        let members = members
            .iter()
            .map(|t| {
                let id: usize = parse_token(t, line_no)?;
                if id == 0 {
                    return Err(format_error("zero-node-id", line_no));
                }
                Ok(NodeId::from_index(id - 1))
            })
            .collect::<Result<Vec<_>, _>>()?;
        edges.push((line_no, members, weights));
    }

    for _ in 0..node_count {
        let weights = if has_node_weights {
            let (line_no, line) = lines
                .next_line()?
                .ok_or_else(|| format_error("truncated-nodes", lines.line_no))?;
            let weights = line
                .split_whitespace()
                .map(|t| parse_token::<f64>(t, line_no))
                .collect::<Result<Vec<_>, _>>()?;
            if weights.len() != node_dim {
                return Err(format_error("node-weight-count", line_no)
                    .with_context("expected", node_dim)
                    .with_context("actual", weights.len()));
            }
            weights
        } else {
            vec![1.0; node_dim]
        };
        graph.add_node(&weights)?;
    }

    for (line_no, members, weights) in edges {
        graph
            .add_edge(&members, &weights)
            .map_err(|err| err.with_context("line", line_no))?;
    }

    if let Some((line_no, _)) = lines.next_line()? {
        warn!(line = line_no, "ignoring trailing content after hMETIS graph");
    }
    Ok(graph)
}

/// Writes a partition result, one block id per line and `-1` for unassigned nodes.
pub fn write_partition<W: Write>(part: &[Option<BlockId>], mut writer: W) -> Result<(), HgrError> {
    for block in part {
        match block {
            Some(block) => writeln!(writer, "{block}")?,
            None => writeln!(writer, "-1")?,
        }
    }
    Ok(())
}

/// Parses a partition file; `-1` becomes `None`.
pub fn parse_partition<R: BufRead>(reader: R) -> Result<PartResult, HgrError> {
    let mut lines = ContentLines::new(reader);
    let mut part = Vec::new();
    while let Some((line_no, line)) = lines.next_line()? {
        let value: i64 = parse_token(line.trim(), line_no)?;
        match value {
            -1 => part.push(None),
            v if v >= 0 => part.push(Some(v as BlockId)),
            _ => return Err(format_error("negative-block", line_no).with_context("value", value)),
        }
    }
    Ok(part)
}

/// Saves a partition result to `path`.
pub fn save_partition(part: &[Option<BlockId>], path: impl AsRef<Path>) -> Result<(), HgrError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| io_error(err, path))?;
    let mut writer = BufWriter::new(file);
    write_partition(part, &mut writer)?;
    writer.flush().map_err(|err| io_error(err, path))?;
    Ok(())
}

/// Reads a partition result from `path`.
pub fn read_partition(path: impl AsRef<Path>) -> Result<PartResult, HgrError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| io_error(err, path))?;
    parse_partition(BufReader::new(file)).map_err(|err| err.with_context("path", path.display()))
}

/// Iterates non-empty, non-comment lines with their 1-based line numbers.
struct ContentLines<R> {
    reader: R,
    line_no: usize,
}

impl<R: BufRead> ContentLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, line_no: 0 }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>, HgrError> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            return Ok(Some((self.line_no, trimmed.to_string())));
        }
    }
}

fn parse_token<T: std::str::FromStr>(token: &str, line_no: usize) -> Result<T, HgrError> {
    token
        .parse()
        .map_err(|_| format_error("invalid-token", line_no).with_context("token", token))
}

fn format_error(code: &str, line_no: usize) -> HgrError {
    HgrError::Format(
        ErrorInfo::new(code, "malformed hMETIS input").with_context("line", line_no),
    )
}

fn io_error(err: std::io::Error, path: &Path) -> HgrError {
    HgrError::from(err).with_context("path", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hgr_core::EdgeId;

    #[test]
    fn reads_unweighted_graph() {
        let text = "% two nets\n2 4\n1 2 3\n\n3 4\n";
        let graph = parse_hmetis(text.as_bytes(), GraphConfig::uniform(2, 1)).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_weights(NodeId::from_raw(3)).unwrap(), &[1.0, 1.0]);
        assert_eq!(
            graph.members_of(EdgeId::from_raw(1)).unwrap(),
            &[NodeId::from_raw(2), NodeId::from_raw(3)]
        );
    }

    #[test]
    fn reads_edge_weights_only() {
        let text = "2 3 10\n5 1 2\n7 2 3\n";
        let graph = parse_hmetis(text.as_bytes(), GraphConfig::uniform(1, 1)).unwrap();
        assert_eq!(graph.total_edge_weight().unwrap(), vec![12.0]);
        assert_eq!(graph.total_node_weight().unwrap(), vec![3.0]);
    }

    #[test]
    fn writer_emits_both_flags() {
        let text = "1 2 11\n2.5 1 2\n3\n4\n";
        let graph = parse_hmetis(text.as_bytes(), GraphConfig::uniform(1, 1)).unwrap();
        let mut out = Vec::new();
        write_hmetis(&graph, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2 11\n2.5 1 2\n3\n4\n");
    }

    #[test]
    fn truncated_node_section_fails() {
        let text = "1 3 11\n1 1 2\n1\n1\n";
        let err = parse_hmetis(text.as_bytes(), GraphConfig::uniform(1, 1)).unwrap_err();
        assert!(matches!(err, HgrError::Format(info) if info.code == "truncated-nodes"));
    }

    #[test]
    fn oversized_header_is_truncated_input() {
        let err = parse_hmetis("99999999999999999 1\n1 2\n".as_bytes(), GraphConfig::default())
            .unwrap_err();
        assert!(matches!(err, HgrError::Format(info) if info.code == "truncated-edges"));
    }

    #[test]
    fn zero_based_ids_are_rejected() {
        let text = "1 2\n0 1\n";
        let err = parse_hmetis(text.as_bytes(), GraphConfig::uniform(1, 1)).unwrap_err();
        assert!(matches!(err, HgrError::Format(info) if info.code == "zero-node-id"));
    }

    #[test]
    fn single_member_edge_is_invalid() {
        let text = "1 2\n1\n";
        let err = parse_hmetis(text.as_bytes(), GraphConfig::uniform(1, 1)).unwrap_err();
        assert!(matches!(err, HgrError::InvalidEdge(info) if info.context["line"] == "2"));
    }

    #[test]
    fn partitions_keep_unassigned_nodes() {
        let part = vec![Some(0), None, Some(3)];
        let mut out = Vec::new();
        write_partition(&part, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.clone()).unwrap(), "0\n-1\n3\n");
        assert_eq!(parse_partition(out.as_slice()).unwrap(), part);
        assert!(parse_partition("-2\n".as_bytes()).is_err());
    }
}
