use std::fs;
use std::path::Path;

use nom::IResult;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, digit1, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{preceded, separated_pair, tuple};
use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::Graph;

/// errors raised while reading a DIMACS file
#[derive(Error, Debug)]
pub enum DimacsError {
    /// the file could not be read
    #[error("unable to read the instance: {0}")]
    Io(#[from] std::io::Error),
    /// an edge was given before the `p` line, or no `p` line at all
    #[error("missing problem line (p edge n m)")]
    MissingHeader,
    /// a line is neither a comment, a problem line nor an edge
    #[error("line {line}: unable to parse {content:?}")]
    MalformedLine {
        /// line number (starting at 1)
        line: usize,
        /// content of the line
        content: String,
    },
    /// an edge uses a vertex outside 1..=n
    #[error("line {line}: vertex {vertex} is not in 1..={n}")]
    VertexOutOfRange {
        /// line number (starting at 1)
        line: usize,
        /// invalid vertex
        vertex: usize,
        /// number of vertices declared
        n: usize,
    },
}

/// reads a number
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    separated_pair(read_integer, space1, read_integer)(s)
}

/// reads header containing (n,m) (`p edge n m`, `p col n m`, ...)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    all_consuming(preceded(
        tuple((tag("p"), space1, alpha1, space1)),
        read_two_integers
    ))(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    all_consuming(preceded(tuple((tag("e"), space1)), read_two_integers))(s)
}

/**
parses a DIMACS graph. Nodes are labelled 1..=n (including isolated ones).
Comment lines (`c ...`) and blank lines are skipped.
The number of edge lines must be m or m/2 (some generators count both directions).
*/
pub fn parse_dimacs(content:&str) -> Result<Graph<usize>, DimacsError> {
    let mut header:Option<(usize,usize)> = None;
    let mut g = Graph::new();
    let mut nb_edges_read = 0;
    for (i, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let malformed = || DimacsError::MalformedLine { line: i+1, content: line.to_string() };
        match header {
            None => {
                if line.starts_with('e') {
                    return Err(DimacsError::MissingHeader);
                }
                let (_, (n,m)) = read_header(line).map_err(|_| malformed())?;
                g.add_nodes_from(1..=n);
                header = Some((n,m));
            },
            Some((n,_)) => {
                let (_, (a,b)) = read_edge(line).map_err(|_| malformed())?;
                for vertex in [a, b].iter() {
                    if *vertex == 0 || *vertex > n {
                        return Err(DimacsError::VertexOutOfRange { line: i+1, vertex: *vertex, n });
                    }
                }
                g.add_edge(a, b);
                nb_edges_read += 1;
            }
        }
    }
    let (n,m) = header.ok_or(DimacsError::MissingHeader)?;
    if nb_edges_read != m && 2*nb_edges_read != m {
        warn!(declared = m, lines = nb_edges_read, "edge count differs from the problem line");
    }
    if g.edge_count() != nb_edges_read {
        warn!(lines = nb_edges_read, edges = g.edge_count(), "duplicate edges or self-loops ignored");
    }
    debug!(n, m = g.edge_count(), "DIMACS instance parsed");
    Ok(g)
}

/// reads a DIMACS file
pub fn read_from_file<P:AsRef<Path>>(filename:P) -> Result<Graph<usize>, DimacsError> {
    let content = fs::read_to_string(filename)?;
    parse_dimacs(&content)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphInstance;

    #[test]
    fn test_read_header() {
        assert_eq!(read_header("p edge 2 1").unwrap().1, (2,1));
        assert_eq!(read_header("p col 12 30").unwrap().1, (12,30));
        assert!(read_header("p edge 2").is_err());
        assert!(read_header("p edge 2 1 extra").is_err());
    }

    #[test]
    fn test_read_edge() {
        assert_eq!(read_edge("e 1 2").unwrap().1, (1,2));
        assert_eq!(read_edge("e  14   3").unwrap().1, (14,3));
        assert!(read_edge("e 1").is_err());
        assert!(read_edge("x 1 2").is_err());
    }

    #[test]
    fn test_parse_grid() {
        let s = "c grid 2x2\nc second comment\np edge 4 4\ne 1 2\ne 2 4\ne 4 3\ne 3 1\n";
        let g = parse_dimacs(s).unwrap();
        assert_eq!(g.nb_vertices(), 4);
        assert_eq!(g.nb_edges(), 4);
        assert!(g.has_edge(&4, &2));
        assert!(!g.has_edge(&1, &4));
        assert_eq!(g.nodes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_isolated_vertices_and_windows_line_endings() {
        let s = "p edge 5 1\r\ne 1 2\r\n";
        let g = parse_dimacs(s).unwrap();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_edges_counted_twice() {
        let s = "p edge 2 2\ne 1 2\n";
        assert_eq!(parse_dimacs(s).unwrap().edge_count(), 1);
    }

    #[test]
    fn test_declared_edge_count_is_a_hint() {
        // the edges actually listed are kept whatever the problem line says
        let g = parse_dimacs("p edge 3 3\ne 1 2\n").unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
        let g = parse_dimacs("p col 4 0\ne 1 2\ne 2 3\ne 3 4\n").unwrap();
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_dimacs("e 1 2\n"), Err(DimacsError::MissingHeader)));
        assert!(matches!(parse_dimacs("c nothing\n"), Err(DimacsError::MissingHeader)));
        assert!(matches!(
            parse_dimacs("p edge 2 1\ne 1 3\n"),
            Err(DimacsError::VertexOutOfRange { line: 2, vertex: 3, n: 2 })
        ));
        assert!(matches!(
            parse_dimacs("p edge 3 1\nf 1 2\n"),
            Err(DimacsError::MalformedLine { line: 2, .. })
        ));
        assert!(matches!(read_from_file("does/not/exist.clq"), Err(DimacsError::Io(_))));
    }
}
