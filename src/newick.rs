//! A minimal Newick reader.
//!
//! Newick parsing is explicitly out of scope for TreeCluster's core (see
//! `spec.md` §1): this module exists only so the crate has something to feed
//! its drivers from a file or stdin. It intentionally does not support NHX
//! annotations, quoted/escaped labels, or comments — just enough of the
//! format to read the trees TreeCluster is given. Grounded loosely on the
//! arena-with-parent-pointers shape used by `extract_extant_script`'s
//! `FlatTree`, though this parser builds an intermediate nested tree first
//! (the shape `core::prepare` expects) rather than flattening directly.

use crate::error::{Result, TreeClusterError};

/// An as-parsed node: owned, nested, and not yet normalized. Internal-node
/// `name`s are re-interpreted as support values during normalization
/// (`core::prepare::normalize`); here they are just text.
#[derive(Debug, Clone)]
pub struct RawNode {
    pub name: Option<String>,
    pub edge_length: f64,
    pub children: Vec<RawNode>,
    /// Byte offset at which this node's text began, for error messages.
    pub offset: usize,
}

/// Reads every semicolon-terminated tree out of `text`, in order.
///
/// Trees may be separated by newlines, both, or neither; each chunk up to
/// and including its terminating `;` is parsed independently. Empty chunks
/// (blank lines) are skipped.
pub fn parse_all(text: &str) -> Result<Vec<RawNode>> {
    let mut trees = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b';' {
            let chunk = text[start..i].trim();
            start = i + 1;
            if chunk.is_empty() {
                continue;
            }
            trees.push(parse_one(chunk)?);
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        return Err(TreeClusterError::MalformedNewick {
            message: format!("trailing input after last ';': {tail:?}"),
        });
    }
    Ok(trees)
}

/// Parses a single tree whose terminating `;` has already been stripped.
fn parse_one(chunk: &str) -> Result<RawNode> {
    let mut parser = Parser {
        chars: chunk.chars().collect(),
        pos: 0,
    };
    let root = parser.parse_subtree()?;
    if parser.pos != parser.chars.len() {
        return Err(TreeClusterError::MalformedNewick {
            message: format!("unexpected trailing characters at position {}", parser.pos),
        });
    }
    Ok(root)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

const TERMINATORS: &[char] = &['(', ')', ',', ':', ';'];

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(TreeClusterError::MalformedNewick {
                message: format!("expected '{expected}' at position {}, found '{c}'", self.pos - 1),
            }),
            None => Err(TreeClusterError::MalformedNewick {
                message: format!("expected '{expected}' but reached end of input"),
            }),
        }
    }

    fn parse_subtree(&mut self) -> Result<RawNode> {
        let offset = self.pos;
        let children = if self.peek() == Some('(') {
            self.bump();
            let mut children = vec![self.parse_subtree()?];
            while self.peek() == Some(',') {
                self.bump();
                children.push(self.parse_subtree()?);
            }
            self.expect(')')?;
            children
        } else {
            Vec::new()
        };

        let name = self.parse_name();
        let edge_length = self.parse_length()?;

        Ok(RawNode {
            name,
            edge_length,
            children,
            offset,
        })
    }

    fn parse_name(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if TERMINATORS.contains(&c) {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(self.chars[start..self.pos].iter().collect::<String>().trim().to_string())
        }
    }

    fn parse_length(&mut self) -> Result<f64> {
        if self.peek() != Some(':') {
            return Ok(0.0);
        }
        self.bump();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if TERMINATORS.contains(&c) {
                break;
            }
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.trim().parse::<f64>().map_err(|_| TreeClusterError::MalformedNewick {
            message: format!("invalid branch length {text:?} at position {start}"),
        })
    }
}
