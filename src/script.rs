//! Build scripts: a line-oriented description of a tree.
//!
//! ```text
//! # comment
//! root 1
//! left 1 2
//! right 1 3
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::node::Side;
use crate::tree::BinaryTree;

const INSTRUCTION_PATTERN: &str = r"^(?P<op>root|left|right)(?P<args>(?:\s+\S+)+)$";

/// One parsed build-script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Root(String),
    Child {
        side: Side,
        existing: String,
        value: String,
    },
}

impl Instruction {
    pub fn apply(self, tree: &mut BinaryTree<String>) -> TreeResult<()> {
        match self {
            Instruction::Root(value) => {
                tree.add_root(value);
            }
            Instruction::Child {
                side,
                existing,
                value,
            } => {
                tree.add_child(side, &existing, value)?;
            }
        }
        Ok(())
    }
}

pub struct ScriptBuilder {
    instruction_regex: Regex,
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            instruction_regex: Regex::new(INSTRUCTION_PATTERN).unwrap(),
        }
    }

    /// Parses one line; blank lines and `#` comments yield `None`.
    pub fn parse_line(&self, line_no: usize, line: &str) -> TreeResult<Option<Instruction>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let caps = self
            .instruction_regex
            .captures(trimmed)
            .ok_or_else(|| script_err(line_no, format!("unrecognized instruction '{trimmed}'")))?;
        let args: Vec<&str> = caps["args"].split_whitespace().collect();

        let instruction = match (&caps["op"], args.as_slice()) {
            ("root", [value]) => Instruction::Root(value.to_string()),
            ("left", [existing, value]) => child(Side::Left, existing, value),
            ("right", [existing, value]) => child(Side::Right, existing, value),
            ("root", _) => return Err(script_err(line_no, "'root' takes exactly one value")),
            (op, _) => {
                return Err(script_err(
                    line_no,
                    format!("'{op}' takes an existing value and a new value"),
                ))
            }
        };
        Ok(Some(instruction))
    }

    pub fn parse(&self, content: &str) -> TreeResult<Vec<(usize, Instruction)>> {
        let mut instructions = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if let Some(instruction) = self.parse_line(idx + 1, line)? {
                instructions.push((idx + 1, instruction));
            }
        }
        Ok(instructions)
    }

    /// Parses `content` and applies each instruction in turn.
    ///
    /// A child instruction whose target value is missing fails with the line
    /// number of the offending instruction.
    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, content: &str) -> TreeResult<BinaryTree<String>> {
        let mut tree = BinaryTree::new();
        for (line_no, instruction) in self.parse(content)? {
            debug!("line {}: {:?}", line_no, instruction);
            instruction.apply(&mut tree).map_err(|e| match e {
                TreeError::ValueNotFound { .. } => script_err(line_no, e.to_string()),
                other => other,
            })?;
        }
        Ok(tree)
    }

    /// Reads a script from `path`, or from stdin when `path` is `-`.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&self, path: &Path) -> TreeResult<BinaryTree<String>> {
        let content = if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(path)?
        };
        self.build(&content)
    }
}

fn child(side: Side, existing: &str, value: &str) -> Instruction {
    Instruction::Child {
        side,
        existing: existing.to_string(),
        value: value.to_string(),
    }
}

fn script_err(line: usize, reason: impl Into<String>) -> TreeError {
    TreeError::Script {
        line,
        reason: reason.into(),
    }
}
