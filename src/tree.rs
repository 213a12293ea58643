//! Concrete parse tree.
//!
//! A plain labeled N-ary tree: leaves carry token surface text, internal
//! nodes carry the non-terminal that produced them. The driver owns the
//! tree while parsing and hands the root to the caller on accept.

use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// A leaf node labeled with token surface text.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// An internal node with its children in left-to-right order.
    pub fn internal(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Pre-order labels of all childless nodes. For a parse tree of a
    /// grammar without ε-productions these are exactly the token texts.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.children.is_empty() {
            out.push(self.label.as_str());
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// Renders the tree with box-drawing branches, root on its own line.
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.label)?;
        let count = self.children.len();
        for (index, child) in self.children.iter().enumerate() {
            child.render_branch("", index + 1 == count, out)?;
        }
        Ok(())
    }

    fn render_branch(&self, prefix: &str, is_last: bool, out: &mut dyn Write) -> io::Result<()> {
        let branch = if is_last { "└── " } else { "├── " };
        writeln!(out, "{prefix}{branch}{}", self.label)?;

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let count = self.children.len();
        for (index, child) in self.children.iter().enumerate() {
            child.render_branch(&child_prefix, index + 1 == count, out)?;
        }
        Ok(())
    }

    /// The rendered tree as a string.
    pub fn render_to_string(&self) -> String {
        let mut buffer = Vec::new();
        self.render(&mut buffer)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(buffer).expect("render emits UTF-8")
    }
}
