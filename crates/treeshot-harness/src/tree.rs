//! Nesting fixtures into a reporting tree.
//!
//! Fixtures are grouped by their path segments. A focus selector naming one
//! fixture's full path marks that case as the only one to run; a selector
//! that matches nothing is ignored.

use std::fmt::Write as _;

use crate::fixture::Fixture;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestNode {
    Group { name: String, children: Vec<TestNode> },
    /// `index` points into the fixture list the tree was built from.
    Case { name: String, index: usize },
}

impl TestNode {
    pub fn name(&self) -> &str {
        match self {
            TestNode::Group { name, .. } | TestNode::Case { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// No selector: every case runs.
    All,
    /// The selector matched this fixture; everything else is skipped.
    Only(usize),
    /// The selector matched nothing: every case runs.
    Unmatched(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTree {
    roots: Vec<TestNode>,
    focus: Focus,
}

impl TestTree {
    pub fn build(fixtures: &[Fixture], only: Option<&str>) -> Self {
        let mut roots = Vec::new();
        for (index, fixture) in fixtures.iter().enumerate() {
            insert(&mut roots, &fixture.groups, &fixture.name, index);
        }

        let focus = match only.map(normalize_selector) {
            None => Focus::All,
            Some(selector) if selector.is_empty() => Focus::All,
            Some(selector) => match fixtures.iter().position(|f| f.id() == selector) {
                Some(index) => Focus::Only(index),
                None => {
                    tracing::warn!(%selector, "focus selector matched no fixture, running all");
                    Focus::Unmatched(selector)
                }
            },
        };

        Self { roots, focus }
    }

    pub fn roots(&self) -> &[TestNode] {
        &self.roots
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn is_selected(&self, index: usize) -> bool {
        match self.focus {
            Focus::Only(only) => only == index,
            Focus::All | Focus::Unmatched(_) => true,
        }
    }

    /// Fixture indexes in tree order.
    pub fn cases(&self) -> Vec<usize> {
        let mut out = Vec::new();
        collect_cases(&self.roots, &mut out);
        out
    }

    /// Indented outline of the tree; the focused case is marked.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_nodes(&self.roots, 0, &mut out);
        out
    }

    fn render_nodes(&self, nodes: &[TestNode], depth: usize, out: &mut String) {
        for node in nodes {
            let indent = "  ".repeat(depth);
            match node {
                TestNode::Group { name, children } => {
                    let _ = writeln!(out, "{indent}{name}");
                    self.render_nodes(children, depth + 1, out);
                }
                TestNode::Case { name, index } => {
                    let marker = match self.focus {
                        Focus::Only(only) if only == *index => " (only)",
                        Focus::Only(_) => " (skipped)",
                        _ => "",
                    };
                    let _ = writeln!(out, "{indent}{name}{marker}");
                }
            }
        }
    }
}

fn insert(nodes: &mut Vec<TestNode>, groups: &[String], name: &str, index: usize) {
    let Some((head, rest)) = groups.split_first() else {
        nodes.push(TestNode::Case {
            name: name.to_owned(),
            index,
        });
        return;
    };

    let existing = nodes
        .iter()
        .position(|n| matches!(n, TestNode::Group { name: group, .. } if group == head));
    let position = match existing {
        Some(position) => position,
        None => {
            nodes.push(TestNode::Group {
                name: head.clone(),
                children: Vec::new(),
            });
            nodes.len() - 1
        }
    };
    if let TestNode::Group { children, .. } = &mut nodes[position] {
        insert(children, rest, name, index);
    }
}

fn collect_cases(nodes: &[TestNode], out: &mut Vec<usize>) {
    for node in nodes {
        match node {
            TestNode::Group { children, .. } => collect_cases(children, out),
            TestNode::Case { index, .. } => out.push(*index),
        }
    }
}

/// Accept platform separators and stray slashes in a selector.
fn normalize_selector(selector: &str) -> String {
    selector
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
