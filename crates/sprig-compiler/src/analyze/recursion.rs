//! Recursion validation.
//!
//! - Left recursion: a rule reaches itself without consuming input. Ordered
//!   choice cannot parse that, so it is rejected with the offending cycle.
//! - Escape: every recursive group must have a path that terminates, or no
//!   finite input can ever match it.

use indexmap::{IndexMap, IndexSet};
use sprig_core::{Grammar, Rule};

use super::nullable::expr_nullable;
use crate::error::GrammarError;

/// Adjacency list indexed by rule.
type Graph = Vec<IndexSet<usize>>;

pub(super) fn check_left_recursion(
    grammar: &Grammar,
    index: &IndexMap<String, usize>,
    nullable: &[bool],
) -> Result<(), GrammarError> {
    let graph: Graph = grammar
        .rules
        .iter()
        .map(|(_, body)| {
            let mut out = IndexSet::new();
            collect_left_refs(body, index, nullable, &mut out);
            out
        })
        .collect();

    let nodes: Vec<usize> = (0..grammar.rules.len()).collect();
    match CycleFinder::find(&nodes, &graph) {
        Some(cycle) => Err(GrammarError::UnproductiveLeftRecursion {
            cycle: names(grammar, &cycle),
        }),
        None => Ok(()),
    }
}

pub(super) fn check_escape(
    grammar: &Grammar,
    index: &IndexMap<String, usize>,
) -> Result<(), GrammarError> {
    let graph: Graph = grammar
        .rules
        .iter()
        .map(|(_, body)| {
            let mut out = IndexSet::new();
            collect_refs(body, index, &mut out);
            out
        })
        .collect();

    for mut scc in SccFinder::find(&graph) {
        let recursive = scc.len() > 1 || graph[scc[0]].contains(&scc[0]);
        if !recursive {
            continue;
        }

        let members: IndexSet<usize> = scc.iter().copied().collect();
        let has_escape = scc
            .iter()
            .any(|&i| has_escape(&grammar.rules[i].1, index, &members));
        if has_escape {
            continue;
        }

        scc.sort_unstable();
        let restricted: Graph = graph
            .iter()
            .map(|targets| {
                targets
                    .iter()
                    .copied()
                    .filter(|t| members.contains(t))
                    .collect()
            })
            .collect();
        let cycle = CycleFinder::find(&scc, &restricted).unwrap_or_else(|| vec![scc[0]]);
        return Err(GrammarError::InfiniteRecursion {
            cycle: names(grammar, &cycle),
        });
    }
    Ok(())
}

fn names(grammar: &Grammar, cycle: &[usize]) -> Vec<String> {
    cycle.iter().map(|&i| grammar.rules[i].0.clone()).collect()
}

/// References reachable before any input must be consumed.
fn collect_left_refs(
    expr: &Rule,
    index: &IndexMap<String, usize>,
    nullable: &[bool],
    out: &mut IndexSet<usize>,
) {
    match expr {
        Rule::Symbol(name) => {
            if let Some(&i) = index.get(name) {
                out.insert(i);
            }
        }
        Rule::Seq(members) => {
            for member in members {
                collect_left_refs(member, index, nullable, out);
                if !expr_nullable(member, index, nullable) {
                    break;
                }
            }
        }
        // Token contents never reference rules.
        Rule::Token { .. } => {}
        _ => {
            for child in expr.children() {
                collect_left_refs(child, index, nullable, out);
            }
        }
    }
}

fn collect_refs(expr: &Rule, index: &IndexMap<String, usize>, out: &mut IndexSet<usize>) {
    if let Rule::Symbol(name) = expr {
        if let Some(&i) = index.get(name) {
            out.insert(i);
        }
        return;
    }
    for child in expr.children() {
        collect_refs(child, index, out);
    }
}

fn has_escape(expr: &Rule, index: &IndexMap<String, usize>, scc: &IndexSet<usize>) -> bool {
    match expr {
        Rule::Symbol(name) => index.get(name).is_none_or(|i| !scc.contains(i)),
        Rule::Seq(members) => members.iter().all(|m| has_escape(m, index, scc)),
        Rule::Choice(members) => members.iter().any(|m| has_escape(m, index, scc)),
        Rule::Repeat { content, min, .. } => *min == 0 || has_escape(content, index, scc),
        Rule::Alias { content, .. } | Rule::Field { content, .. } => {
            has_escape(content, index, scc)
        }
        Rule::Blank | Rule::String(_) | Rule::Pattern { .. } | Rule::Token { .. } => true,
    }
}

/// Tarjan's strongly connected components.
struct SccFinder<'a> {
    graph: &'a Graph,
    index: usize,
    stack: Vec<usize>,
    on_stack: IndexSet<usize>,
    indices: IndexMap<usize, usize>,
    lowlinks: IndexMap<usize, usize>,
    sccs: Vec<Vec<usize>>,
}

impl<'a> SccFinder<'a> {
    fn find(graph: &'a Graph) -> Vec<Vec<usize>> {
        let mut finder = Self {
            graph,
            index: 0,
            stack: Vec::new(),
            on_stack: IndexSet::new(),
            indices: IndexMap::new(),
            lowlinks: IndexMap::new(),
            sccs: Vec::new(),
        };

        for node in 0..graph.len() {
            if !finder.indices.contains_key(&node) {
                finder.strongconnect(node);
            }
        }
        finder.sccs
    }

    fn strongconnect(&mut self, node: usize) {
        self.indices.insert(node, self.index);
        self.lowlinks.insert(node, self.index);
        self.index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);

        let graph = self.graph;
        for &target in &graph[node] {
            if !self.indices.contains_key(&target) {
                self.strongconnect(target);
                let low = self.lowlinks[&node].min(self.lowlinks[&target]);
                self.lowlinks.insert(node, low);
            } else if self.on_stack.contains(&target) {
                let low = self.lowlinks[&node].min(self.indices[&target]);
                self.lowlinks.insert(node, low);
            }
        }

        if self.lowlinks[&node] == self.indices[&node] {
            let mut scc = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack.swap_remove(&w);
                scc.push(w);
                if w == node {
                    break;
                }
            }
            self.sccs.push(scc);
        }
    }
}

/// Depth-first search for a cycle, returning the rules along it in order.
struct CycleFinder<'a> {
    graph: &'a Graph,
    visited: IndexSet<usize>,
    on_path: IndexMap<usize, usize>,
    path: Vec<usize>,
}

impl<'a> CycleFinder<'a> {
    fn find(starts: &[usize], graph: &'a Graph) -> Option<Vec<usize>> {
        let mut finder = Self {
            graph,
            visited: IndexSet::new(),
            on_path: IndexMap::new(),
            path: Vec::new(),
        };
        starts.iter().find_map(|&start| finder.dfs(start))
    }

    fn dfs(&mut self, current: usize) -> Option<Vec<usize>> {
        if !self.visited.insert(current) {
            return None;
        }
        self.on_path.insert(current, self.path.len());
        self.path.push(current);

        let graph = self.graph;
        for &target in &graph[current] {
            if let Some(&start) = self.on_path.get(&target) {
                return Some(self.path[start..].to_vec());
            }
            if let Some(cycle) = self.dfs(target) {
                return Some(cycle);
            }
        }

        self.path.pop();
        self.on_path.swap_remove(&current);
        None
    }
}
