//! Declaration graph
//!
//! Holds every declaration and composite output of one composition pass and
//! checks the two structural invariants before anything is synthesized:
//! every reference resolves to a declared address, and the dependency
//! relation is acyclic.

use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::{CompositeOutput, Declaration};
use crate::domain::value_objects::{Address, ResourceKind};
use crate::error::{StackError, StackResult};

/// Declarations in insertion order plus composite outputs
#[derive(Debug, Clone, Default)]
pub struct DeclarationGraph {
    declarations: Vec<Declaration>,
    index: HashMap<Address, usize>,
    outputs: Vec<CompositeOutput>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration and return its address
    pub fn insert(&mut self, declaration: Declaration) -> StackResult<Address> {
        let address = declaration.address().clone();
        if self.index.contains_key(&address) {
            return Err(StackError::DuplicateDeclaration {
                address: address.to_string(),
            });
        }
        tracing::debug!(address = %address, "declared");
        self.index.insert(address.clone(), self.declarations.len());
        self.declarations.push(declaration);
        Ok(address)
    }

    pub fn add_output(&mut self, output: CompositeOutput) {
        tracing::debug!(output = output.name(), "output declared");
        self.outputs.push(output);
    }

    pub fn get(&self, address: &Address) -> Option<&Declaration> {
        self.index.get(address).map(|&i| &self.declarations[i])
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations in insertion order
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(move |d| d.kind() == kind)
    }

    pub fn outputs(&self) -> &[CompositeOutput] {
        &self.outputs
    }

    pub fn output(&self, name: &str) -> Option<&CompositeOutput> {
        self.outputs.iter().find(|o| o.name() == name)
    }

    /// Declarations that depend on `address`, explicitly or by reference
    pub fn dependents(&self, address: &Address) -> Vec<&Declaration> {
        self.declarations
            .iter()
            .filter(|d| d.dependencies().contains(&address))
            .collect()
    }

    /// Check for dangling references and cycles
    pub fn validate(&self) -> StackResult<()> {
        self.check_references()?;
        self.topological_order().map(|_| ())
    }

    fn check_references(&self) -> StackResult<()> {
        for declaration in &self.declarations {
            for dependency in declaration.dependencies() {
                if !self.contains(dependency) {
                    return Err(StackError::DanglingReference {
                        from: declaration.address().to_string(),
                        to: dependency.to_string(),
                    });
                }
            }
        }

        for output in &self.outputs {
            let mut refs = Vec::new();
            output.value().collect_references(&mut refs);
            for reference in refs {
                if !self.contains(reference.target()) {
                    return Err(StackError::DanglingReference {
                        from: format!("output.{}", output.name()),
                        to: reference.target().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Dependency order: every declaration after all of its dependencies.
    ///
    /// Ties are broken by insertion order, so the result is deterministic.
    /// Dependencies on undeclared addresses are ignored here; `validate`
    /// reports them first.
    pub fn topological_order(&self) -> StackResult<Vec<&Declaration>> {
        let n = self.declarations.len();
        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, declaration) in self.declarations.iter().enumerate() {
            for dependency in declaration.dependencies() {
                if let Some(&j) = self.index.get(dependency) {
                    in_degree[i] += 1;
                    dependents[j].push(i);
                }
            }
        }

        // Ready set ordered by insertion index
        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(i) = ready.pop_first() {
            order.push(&self.declarations[i]);
            for &k in &dependents[i] {
                in_degree[k] -= 1;
                if in_degree[k] == 0 {
                    ready.insert(k);
                }
            }
        }

        if order.len() == n {
            return Ok(order);
        }

        let remaining: Vec<usize> = (0..n).filter(|&i| in_degree[i] > 0).collect();
        Err(StackError::DependencyCycle {
            path: self.describe_cycle(&remaining),
        })
    }

    /// Walk dependencies from a blocked declaration until one repeats
    fn describe_cycle(&self, remaining: &[usize]) -> String {
        let Some(&start) = remaining.first() else {
            return String::new();
        };

        let mut path: Vec<usize> = vec![start];
        let mut current = start;
        loop {
            let next = self.declarations[current]
                .dependencies()
                .into_iter()
                .filter_map(|dep| self.index.get(dep).copied())
                .find(|j| remaining.contains(j));

            let Some(next) = next else {
                break;
            };

            if let Some(pos) = path.iter().position(|&p| p == next) {
                let mut cycle: Vec<String> = path[pos..]
                    .iter()
                    .map(|&i| self.declarations[i].address().to_string())
                    .collect();
                cycle.push(self.declarations[next].address().to_string());
                return cycle.join(" -> ");
            }

            path.push(next);
            current = next;
        }

        path.iter()
            .map(|&i| self.declarations[i].address().to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
