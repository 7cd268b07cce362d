//! Property tests for dependency ordering.

use proptest::prelude::*;

use funcstack::domain::entities::Declaration;
use funcstack::domain::services::DeclarationGraph;
use funcstack::domain::value_objects::{Address, LogicalId, ResourceKind};

/// Node count plus, per node, the later nodes it depends on
fn dag() -> impl Strategy<Value = (usize, Vec<Vec<usize>>)> {
    (1usize..12).prop_flat_map(|n| {
        let edges = (0..n)
            .map(|i| {
                let later = n - i - 1;
                proptest::collection::vec(0..later.max(1), 0..=later.min(3))
                    .prop_map(move |offsets| {
                        offsets
                            .into_iter()
                            .map(|o| i + 1 + o)
                            .filter(|&j| j < n)
                            .collect::<Vec<usize>>()
                    })
            })
            .collect::<Vec<_>>();
        (Just(n), edges)
    })
}

fn address(i: usize) -> Address {
    Address::new(
        ResourceKind::ServiceAccount,
        LogicalId::new(format!("node_{i}")).unwrap(),
    )
}

fn build(n: usize, edges: &[Vec<usize>]) -> DeclarationGraph {
    let mut graph = DeclarationGraph::new();
    for (i, deps) in edges.iter().enumerate().take(n) {
        let mut decl = Declaration::new(
            ResourceKind::ServiceAccount,
            LogicalId::new(format!("node_{i}")).unwrap(),
        );
        for &j in deps {
            decl = if j % 2 == 0 {
                decl.depends_on(&address(j))
            } else {
                decl.attr("account_id", address(j).field("email"))
            };
        }
        graph.insert(decl).unwrap();
    }
    graph
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every declaration comes after each of its dependencies.
    #[test]
    fn property_topological_order_respects_edges((n, edges) in dag()) {
        let graph = build(n, &edges);
        graph.validate().unwrap();

        let order: Vec<String> = graph
            .topological_order()
            .unwrap()
            .iter()
            .map(|d| d.address().to_string())
            .collect();
        prop_assert_eq!(order.len(), n);

        let position = |a: &Address| order.iter().position(|s| *s == a.to_string()).unwrap();
        for declaration in graph.declarations() {
            for dependency in declaration.dependencies() {
                prop_assert!(position(dependency) < position(declaration.address()));
            }
        }
    }

    /// PROPERTY: ordering is deterministic for the same graph.
    #[test]
    fn property_topological_order_is_stable((n, edges) in dag()) {
        let first: Vec<String> = build(n, &edges)
            .topological_order()
            .unwrap()
            .iter()
            .map(|d| d.address().to_string())
            .collect();
        let second: Vec<String> = build(n, &edges)
            .topological_order()
            .unwrap()
            .iter()
            .map(|d| d.address().to_string())
            .collect();
        prop_assert_eq!(first, second);
    }
}
