//! Category tree builder
//!
//! Converts the flat category list into a forest. One pass indexes
//! categories by id, a second pass attaches each category to its parent
//! when that parent resolves to a known id; everything else becomes a
//! root. Root order and child order both follow first occurrence in the
//! input list.
//!
//! Parent chains are checked for cycles before assembly: any category
//! whose ancestry loops back on itself (including a self-referencing
//! parent) has its parent edge dropped and becomes a root. A malformed
//! row flattens part of the navigation tree instead of poisoning it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// A category with its resolved children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub children: Vec<CategoryNode>,
}

/// Build the category forest from a flat list
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    for (i, category) in categories.iter().enumerate() {
        index.entry(category.id).or_insert(i);
    }

    // Resolve each category's parent edge; unknown ids and self-parents
    // drop out immediately.
    let mut parent: Vec<Option<usize>> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            category
                .parent_id
                .and_then(|pid| index.get(&pid).copied())
                .filter(|&p| p != i)
        })
        .collect();

    break_cycles(&mut parent);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, p) in parent.iter().enumerate() {
        match p {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, categories, &children))
        .collect()
}

/// Drop one parent edge per cycle so every chain terminates.
///
/// Nodes are colored: 0 = unvisited, 1 = on the current chain,
/// 2 = settled. Re-entering the current chain means the chain closed on
/// itself; the revisited node loses its parent edge and roots the cycle.
fn break_cycles(parent: &mut [Option<usize>]) {
    let mut state = vec![0u8; parent.len()];
    for start in 0..parent.len() {
        if state[start] != 0 {
            continue;
        }
        let mut chain = Vec::new();
        let mut cur = start;
        loop {
            if state[cur] == 2 {
                break;
            }
            if state[cur] == 1 {
                parent[cur] = None;
                break;
            }
            state[cur] = 1;
            chain.push(cur);
            match parent[cur] {
                Some(next) => cur = next,
                None => break,
            }
        }
        for i in chain {
            state[i] = 2;
        }
    }
}

fn assemble(i: usize, categories: &[Category], children: &[Vec<usize>]) -> CategoryNode {
    let category = &categories[i];
    CategoryNode {
        id: category.id,
        name: category.name.clone(),
        parent_id: category.parent_id,
        children: children[i]
            .iter()
            .map(|&child| assemble(child, categories, children))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, name: &str, parent_id: Option<i64>) -> Category {
        Category {
            id,
            name: name.to_string(),
            parent_id,
        }
    }

    fn count_nodes(nodes: &[CategoryNode]) -> usize {
        nodes
            .iter()
            .map(|n| 1 + count_nodes(&n.children))
            .sum()
    }

    #[test]
    fn test_builds_nested_forest() {
        let categories = vec![
            cat(1, "Furniture", None),
            cat(2, "Sofas", Some(1)),
            cat(3, "Corner Sofas", Some(2)),
            cat(4, "Lighting", None),
        ];
        let tree = build_category_tree(&categories);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, 2);
        assert_eq!(tree[0].children[0].children[0].id, 3);
        assert_eq!(tree[1].id, 4);
    }

    #[test]
    fn test_every_category_appears_exactly_once() {
        let categories = vec![
            cat(1, "A", None),
            cat(2, "B", Some(1)),
            cat(3, "C", Some(99)),
            cat(4, "D", Some(2)),
            cat(5, "E", Some(5)),
        ];
        let tree = build_category_tree(&categories);
        assert_eq!(count_nodes(&tree), categories.len());
    }

    #[test]
    fn test_unresolvable_parent_becomes_root() {
        let categories = vec![cat(1, "A", None), cat(2, "Orphan", Some(42))];
        let tree = build_category_tree(&categories);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].id, 2);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_root_order_follows_input() {
        let categories = vec![
            cat(9, "Z", None),
            cat(1, "A", None),
            cat(5, "M", None),
        ];
        let tree = build_category_tree(&categories);
        let ids: Vec<i64> = tree.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![9, 1, 5]);
    }

    #[test]
    fn test_self_parent_becomes_root() {
        let categories = vec![cat(1, "Loop", Some(1)), cat(2, "Child", Some(1))];
        let tree = build_category_tree(&categories);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert!(tree[0].parent_id.is_some());
        assert_eq!(tree[0].children[0].id, 2);
    }

    #[test]
    fn test_cycle_is_broken_not_rejected() {
        // 1 -> 2 -> 3 -> 1
        let categories = vec![
            cat(1, "A", Some(3)),
            cat(2, "B", Some(1)),
            cat(3, "C", Some(2)),
            cat(4, "D", Some(3)),
        ];
        let tree = build_category_tree(&categories);
        assert_eq!(count_nodes(&tree), 4);
        // Exactly one cycle member got rooted
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_category_tree(&[]).is_empty());
    }
}
