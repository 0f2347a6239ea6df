//! Pure folder-tree walks over in-memory folder sets.
//!
//! All walks are depth-bounded so that pre-existing cyclic data (which the
//! schema does not permit, but defensive code assumes anyway) can never
//! hang a request.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::model::Folder;

/// Maximum number of parent hops any tree walk will follow.
pub const MAX_TREE_DEPTH: usize = 20;

/// One entry in a breadcrumb trail, ordered root → current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
}

/// Compute the breadcrumb trail for `start` by walking parent links.
///
/// Returns entries ordered from root to the starting folder. The walk
/// stops at [`MAX_TREE_DEPTH`] hops or on the first repeated folder.
pub fn breadcrumb_trail(folders: &[Folder], start: Uuid) -> Vec<Breadcrumb> {
    let by_id: HashMap<Uuid, &Folder> = folders.iter().map(|f| (f.id, f)).collect();
    let mut seen = HashSet::new();
    let mut trail = Vec::new();
    let mut current = Some(start);

    for _ in 0..MAX_TREE_DEPTH {
        let Some(id) = current else { break };
        if !seen.insert(id) {
            break;
        }
        let Some(folder) = by_id.get(&id) else { break };
        trail.push(Breadcrumb {
            id: folder.id,
            name: folder.name.clone(),
        });
        current = folder.parent_id;
    }

    trail.reverse();
    trail
}

/// Compute the `/`-joined chain of ancestor names from root to `start`
/// inclusive, used as the folder-path component of object keys.
pub fn folder_path(folders: &[Folder], start: Uuid) -> String {
    breadcrumb_trail(folders, start)
        .iter()
        .map(|b| b.name.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Return the ids of `root` and every folder transitively below it,
/// ordered deepest-first so that deleting in order never removes a folder
/// that still has live children.
pub fn deepest_first(folders: &[Folder], root: Uuid) -> Vec<Uuid> {
    let mut children: HashMap<Option<Uuid>, Vec<Uuid>> = HashMap::new();
    for f in folders {
        children.entry(f.parent_id).or_default().push(f.id);
    }

    // Iterative DFS with a visited set; post-order gives deepest-first.
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        if !visited.insert(id) {
            continue;
        }
        stack.push((id, true));
        if let Some(kids) = children.get(&Some(id)) {
            for &kid in kids {
                stack.push((kid, false));
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn folder(id: Uuid, name: &str, parent: Option<Uuid>) -> Folder {
        Folder {
            id,
            name: name.to_string(),
            parent_id: parent,
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_breadcrumbs_root_to_current() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let folders = vec![
            folder(a, "a", None),
            folder(b, "b", Some(a)),
            folder(c, "c", Some(b)),
        ];

        let trail = breadcrumb_trail(&folders, c);
        let names: Vec<_> = trail.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_breadcrumbs_terminate_on_cycle() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        // Corrupt data: a and b are each other's parent.
        let folders = vec![folder(a, "a", Some(b)), folder(b, "b", Some(a))];

        let trail = breadcrumb_trail(&folders, a);
        assert!(trail.len() <= MAX_TREE_DEPTH);
    }

    #[test]
    fn test_breadcrumbs_depth_bound() {
        let mut folders = Vec::new();
        let mut parent = None;
        let mut last = Uuid::new_v4();
        for i in 0..MAX_TREE_DEPTH + 10 {
            let id = Uuid::new_v4();
            folders.push(folder(id, &format!("f{i}"), parent));
            parent = Some(id);
            last = id;
        }

        let trail = breadcrumb_trail(&folders, last);
        assert_eq!(trail.len(), MAX_TREE_DEPTH);
    }

    #[test]
    fn test_folder_path_joins_names() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let folders = vec![folder(a, "docs", None), folder(b, "reports", Some(a))];
        assert_eq!(folder_path(&folders, b), "docs/reports");
        assert_eq!(folder_path(&folders, a), "docs");
    }

    #[test]
    fn test_deepest_first_orders_children_before_parents() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let d = Uuid::new_v4();
        let folders = vec![
            folder(a, "a", None),
            folder(b, "b", Some(a)),
            folder(c, "c", Some(b)),
            folder(d, "d", Some(a)),
        ];

        let order = deepest_first(&folders, a);
        assert_eq!(order.len(), 4);
        let pos = |id| order.iter().position(|&x| x == id).unwrap();
        assert!(pos(c) < pos(b));
        assert!(pos(b) < pos(a));
        assert!(pos(d) < pos(a));
        assert_eq!(*order.last().unwrap(), a);
    }
}
