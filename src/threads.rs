use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A comment as stored: flat, pointing at its parent by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A comment with its nested replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub reply_count: usize,
    pub replies: Vec<CommentNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentThreads {
    pub total: usize,
    pub roots: Vec<CommentNode>,
}

/// Deepest nesting level kept in a rebuilt thread; roots sit at depth 0.
///
/// Replies below this level are attached as siblings under their deepest
/// ancestor that still fits, in the order they were reached.
pub const MAX_THREAD_DEPTH: usize = 32;

struct ThreadBuilder<'a> {
    comments: &'a [Comment],
    children: HashMap<&'a str, Vec<usize>>,
    placed: Vec<bool>,
    depth: Vec<usize>,
    anchor: Vec<Option<usize>>,
    pending: Vec<Vec<CommentNode>>,
}

impl<'a> ThreadBuilder<'a> {
    fn new(comments: &'a [Comment], children: HashMap<&'a str, Vec<usize>>) -> Self {
        let n = comments.len();
        Self {
            comments,
            children,
            placed: vec![false; n],
            depth: vec![0; n],
            anchor: vec![None; n],
            pending: vec![Vec::new(); n],
        }
    }

    fn is_placed(&self, index: usize) -> bool {
        self.placed[index]
    }

    /// Build the thread rooted at `root` without recursion
    fn build(&mut self, root: usize) -> CommentNode {
        let mut order = Vec::new();
        let mut stack: Vec<(usize, Option<usize>)> = vec![(root, None)];

        while let Some((index, anchor)) = stack.pop() {
            if self.placed[index] {
                continue;
            }
            self.placed[index] = true;
            self.anchor[index] = anchor;
            self.depth[index] = anchor.map_or(0, |a| self.depth[a] + 1);
            order.push(index);

            let child_anchor = if self.depth[index] < MAX_THREAD_DEPTH {
                Some(index)
            } else {
                anchor
            };
            if let Some(kids) = self.children.get(self.comments[index].id.as_str()) {
                for &child in kids.iter().rev() {
                    if !self.placed[child] {
                        stack.push((child, child_anchor));
                    }
                }
            }
        }

        // Every node follows its anchor in `order`, so walking backwards
        // finishes all replies before their parent.
        let mut built = None;
        for &index in order.iter().rev() {
            let mut replies = std::mem::take(&mut self.pending[index]);
            replies.reverse();
            let node = CommentNode {
                comment: self.comments[index].clone(),
                reply_count: replies.iter().map(|r| 1 + r.reply_count).sum(),
                replies,
            };
            match self.anchor[index] {
                Some(parent) => self.pending[parent].push(node),
                None => built = Some(node),
            }
        }

        built.unwrap_or_else(|| CommentNode {
            comment: self.comments[root].clone(),
            reply_count: 0,
            replies: Vec::new(),
        })
    }
}

/// Indices sorted by creation time, input order breaking ties
fn chronological(comments: &[Comment], mut indices: Vec<usize>) -> Vec<usize> {
    indices.sort_by_key(|&i| comments[i].created_at);
    indices
}

/// Rebuild nested threads from a flat comment list.
///
/// Comments without a known parent become roots. Comments caught in a parent
/// cycle are promoted to roots so every input comment appears exactly once.
/// Nesting stops at `MAX_THREAD_DEPTH`.
pub fn build_threads(comments: &[Comment]) -> CommentThreads {
    let ids: HashSet<&str> = comments.iter().map(|c| c.id.as_str()).collect();

    let mut roots = Vec::new();
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, comment) in comments.iter().enumerate() {
        match comment.parent_id.as_deref() {
            Some(parent) if parent != comment.id && ids.contains(parent) => {
                children.entry(parent).or_default().push(i)
            }
            _ => roots.push(i),
        }
    }
    for siblings in children.values_mut() {
        *siblings = chronological(comments, std::mem::take(siblings));
    }

    let mut builder = ThreadBuilder::new(comments, children);

    let mut nodes: Vec<CommentNode> = Vec::new();
    for root in chronological(comments, roots) {
        if !builder.is_placed(root) {
            nodes.push(builder.build(root));
        }
    }

    let orphaned: Vec<usize> = (0..comments.len())
        .filter(|&i| !builder.is_placed(i))
        .collect();
    for index in chronological(comments, orphaned) {
        if !builder.is_placed(index) {
            nodes.push(builder.build(index));
        }
    }

    CommentThreads {
        total: comments.len(),
        roots: nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn comment(id: &str, parent: Option<&str>, minute: i64) -> Comment {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Comment {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            author: "reader".to_string(),
            body: format!("comment {}", id),
            created_at: base + Duration::minutes(minute),
        }
    }

    fn ids(nodes: &[CommentNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.comment.id.as_str()).collect()
    }

    fn chain(len: usize) -> Vec<Comment> {
        (0..len)
            .map(|i| {
                let parent = (i > 0).then(|| format!("c{}", i - 1));
                comment(&format!("c{}", i), parent.as_deref(), 0)
            })
            .collect()
    }

    fn max_depth(nodes: &[CommentNode]) -> usize {
        let mut stack: Vec<(&CommentNode, usize)> = nodes.iter().map(|n| (n, 0)).collect();
        let mut deepest = 0;
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.replies.iter().map(|r| (r, depth + 1)));
        }
        deepest
    }

    #[test]
    fn test_nested_threads() {
        let comments = vec![
            comment("c", Some("a"), 3),
            comment("a", None, 0),
            comment("b", Some("a"), 1),
            comment("d", Some("b"), 4),
            comment("e", None, 2),
        ];
        let threads = build_threads(&comments);

        assert_eq!(threads.total, 5);
        assert_eq!(ids(&threads.roots), vec!["a", "e"]);

        let a = &threads.roots[0];
        assert_eq!(a.reply_count, 3);
        assert_eq!(ids(&a.replies), vec!["b", "c"]);
        assert_eq!(ids(&a.replies[0].replies), vec!["d"]);
        assert_eq!(threads.roots[1].reply_count, 0);
    }

    #[test]
    fn test_missing_and_self_parents_become_roots() {
        let comments = vec![
            comment("a", Some("gone"), 0),
            comment("b", Some("b"), 1),
        ];
        let threads = build_threads(&comments);
        assert_eq!(ids(&threads.roots), vec!["a", "b"]);
    }

    #[test]
    fn test_cycles_are_not_dropped() {
        let comments = vec![
            comment("root", None, 0),
            comment("x", Some("y"), 1),
            comment("y", Some("x"), 2),
        ];
        let threads = build_threads(&comments);

        assert_eq!(ids(&threads.roots), vec!["root", "x"]);
        assert_eq!(ids(&threads.roots[1].replies), vec!["y"]);
        let placed: usize = threads.roots.iter().map(|n| 1 + n.reply_count).sum();
        assert_eq!(placed, threads.total);
    }

    #[test]
    fn test_empty() {
        let threads = build_threads(&[]);
        assert_eq!(threads.total, 0);
        assert!(threads.roots.is_empty());
    }

    #[test]
    fn test_replies_past_max_depth_are_flattened() {
        let comments = chain(MAX_THREAD_DEPTH + 3);
        let threads = build_threads(&comments);
        assert_eq!(threads.roots.len(), 1);
        assert_eq!(threads.roots[0].reply_count, MAX_THREAD_DEPTH + 2);

        let mut node = &threads.roots[0];
        for _ in 0..MAX_THREAD_DEPTH - 1 {
            assert_eq!(node.replies.len(), 1);
            node = &node.replies[0];
        }
        let last = MAX_THREAD_DEPTH + 2;
        let expected: Vec<String> = (MAX_THREAD_DEPTH..=last)
            .map(|i| format!("c{}", i))
            .collect();
        assert_eq!(ids(&node.replies), expected);
        assert!(node.replies.iter().all(|r| r.replies.is_empty()));
        assert_eq!(max_depth(&threads.roots), MAX_THREAD_DEPTH);
    }

    #[test]
    fn test_very_long_reply_chain() {
        let comments = chain(100_000);
        let threads = build_threads(&comments);

        assert_eq!(threads.total, 100_000);
        assert_eq!(ids(&threads.roots), vec!["c0"]);
        assert_eq!(threads.roots[0].reply_count, 99_999);
        assert!(max_depth(&threads.roots) <= MAX_THREAD_DEPTH);

        let json = serde_json::to_string(&threads).unwrap();
        assert!(json.contains("\"id\":\"c99999\""));
    }
}
