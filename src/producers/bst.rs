//! Binary search tree step producer.
//!
//! Inserts a sequence of keys one by one, then searches for a set of
//! probe keys, then walks the tree in order. Every comparison descent
//! is a snapshot. The tree is stored arena-style (indices, not boxes)
//! so each snapshot can clone it cheaply into a serializable payload.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::rng::VizRng;
use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Maximum number of keys inserted.
pub const MAX_KEYS: usize = 64;

/// BST configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BstConfig {
    /// Keys to insert in order; truncated to [`MAX_KEYS`].
    ///
    /// When empty, `size` random distinct keys are generated from
    /// `seed`.
    #[serde(default)]
    pub keys: Vec<i32>,

    /// Random key count when `keys` is empty; clamped to `[1, 64]`.
    #[serde(default = "default_size")]
    pub size: usize,

    /// Keys to search for after insertion.
    #[serde(default)]
    pub search: Vec<i32>,

    /// Seed for random key generation.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_size() -> usize {
    12
}

const fn default_seed() -> u64 {
    42
}

impl Default for BstConfig {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            size: default_size(),
            search: Vec::new(),
            seed: default_seed(),
        }
    }
}

/// One arena node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BstNode {
    /// Key stored in this node.
    pub key: i32,
    /// Arena index of the left child.
    pub left: Option<usize>,
    /// Arena index of the right child.
    pub right: Option<usize>,
}

/// Snapshot payload: cloned arena plus the highlighted node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BstPayload {
    /// All nodes, arena-indexed.
    pub nodes: Vec<BstNode>,
    /// Arena index of the root.
    pub root: Option<usize>,
    /// Node the current step is looking at.
    pub highlighted: Option<usize>,
    /// In-order key sequence emitted so far (traversal phase).
    pub visited_in_order: Vec<i32>,
}

/// BST step producer.
#[derive(Debug, Clone)]
pub struct BstProducer {
    config: BstConfig,
    nodes: Vec<BstNode>,
    root: Option<usize>,
    in_order: Vec<i32>,
}

impl BstProducer {
    fn payload(&self, highlighted: Option<usize>) -> BstPayload {
        BstPayload {
            nodes: self.nodes.clone(),
            root: self.root,
            highlighted,
            visited_in_order: self.in_order.clone(),
        }
    }

    fn insert(&mut self, key: i32, recorder: &mut StepRecorder<BstPayload>) {
        let Some(mut current) = self.root else {
            self.nodes.push(BstNode {
                key,
                left: None,
                right: None,
            });
            self.root = Some(0);
            recorder.record(format!("Insert {key} as root"), self.payload(Some(0)));
            return;
        };

        loop {
            let node = self.nodes[current];
            recorder.record(
                format!("Compare {key} with node {}", node.key),
                self.payload(Some(current)),
            );
            if key == node.key {
                recorder.record(
                    format!("{key} already present; skip duplicate"),
                    self.payload(Some(current)),
                );
                return;
            }
            let child = if key < node.key { node.left } else { node.right };
            match child {
                Some(next) => current = next,
                None => {
                    let index = self.nodes.len();
                    self.nodes.push(BstNode {
                        key,
                        left: None,
                        right: None,
                    });
                    if key < node.key {
                        self.nodes[current].left = Some(index);
                        recorder.record(
                            format!("Insert {key} as left child of {}", node.key),
                            self.payload(Some(index)),
                        );
                    } else {
                        self.nodes[current].right = Some(index);
                        recorder.record(
                            format!("Insert {key} as right child of {}", node.key),
                            self.payload(Some(index)),
                        );
                    }
                    return;
                }
            }
        }
    }

    fn search(&self, key: i32, recorder: &mut StepRecorder<BstPayload>) {
        let mut current = self.root;
        while let Some(index) = current {
            let node = self.nodes[index];
            recorder.record(
                format!("Search {key}: visit node {}", node.key),
                self.payload(Some(index)),
            );
            if key == node.key {
                recorder.record(format!("Found {key}"), self.payload(Some(index)));
                return;
            }
            current = if key < node.key { node.left } else { node.right };
        }
        recorder.record(format!("{key} is not in the tree"), self.payload(None));
    }

    fn traverse(&mut self, node: Option<usize>, recorder: &mut StepRecorder<BstPayload>) {
        let Some(index) = node else { return };
        let BstNode { key, left, right } = self.nodes[index];
        self.traverse(left, recorder);
        self.in_order.push(key);
        recorder.record(
            format!("In-order visit {key}"),
            self.payload(Some(index)),
        );
        self.traverse(right, recorder);
    }
}

impl StepProducer for BstProducer {
    type Config = BstConfig;
    type Payload = BstPayload;

    fn from_config(mut config: Self::Config) -> Self {
        config.keys.truncate(MAX_KEYS);
        config.size = config.size.clamp(1, MAX_KEYS);
        config.search.truncate(MAX_KEYS);
        Self {
            config,
            nodes: Vec::new(),
            root: None,
            in_order: Vec::new(),
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "bst"
    }

    fn base_step_duration(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        self.nodes = Vec::new();
        self.root = None;
        self.in_order = Vec::new();

        let keys = if self.config.keys.is_empty() {
            let mut rng = VizRng::new(self.config.seed);
            let mut keys: Vec<i32> = (1..=self.config.size as i32).map(|k| k * 10).collect();
            rng.shuffle(&mut keys);
            keys
        } else {
            self.config.keys.clone()
        };

        let mut recorder = StepRecorder::new();
        recorder.record(
            format!("Empty tree; inserting {} keys", keys.len()),
            self.payload(None),
        );

        for key in keys {
            self.insert(key, &mut recorder);
        }
        for key in self.config.search.clone() {
            self.search(key, &mut recorder);
        }
        self.traverse(self.root, &mut recorder);

        recorder.record(
            format!(
                "Done: {} nodes, in-order traversal of {} keys",
                self.nodes.len(),
                self.in_order.len()
            ),
            self.payload(None),
        );
        recorder.into_sequence()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_is_sorted() {
        let mut producer = BstProducer::from_config(BstConfig {
            keys: vec![50, 30, 70, 20, 40, 60, 80],
            ..BstConfig::default()
        });
        let seq = producer.run();
        let last = seq.last().expect("non-empty");

        assert_eq!(
            last.payload.visited_in_order,
            vec![20, 30, 40, 50, 60, 70, 80]
        );
        assert_eq!(last.payload.nodes.len(), 7);
    }

    #[test]
    fn test_duplicates_skipped() {
        let mut producer = BstProducer::from_config(BstConfig {
            keys: vec![5, 5, 5],
            ..BstConfig::default()
        });
        let seq = producer.run();
        let last = seq.last().expect("non-empty");
        assert_eq!(last.payload.nodes.len(), 1);
        assert_eq!(last.payload.visited_in_order, vec![5]);
    }

    #[test]
    fn test_search_found_and_missing() {
        let mut producer = BstProducer::from_config(BstConfig {
            keys: vec![10, 5, 15],
            search: vec![15, 99],
            ..BstConfig::default()
        });
        let seq = producer.run();

        assert!(seq.iter().any(|s| s.description == "Found 15"));
        assert!(seq.iter().any(|s| s.description == "99 is not in the tree"));
    }

    #[test]
    fn test_random_keys_deterministic() {
        let run = |seed| {
            let mut producer = BstProducer::from_config(BstConfig {
                seed,
                size: 10,
                ..BstConfig::default()
            });
            producer.run()
        };
        assert_eq!(run(3), run(3));
        assert_ne!(run(3), run(4));
    }

    #[test]
    fn test_random_in_order_sorted() {
        let mut producer = BstProducer::from_config(BstConfig {
            size: 20,
            seed: 9,
            ..BstConfig::default()
        });
        let seq = producer.run();
        let in_order = &seq.last().expect("non-empty").payload.visited_in_order;
        assert_eq!(in_order.len(), 20);
        assert!(in_order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_snapshot_tree_is_cloned() {
        let mut producer = BstProducer::from_config(BstConfig {
            keys: vec![2, 1, 3],
            ..BstConfig::default()
        });
        let seq = producer.run();
        // Early snapshot has fewer nodes than the final one.
        assert!(seq[1].payload.nodes.len() < seq.last().expect("non-empty").payload.nodes.len());
    }

    #[test]
    fn test_keys_truncated() {
        let producer = BstProducer::from_config(BstConfig {
            keys: (0..500).collect(),
            ..BstConfig::default()
        });
        assert_eq!(producer.config().keys.len(), MAX_KEYS);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "keys: [3, 1, 2]\nsearch: [2]";
        let mut producer = BstProducer::from_yaml(yaml).expect("parse");
        let seq = producer.run();
        assert_eq!(
            seq.last().expect("non-empty").payload.visited_in_order,
            vec![1, 2, 3]
        );
    }
}
