//! Model-checked stress runner
//!
//! This module provides the `stress` subcommand. It replays a seeded random
//! sequence of insertions and deletions against a `PersistentAvlTree` and a
//! sorted `Vec` model, and stops at the first divergence.

use anyhow::{Context, Result, bail, ensure};
use clap::Args;
use persistent_avl::ordering::{ByKey, by_key};
use persistent_avl::persistent::PersistentAvlTree;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_OPERATIONS: usize = 10_000;
const DEFAULT_KEY_SPACE: i64 = 64;
const DEFAULT_ROUNDS: usize = 10;

/// Arguments for the stress subcommand
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Scenario YAML file path (required)
    #[arg(long, short = 's')]
    pub scenario: PathBuf,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override operations per round
    #[arg(long)]
    pub operations: Option<usize>,

    /// Override number of distinct keys
    #[arg(long)]
    pub key_space: Option<i64>,
}

/// Scenario configuration from YAML
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioConfig {
    name: Option<String>,
    seed: Option<u64>,
    operations: Option<usize>,
    key_space: Option<i64>,
    rounds: Option<usize>,
    mix: Option<OperationMix>,
}

/// Relative weights of each operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct OperationMix {
    #[serde(default)]
    put: u32,
    #[serde(default)]
    put_lower: u32,
    #[serde(default)]
    put_upper: u32,
    #[serde(default)]
    delete: u32,
    #[serde(default)]
    delete_lower: u32,
    #[serde(default)]
    delete_upper: u32,
}

impl OperationMix {
    const fn uniform() -> Self {
        Self {
            put: 1,
            put_lower: 1,
            put_upper: 1,
            delete: 1,
            delete_lower: 1,
            delete_upper: 1,
        }
    }

    const fn weights(&self) -> [u32; 6] {
        [
            self.put,
            self.put_lower,
            self.put_upper,
            self.delete,
            self.delete_lower,
            self.delete_upper,
        ]
    }
}

/// Settings after applying CLI overrides to the scenario
#[derive(Debug, Clone, PartialEq, Eq)]
struct StressSettings {
    name: String,
    seed: u64,
    operations: usize,
    key_space: i64,
    rounds: usize,
    mix: OperationMix,
}

impl StressSettings {
    /// Priority: CLI > Scenario YAML > Default
    fn from_args_and_scenario(args: &StressArgs, scenario: ScenarioConfig) -> Result<Self> {
        let settings = Self {
            name: scenario.name.unwrap_or_else(|| "unnamed".to_string()),
            seed: args.seed.or(scenario.seed).unwrap_or(DEFAULT_SEED),
            operations: args
                .operations
                .or(scenario.operations)
                .unwrap_or(DEFAULT_OPERATIONS),
            key_space: args
                .key_space
                .or(scenario.key_space)
                .unwrap_or(DEFAULT_KEY_SPACE),
            rounds: scenario.rounds.unwrap_or(DEFAULT_ROUNDS),
            mix: scenario.mix.unwrap_or_else(OperationMix::uniform),
        };
        ensure!(settings.key_space > 0, "key_space must be positive");
        ensure!(
            settings.mix.weights().iter().any(|weight| *weight > 0),
            "operation mix must have at least one positive weight"
        );
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Put,
    PutLower,
    PutUpper,
    Delete,
    DeleteLower,
    DeleteUpper,
}

impl Operation {
    /// Same order as `OperationMix::weights`.
    const ALL: [Self; 6] = [
        Self::Put,
        Self::PutLower,
        Self::PutUpper,
        Self::Delete,
        Self::DeleteLower,
        Self::DeleteUpper,
    ];
}

type Entry = (i64, u64);
type Tree = PersistentAvlTree<Entry, ByKey<fn(&Entry) -> i64>>;

fn key_of(entry: &Entry) -> i64 {
    entry.0
}

fn empty_tree() -> Tree {
    PersistentAvlTree::with_order(by_key(key_of as fn(&Entry) -> i64))
}

/// Tree and model advanced in lockstep.
struct Harness {
    tree: Tree,
    model: Vec<Entry>,
    serial: u64,
}

impl Harness {
    fn new() -> Self {
        Self {
            tree: empty_tree(),
            model: Vec::new(),
            serial: 0,
        }
    }

    /// Index range of the run of entries equal to `key` in the model.
    fn run_of(&self, key: i64) -> (usize, usize) {
        (
            self.model.partition_point(|entry| entry.0 < key),
            self.model.partition_point(|entry| entry.0 <= key),
        )
    }

    fn apply(&mut self, operation: Operation, key: i64) -> Result<()> {
        let (lower, upper) = self.run_of(key);
        let lookup = (key, 0);

        match operation {
            Operation::Put => {
                self.serial += 1;
                let entry = (key, self.serial);
                let next = self.tree.put(entry);
                if lower == upper {
                    self.model.insert(lower, entry);
                } else {
                    // Exactly one member of the run was overwritten in place.
                    let offset = next
                        .iter()
                        .skip(lower)
                        .take(upper - lower)
                        .zip(&self.model[lower..upper])
                        .position(|(kept, modelled)| kept != modelled)
                        .context("put did not replace any equal entry")?;
                    self.model[lower + offset] = entry;
                }
                self.tree = next;
            }
            Operation::PutLower => {
                self.serial += 1;
                let entry = (key, self.serial);
                self.tree = self.tree.put_lower(entry);
                self.model.insert(lower, entry);
            }
            Operation::PutUpper => {
                self.serial += 1;
                let entry = (key, self.serial);
                self.tree = self.tree.put_upper(entry);
                self.model.insert(upper, entry);
            }
            Operation::Delete | Operation::DeleteLower | Operation::DeleteUpper => {
                let next = match operation {
                    Operation::Delete => self.tree.delete(&lookup),
                    Operation::DeleteLower => self.tree.delete_lower(&lookup),
                    _ => self.tree.delete_upper(&lookup),
                };
                if lower == upper {
                    ensure!(
                        next.ptr_eq(&self.tree),
                        "{operation:?} of missing key {key} produced a new version"
                    );
                    return Ok(());
                }
                let removed = match operation {
                    Operation::Delete => {
                        // Any member of the run may go; find the one that did.
                        let offset = next
                            .iter()
                            .skip(lower)
                            .take(upper - lower - 1)
                            .zip(&self.model[lower..upper])
                            .position(|(kept, modelled)| kept != modelled)
                            .unwrap_or(upper - lower - 1);
                        lower + offset
                    }
                    Operation::DeleteLower => lower,
                    _ => upper - 1,
                };
                self.model.remove(removed);
                self.tree = next;
            }
        }

        Ok(())
    }

    /// Compares the tree against the model.
    fn verify(&self) -> Result<()> {
        verify_version(&self.tree, &self.model)
    }
}

fn verify_version(tree: &Tree, model: &[Entry]) -> Result<()> {
    ensure!(
        tree.len() == model.len(),
        "size mismatch: tree has {}, model has {}",
        tree.len(),
        model.len()
    );
    if let Some((index, (actual, expected))) = tree
        .iter()
        .zip(model)
        .enumerate()
        .find(|(_, (actual, expected))| actual != expected)
    {
        bail!("content mismatch at position {index}: tree has {actual:?}, model has {expected:?}");
    }
    let bound = height_bound(tree.len());
    ensure!(
        tree.height() <= bound,
        "height {} exceeds AVL bound {bound} for {} entries",
        tree.height(),
        tree.len()
    );
    Ok(())
}

/// Upper bound on the height of an AVL tree holding `length` nodes.
fn height_bound(length: usize) -> usize {
    #[allow(clippy::cast_precision_loss)]
    let bound = 1.4405f64.mul_add(((length + 2) as f64).log2(), -0.3277);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bound = bound.ceil() as usize;
    bound
}

fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    if !path.exists() {
        bail!("Scenario file not found: {}", path.display());
    }
    let content = fs::read_to_string(path).context("Failed to read scenario file")?;
    serde_yaml::from_str(&content).context("Failed to parse scenario YAML")
}

fn run_rounds(settings: &StressSettings) -> Result<Harness> {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let chooser =
        WeightedIndex::new(settings.mix.weights()).context("Invalid operation mix weights")?;
    let mut harness = Harness::new();

    for round in 1..=settings.rounds {
        let snapshot = harness.tree.clone();
        let snapshot_model = harness.model.clone();

        for step in 0..settings.operations {
            let operation = Operation::ALL[chooser.sample(&mut rng)];
            let key = rng.gen_range(0..settings.key_space);
            harness
                .apply(operation, key)
                .with_context(|| format!("round {round}, step {step}: {operation:?} {key}"))?;
            harness
                .verify()
                .with_context(|| format!("round {round}, step {step}: after {operation:?} {key}"))?;
        }

        verify_version(&snapshot, &snapshot_model)
            .with_context(|| format!("round {round}: snapshot changed"))?;

        tracing::info!(
            round,
            size = harness.tree.len(),
            height = harness.tree.height(),
            "round complete"
        );
    }

    Ok(harness)
}

pub fn run(args: &StressArgs) -> Result<()> {
    let scenario = load_scenario(&args.scenario)?;
    let settings = StressSettings::from_args_and_scenario(args, scenario)?;

    tracing::info!(
        scenario = %settings.name,
        seed = settings.seed,
        operations = settings.operations,
        key_space = settings.key_space,
        rounds = settings.rounds,
        "starting stress run"
    );

    let harness = run_rounds(&settings)?;

    tracing::info!(
        total_operations = settings.operations * settings.rounds,
        final_size = harness.tree.len(),
        final_height = harness.tree.height(),
        "stress run passed"
    );

    Ok(())
}
