//! Monte Carlo Tree Search with UCB1 selection
//!
//! The standard four-phase loop: descend the tree by UCB1, expand one
//! untried move, run a random playout from there, and push the outcome
//! back along the path. The tree runs for a wall-clock budget and the
//! final answer is the most-visited root child, which tracks confidence
//! better than raw win rate.
//!
//! Nodes live in a flat arena and refer to each other by index, so the
//! tree needs no ownership cycles and drops in one free.

use std::time::{Duration, Instant};

use crate::board::{Board, Pos, Stone};
use crate::movegen::{self, CANDIDATE_CAP};
use crate::rules::has_five_from;

/// UCB1 exploration constant
const EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Candidate radius for positions tracked in the tree
const TREE_RADIUS: i32 = 2;

/// Candidate radius during playouts, kept tight for speed
const PLAYOUT_RADIUS: i32 = 1;

/// A playout longer than this counts as a draw
const PLAYOUT_CAP: usize = 60;

/// A node in the search tree.
struct Node {
    /// Arena index of the parent, `None` for the root
    parent: Option<usize>,
    /// Move that led here, `None` for the root
    mv: Option<Pos>,
    /// Stone that played `mv`
    player: Stone,
    /// Arena indices of expanded children
    children: Vec<usize>,
    /// Moves not yet expanded from this position
    untried: Vec<Pos>,
    visits: u32,
    /// Accumulated reward from `player`'s perspective, one of
    /// {+1, -1, 0} per visit
    wins: f64,
}

/// Result of one MCTS run.
#[derive(Debug, Clone)]
pub struct MctsResult {
    /// Best move found, `None` only when the board has no legal move
    pub best_move: Option<Pos>,
    /// Win probability estimate for the chosen move, in [0, 1]
    pub winrate: f64,
    /// Completed simulations
    pub playouts: u64,
}

/// One-shot MCTS searcher with a wall-clock budget.
pub struct MctsSearcher {
    budget: Duration,
    arena: Vec<Node>,
}

impl MctsSearcher {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            arena: Vec::new(),
        }
    }

    /// Search the position for the configured budget. `ai_stone` is the
    /// side to move at the root.
    ///
    /// Always completes at least one simulation, so a short budget
    /// degrades strength rather than correctness.
    pub fn search(&mut self, board: &Board, ai_stone: Stone) -> MctsResult {
        self.arena.clear();

        let root_moves = Self::node_moves(board);
        if root_moves.is_empty() {
            return MctsResult {
                best_move: None,
                winrate: 0.0,
                playouts: 0,
            };
        }
        self.arena.push(Node {
            parent: None,
            mv: None,
            player: ai_stone.opponent(),
            children: Vec::new(),
            untried: root_moves,
            visits: 0,
            wins: 0.0,
        });

        let start = Instant::now();
        let mut playouts = 0u64;
        loop {
            self.simulate(board);
            playouts += 1;
            if start.elapsed() >= self.budget {
                break;
            }
        }

        let best = self.arena[0]
            .children
            .iter()
            .copied()
            .max_by_key(|&idx| self.arena[idx].visits);
        match best {
            Some(idx) => {
                let node = &self.arena[idx];
                let mean = node.wins / node.visits as f64;
                MctsResult {
                    best_move: node.mv,
                    winrate: (mean + 1.0) / 2.0,
                    playouts,
                }
            }
            None => MctsResult {
                best_move: None,
                winrate: 0.0,
                playouts,
            },
        }
    }

    /// One selection / expansion / playout / backpropagation pass.
    fn simulate(&mut self, root_board: &Board) {
        let mut board = root_board.clone();
        let mut idx = 0usize;

        // Selection: follow UCB1 while fully expanded
        loop {
            let node = &self.arena[idx];
            if !node.untried.is_empty() || node.children.is_empty() {
                break;
            }
            idx = self.best_child(idx);
            let (mv, player) = match self.arena[idx].mv {
                Some(mv) => (mv, self.arena[idx].player),
                None => break,
            };
            board.place_stone(mv, player);
            if has_five_from(&board, mv, player) {
                // Revisiting a decided node reinforces its result
                self.backprop(idx, Some(player));
                return;
            }
        }

        // Expansion: one untried move becomes a new leaf
        let leaf = match self.arena[idx].untried.pop() {
            Some(mv) => {
                let mover = self.arena[idx].player.opponent();
                board.place_stone(mv, mover);
                let won = has_five_from(&board, mv, mover);
                let untried = if won { Vec::new() } else { Self::node_moves(&board) };

                let child_idx = self.arena.len();
                self.arena.push(Node {
                    parent: Some(idx),
                    mv: Some(mv),
                    player: mover,
                    children: Vec::new(),
                    untried,
                    visits: 0,
                    wins: 0.0,
                });
                self.arena[idx].children.push(child_idx);

                if won {
                    self.backprop(child_idx, Some(mover));
                    return;
                }
                child_idx
            }
            None => idx,
        };

        // Playout from the leaf, then push the outcome up the path
        let first_mover = self.arena[leaf].player.opponent();
        let winner = Self::playout(&mut board, first_mover);
        self.backprop(leaf, winner);
    }

    /// UCB1 pick among the children of `idx`.
    fn best_child(&self, idx: usize) -> usize {
        let ln_parent = (self.arena[idx].visits.max(1) as f64).ln();
        let mut best = self.arena[idx].children[0];
        let mut best_score = f64::NEG_INFINITY;

        for &child_idx in &self.arena[idx].children {
            let child = &self.arena[child_idx];
            let mean = child.wins / child.visits as f64;
            let score = mean + EXPLORATION * (ln_parent / child.visits as f64).sqrt();
            if score > best_score {
                best_score = score;
                best = child_idx;
            }
        }
        best
    }

    /// Uniformly random continuation. Returns the winner, or `None`
    /// when the board fills up or the ply cap is hit.
    fn playout(board: &mut Board, first_mover: Stone) -> Option<Stone> {
        let mut mover = first_mover;
        for _ in 0..PLAYOUT_CAP {
            let moves = movegen::candidates(board, PLAYOUT_RADIUS);
            if moves.is_empty() {
                return None;
            }
            let mv = moves[fastrand::usize(..moves.len())];
            board.place_stone(mv, mover);
            if has_five_from(board, mv, mover) {
                return Some(mover);
            }
            mover = mover.opponent();
        }
        None
    }

    /// Credit the outcome along the path to the root: +1 where the
    /// node's mover won, -1 where it lost, 0 on a draw.
    fn backprop(&mut self, mut idx: usize, winner: Option<Stone>) {
        loop {
            let node = &mut self.arena[idx];
            node.visits += 1;
            if let Some(stone) = winner {
                node.wins += if stone == node.player { 1.0 } else { -1.0 };
            }
            match node.parent {
                Some(parent) => idx = parent,
                None => break,
            }
        }
    }

    /// Per-node candidate list, shuffled so expansion order is random.
    fn node_moves(board: &Board) -> Vec<Pos> {
        let mut moves = movegen::candidates(board, TREE_RADIUS);
        movegen::sample_candidates(&mut moves, CANDIDATE_CAP);
        fastrand::shuffle(&mut moves);
        moves
    }
}
