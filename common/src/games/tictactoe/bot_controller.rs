use crate::games::SessionRng;
use super::board::{Board, get_available_moves};
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, Mark, Player, WIN_LENGTH};

const WIN_SCORE: i32 = 1_000_000;

/// Positions the hard tier may expand for a single move, across all
/// deepening iterations.
pub const NODE_BUDGET: usize = 400_000;

/// Beyond this many empty cells the hard tier only considers cells near
/// existing marks.
const NEIGHBOURHOOD_THRESHOLD: usize = 16;
const NEIGHBOURHOOD_RADIUS: usize = WIN_LENGTH - 1;

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone)]
pub struct BotInput {
    pub board: Board,
    pub player: Player,
}

impl BotInput {
    pub fn new(board: Board, player: Player) -> Self {
        Self { board, player }
    }

    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.board().clone(),
            player: state.current_player(),
        }
    }
}

/// Picks the cell the computer should occupy. Returns `None` only when the
/// board has no empty cell.
pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(input, rng),
        Difficulty::Medium => calculate_tactical_move(input, rng),
        Difficulty::Hard => calculate_minimax_move(input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = get_available_moves(&input.board);
    rng.choose(&available_moves)
}

fn calculate_tactical_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = get_available_moves(&input.board);
    if available_moves.is_empty() {
        return None;
    }

    let mut board = input.board.clone();

    if let Some(index) = find_winning_move(&mut board, input.player, &available_moves) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(&mut board, input.player.opponent(), &available_moves) {
        return Some(index);
    }

    rng.choose(&available_moves)
}

pub fn calculate_minimax_move(input: &BotInput) -> Option<usize> {
    let outcome = calculate_minimax_move_with_budget(input, NODE_BUDGET);
    if outcome.nodes >= NODE_BUDGET {
        crate::log!(
            "Node budget spent, keeping the depth {} move",
            outcome.completed_depth
        );
    }
    outcome.best_move
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchOutcome {
    pub best_move: Option<usize>,
    pub nodes: usize,
    /// Deepest iteration that scored every root move before the budget ran out.
    pub completed_depth: usize,
}

pub(crate) fn calculate_minimax_move_with_budget(
    input: &BotInput,
    node_budget: usize,
) -> SearchOutcome {
    let bot = input.player;
    let available_moves = get_available_moves(&input.board);
    let mut outcome = SearchOutcome {
        best_move: None,
        nodes: 0,
        completed_depth: 0,
    };

    if available_moves.is_empty() {
        return outcome;
    }

    let mut board = input.board.clone();

    if let Some(index) = find_winning_move(&mut board, bot, &available_moves) {
        outcome.best_move = Some(index);
        return outcome;
    }

    if let Some(index) = find_winning_move(&mut board, bot.opponent(), &available_moves) {
        outcome.best_move = Some(index);
        return outcome;
    }

    let candidates = candidate_moves(&board, &available_moves);
    let depth_limit = calculate_depth_limit(candidates.len());
    let initial_score = evaluate_board(&board, bot);

    let mut search = Search {
        bot,
        candidates: &candidates,
        nodes: 0,
        node_budget,
        aborted: false,
    };

    outcome.best_move = candidates.first().copied();
    for depth in 1..=depth_limit {
        match search.search_root(&mut board, depth, initial_score) {
            Some(index) => {
                outcome.best_move = Some(index);
                outcome.completed_depth = depth;
            }
            None => break,
        }
    }

    outcome.nodes = search.nodes;
    outcome
}

fn find_winning_move(board: &mut Board, player: Player, moves: &[usize]) -> Option<usize> {
    for &index in moves {
        board.place(index, player);
        let winner = check_win_at(board, index);
        board.clear(index);

        if winner == Some(player) {
            return Some(index);
        }
    }
    None
}

fn candidate_moves(board: &Board, available_moves: &[usize]) -> Vec<usize> {
    if available_moves.len() <= NEIGHBOURHOOD_THRESHOLD {
        return available_moves.to_vec();
    }

    let size = board.size();
    let near_mark = |index: usize| {
        let (row, col) = (index / size, index % size);
        let span = |center: usize| {
            let last = (center + NEIGHBOURHOOD_RADIUS).min(size - 1);
            center.saturating_sub(NEIGHBOURHOOD_RADIUS)..=last
        };
        span(row)
            .into_iter()
            .any(|r| span(col).into_iter().any(|c| !board.cells()[r * size + c].is_empty()))
    };

    let nearby: Vec<usize> = available_moves
        .iter()
        .copied()
        .filter(|&i| near_mark(i))
        .collect();
    if nearby.is_empty() {
        let center = (size / 2) * size + size / 2;
        return vec![center];
    }
    nearby
}

fn calculate_depth_limit(moves_count: usize) -> usize {
    match moves_count {
        0..=9 => moves_count,
        10..=16 => 6,
        17..=36 => 4,
        _ => 3,
    }
}

struct Search<'a> {
    bot: Player,
    candidates: &'a [usize],
    nodes: usize,
    node_budget: usize,
    aborted: bool,
}

impl Search<'_> {
    /// Returns `None` when the node budget ran out before every root move was
    /// scored at this depth.
    fn search_root(
        &mut self,
        board: &mut Board,
        max_depth: usize,
        initial_score: i32,
    ) -> Option<usize> {
        let mut best_move = None;
        let mut best_score = i32::MIN;

        for &index in self.candidates {
            if !board.cells()[index].is_empty() {
                continue;
            }

            let delta = eval_delta_before_move(board, self.bot, index, self.bot);
            board.place(index, self.bot);
            // Searching with alpha at the current best keeps the earliest index
            // on equal scores.
            let score = self.minimax(
                board,
                1,
                max_depth,
                false,
                best_score.max(-WIN_SCORE - 1),
                i32::MAX,
                index,
                initial_score + delta,
            );
            board.clear(index);

            if self.aborted {
                return None;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(index);
            }
        }

        best_move
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        max_depth: usize,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        last_move: usize,
        current_score: i32,
    ) -> i32 {
        if self.nodes >= self.node_budget {
            self.aborted = true;
            return 0;
        }
        self.nodes += 1;

        if let Some(winner) = check_win_at(board, last_move) {
            return if winner == self.bot {
                WIN_SCORE - depth as i32
            } else {
                -WIN_SCORE + depth as i32
            };
        }

        if depth >= max_depth {
            return current_score;
        }

        let mover = if is_maximizing { self.bot } else { self.bot.opponent() };
        let mut best = if is_maximizing { i32::MIN } else { i32::MAX };
        let mut any_move = false;

        for &index in self.candidates {
            if !board.cells()[index].is_empty() {
                continue;
            }
            any_move = true;

            let delta = eval_delta_before_move(board, self.bot, index, mover);
            board.place(index, mover);
            let eval = self.minimax(
                board,
                depth + 1,
                max_depth,
                !is_maximizing,
                alpha,
                beta,
                index,
                current_score + delta,
            );
            board.clear(index);

            if self.aborted {
                return 0;
            }

            if is_maximizing {
                best = best.max(eval);
                alpha = alpha.max(eval);
            } else {
                best = best.min(eval);
                beta = beta.min(eval);
            }
            if beta <= alpha {
                return best;
            }
        }

        if !any_move {
            // Board full (or no candidate left) without a run: a draw.
            return 0;
        }
        best
    }
}

fn step(size: usize, row: usize, col: usize, dr: isize, dc: isize, i: isize) -> Option<usize> {
    let r = row as isize + dr * i;
    let c = col as isize + dc * i;
    if r < 0 || c < 0 || r >= size as isize || c >= size as isize {
        return None;
    }
    Some(r as usize * size + c as usize)
}

/// Run check restricted to lines through `index`; equivalent to the full
/// scan when the board had no run before the last placement.
pub(crate) fn check_win_at(board: &Board, index: usize) -> Option<Player> {
    let cells = board.cells();
    let player = cells[index].player()?;
    let mark = cells[index];
    let size = board.size();
    let (row, col) = (index / size, index % size);

    for (dr, dc) in DIRECTIONS {
        let mut count = 1;

        for sign in [1isize, -1] {
            let mut i = 1isize;
            while i < WIN_LENGTH as isize {
                match step(size, row, col, dr * sign, dc * sign, i) {
                    Some(next) if cells[next] == mark => count += 1,
                    _ => break,
                }
                i += 1;
            }
        }

        if count >= WIN_LENGTH {
            return Some(player);
        }
    }

    None
}

fn window_score(bot_count: i32, opp_count: i32) -> i32 {
    if opp_count == 0 {
        bot_count * bot_count
    } else if bot_count == 0 {
        -(opp_count * opp_count)
    } else {
        0
    }
}

/// Change in `evaluate_board` caused by `move_mark` occupying `index`,
/// computed from the windows passing through that cell only.
fn eval_delta_before_move(
    board: &Board,
    bot: Player,
    index: usize,
    move_player: Player,
) -> i32 {
    let size = board.size();
    let cells = board.cells();
    let bot_mark = bot.mark();
    let (row, col) = (index / size, index % size);

    let mut delta = 0i32;

    for (dr, dc) in DIRECTIONS {
        for offset in 0..WIN_LENGTH as isize {
            let Some(start) = step(size, row, col, dr, dc, -offset) else {
                continue;
            };
            let (start_row, start_col) = (start / size, start % size);
            if step(size, start_row, start_col, dr, dc, WIN_LENGTH as isize - 1).is_none() {
                continue;
            }

            let mut bot_count = 0;
            let mut opp_count = 0;
            for i in 0..WIN_LENGTH as isize {
                let Some(cell) = step(size, start_row, start_col, dr, dc, i) else {
                    continue;
                };
                match cells[cell] {
                    Mark::Empty => {}
                    m if m == bot_mark => bot_count += 1,
                    _ => opp_count += 1,
                }
            }

            let old_score = window_score(bot_count, opp_count);
            let new_score = if move_player == bot {
                window_score(bot_count + 1, opp_count)
            } else {
                window_score(bot_count, opp_count + 1)
            };

            delta += new_score - old_score;
        }
    }

    delta
}

fn evaluate_board(board: &Board, bot: Player) -> i32 {
    let size = board.size();
    let cells = board.cells();
    let bot_mark = bot.mark();
    let mut score = 0;

    for row in 0..size {
        for col in 0..size {
            for (dr, dc) in DIRECTIONS {
                if step(size, row, col, dr, dc, WIN_LENGTH as isize - 1).is_none() {
                    continue;
                }
                let mut bot_count = 0;
                let mut opp_count = 0;
                for i in 0..WIN_LENGTH as isize {
                    let Some(cell) = step(size, row, col, dr, dc, i) else {
                        continue;
                    };
                    match cells[cell] {
                        Mark::Empty => {}
                        m if m == bot_mark => bot_count += 1,
                        _ => opp_count += 1,
                    }
                }
                score += window_score(bot_count, opp_count);
            }
        }
    }

    score
}
