use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::time::Duration;
use common::games::SessionRng;
use common::games::tictactoe::{
    calculate_minimax_move, calculate_move, check_win, Board, BotInput, Difficulty, Mark, Player,
};

fn board_with_moves(size: usize, moves: &[(usize, usize, Mark)]) -> Board {
    let mut cells = vec![Mark::Empty; size * size];
    for &(row, col, mark) in moves {
        cells[row * size + col] = mark;
    }
    Board::from_cells(cells, size).unwrap()
}

fn bench_hard_full_game_3x3() {
    let mut cells = vec![Mark::Empty; 9];
    let mut player = Player::X;
    let mut session_rng = SessionRng::new(7);

    loop {
        let board = Board::from_cells(cells.clone(), 3).unwrap();
        let input = BotInput::new(board, player);
        match calculate_move(Difficulty::Hard, &input, &mut session_rng) {
            Some(index) => {
                cells[index] = player.mark();
                player = player.opponent();
            }
            None => break,
        }
        if check_win(&Board::from_cells(cells.clone(), 3).unwrap()).is_some() {
            break;
        }
    }
}

fn bench_single_move_empty_3x3() {
    let input = BotInput::new(Board::new(3).unwrap(), Player::X);
    calculate_minimax_move(&input);
}

fn bench_single_move_mid_game_5x5() {
    let board = board_with_moves(5, &[
        (2, 2, Mark::X), (1, 1, Mark::O), (2, 3, Mark::X), (2, 1, Mark::O),
    ]);
    calculate_minimax_move(&BotInput::new(board, Player::X));
}

fn bench_single_move_mid_game_7x7() {
    let board = board_with_moves(7, &[
        (3, 3, Mark::X), (3, 4, Mark::O), (4, 4, Mark::X), (2, 2, Mark::O),
        (4, 3, Mark::X), (5, 3, Mark::O), (2, 4, Mark::X), (4, 2, Mark::O),
    ]);
    calculate_minimax_move(&BotInput::new(board, Player::X));
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(10)
        .measurement_time(Duration::from_secs(30));

    group.bench_function("full_game_3x3", |b| {
        b.iter(bench_hard_full_game_3x3)
    });

    group.bench_function("single_move_empty_3x3", |b| {
        b.iter(bench_single_move_empty_3x3)
    });

    group.bench_function("single_move_mid_game_5x5", |b| {
        b.iter(bench_single_move_mid_game_5x5)
    });

    group.bench_function("single_move_mid_game_7x7", |b| {
        b.iter(bench_single_move_mid_game_7x7)
    });

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
