use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snake_sim::config::GameConfig;
use snake_sim::game::{Game, GameStatus};
use snake_sim::input::Direction;
use snake_sim::snake::Position;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn open_board() -> GameConfig {
    GameConfig {
        obstacle_count: 0,
        ..GameConfig::default()
    }
}

fn assert_disjoint(game: &Game) {
    let body: HashSet<Position> = game.body().collect();
    let foods: HashSet<Position> = game.foods().iter().map(|food| food.position).collect();
    let obstacles: HashSet<Position> = game.obstacles().iter().copied().collect();

    assert_eq!(foods.len(), game.foods().len());
    assert_eq!(obstacles.len(), game.obstacles().len());
    assert!(body.is_disjoint(&foods), "food under the snake");
    assert!(body.is_disjoint(&obstacles), "obstacle under the snake");
    assert!(foods.is_disjoint(&obstacles), "food on an obstacle");
}

#[test]
fn random_play_keeps_cells_disjoint_and_length_consistent() {
    let mut steering = StdRng::seed_from_u64(1234);

    for seed in 0..40 {
        let mut game = Game::new_with_seed(GameConfig::default(), seed).expect("valid config");
        assert_disjoint(&game);

        for _ in 0..500 {
            if steering.gen_bool(0.3) {
                game.change_direction(DIRECTIONS[steering.gen_range(0..DIRECTIONS.len())]);
            }

            let before = game.len();
            let outcome = game.tick();
            let grown = usize::from(outcome.fruit_eaten.is_some());
            assert_eq!(game.len(), before + grown);

            if game.status() != GameStatus::Playing {
                assert!(outcome.death.is_some());
                break;
            }
            assert_disjoint(&game);
        }
    }
}

#[test]
fn reset_twice_yields_two_valid_games() {
    let mut game = Game::new_with_seed(GameConfig::default(), 77).expect("valid config");

    game.reset();
    assert_disjoint(&game);
    assert_eq!(game.len(), 3);
    assert_eq!(game.foods().len(), 3);
    assert_eq!(game.obstacles().len(), 8);

    game.reset();
    assert_disjoint(&game);
    assert_eq!(game.len(), 3);
    assert_eq!(game.score(), 0);
    assert_eq!(game.direction(), Direction::Right);
    assert!(!game.is_game_over());
}

#[test]
fn same_seed_and_moves_replay_identically() {
    let script = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    let play = || {
        let mut game = Game::new_with_seed(GameConfig::default(), 5).expect("valid config");
        let mut frames = Vec::new();
        for tick in 0..120 {
            if tick % 7 == 0 {
                game.change_direction(script[(tick / 7) % script.len()]);
            }
            game.tick();
            frames.push(game.snapshot());
        }
        frames
    };

    assert_eq!(play(), play());
}

#[test]
fn head_wraps_across_every_edge() {
    let mut game = Game::new_with_seed(open_board(), 3).expect("valid config");
    assert_eq!(game.head(), Position::new(20, 12));

    for _ in 0..20 {
        game.tick();
    }
    assert_eq!(game.head(), Position::new(0, 12));

    game.change_direction(Direction::Up);
    for _ in 0..13 {
        game.tick();
    }
    assert_eq!(game.head(), Position::new(0, 24));

    game.change_direction(Direction::Left);
    game.tick();
    assert_eq!(game.head(), Position::new(39, 24));

    game.change_direction(Direction::Down);
    game.tick();
    assert_eq!(game.head(), Position::new(39, 0));
    assert!(!game.is_game_over());
}

#[test]
fn reversal_requests_never_take_effect() {
    for direction in DIRECTIONS {
        let mut game = Game::new_with_seed(open_board(), 11).expect("valid config");
        // Reaching Left from the initial Right heading takes a detour.
        if direction == Direction::Left {
            game.change_direction(Direction::Up);
            game.tick();
        }
        game.change_direction(direction);
        game.tick();
        assert_eq!(game.direction(), direction);

        let head = game.head();
        game.change_direction(direction.opposite());
        assert_eq!(game.pending_direction(), direction);

        game.tick();
        assert_eq!(game.head(), head.step(direction));
        assert!(!game.is_game_over());
    }
}
