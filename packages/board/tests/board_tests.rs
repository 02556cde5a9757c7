//! Integration tests for the board crate

use anyhow::Result;
use kifu_board::{Board, Cell, Color, Game, Grid, MovePoint, Point, PointList, SetupChanges, SnapshotBoard};

#[test]
fn test_diff_then_apply_reaches_desired() -> Result<()> {
    let mut board = SnapshotBoard::new(Game::Go, 9, 9)?;
    board.play_move(Color::Black, Point::new(0, 0).into(), None);
    board.play_move(Color::White, Point::new(1, 1).into(), None);

    let mut desired = Grid::new(9, 9)?;
    desired.set(Point::new(1, 1), Cell::Black)?;
    desired.set(Point::new(4, 4), Cell::White)?;

    let changes = board.diff(&desired)?;
    assert_eq!(changes.remove, PointList::new(vec![Point::new(0, 0)]));
    assert_eq!(changes.black, PointList::new(vec![Point::new(1, 1)]));
    assert_eq!(changes.white, PointList::new(vec![Point::new(4, 4)]));
    assert!(changes.arrows.is_empty());

    board.apply_setup(&changes);
    assert_eq!(board.grid(), &desired);
    assert!(board.diff(&desired)?.is_empty());
    Ok(())
}

#[test]
fn test_undo_restores_each_ply() -> Result<()> {
    let mut board = SnapshotBoard::new(Game::Go, 5, 5)?;
    let empty = board.grid().clone();

    board.play_move(Color::Black, Point::new(2, 2).into(), None);
    let after_move = board.grid().clone();
    board.add_dummy_move();
    board.apply_setup(&SetupChanges {
        white: PointList::new(vec![Point::new(0, 4)]),
        ..Default::default()
    });
    assert_eq!(board.plies(), 3);

    board.undo(1);
    assert_eq!(board.grid(), &after_move);
    board.undo(1);
    assert_eq!(board.grid(), &after_move);
    board.undo(1);
    assert_eq!(board.grid(), &empty);
    assert_eq!(board.plies(), 0);
    Ok(())
}

#[test]
fn test_move_number_override_is_undone() -> Result<()> {
    let mut board = SnapshotBoard::new(Game::Go, 9, 9)?;
    board.play_move(Color::Black, MovePoint::Pass, None);
    board.play_move(Color::White, Point::new(3, 3).into(), None);
    board.set_move_number(40);
    assert_eq!(board.move_number(), 40);

    board.play_move(Color::Black, Point::new(4, 4).into(), None);
    assert_eq!(board.move_number(), 41);

    board.undo(1);
    assert_eq!(board.move_number(), 40);
    board.undo(1);
    assert_eq!(board.move_number(), 1);
    Ok(())
}

#[test]
fn test_size_mismatch_is_rejected() -> Result<()> {
    let board = SnapshotBoard::new(Game::Go, 9, 9)?;
    let other = Grid::new(13, 13)?;
    assert!(board.diff(&other).is_err());
    assert!(SnapshotBoard::new(Game::Go, 53, 9).is_err());
    Ok(())
}

#[test]
fn test_default_color_to_play() -> Result<()> {
    let board = SnapshotBoard::new(Game::Go, 9, 9)?;
    assert_eq!(board.adjust_color_to_play(None), Color::Black);
    assert_eq!(board.adjust_color_to_play(Some(Color::White)), Color::White);
    Ok(())
}

#[test]
fn test_serde_names() -> Result<()> {
    assert_eq!(serde_json::to_string(&Game::NineMensMorris)?, "\"nine-mens-morris\"");
    let game: Game = serde_json::from_str("\"amazons\"")?;
    assert_eq!(game, Game::Amazons);

    let grid = Grid::new(2, 1)?;
    let restored: Grid = serde_json::from_str(&serde_json::to_string(&grid)?)?;
    assert_eq!(restored, grid);
    Ok(())
}
