//! Subcommand implementations. Each returns the text to print.

use anyhow::{bail, Context, Result};
use chess_core::{Color, Coord, Piece};
use chess_engine::movegen::perft::{perft, perft_divide};
use chess_engine::{Board, Game, Status};
use std::path::PathBuf;

/// Where the starting board comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Startpos,
    Fen(String),
    Json(PathBuf),
}

/// Builds the game to operate on. `turn` overrides the side to move.
pub fn load_game(source: &Source, turn: Option<Color>) -> Result<Game> {
    let game = match source {
        Source::Startpos => Game::new(),
        Source::Fen(fen) => Game::from_fen(fen).context("could not parse FEN")?,
        Source::Json(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            let board = Board::from_json(&json)
                .with_context(|| format!("could not parse board in {}", path.display()))?;
            Game::from_board(board, turn.unwrap_or(Color::White))
        }
    };

    Ok(match turn {
        Some(turn) if turn != game.turn() => Game::from_board(game.board().clone(), turn),
        _ => game,
    })
}

/// Renders the board, the side to move and its status.
pub fn show(game: &Game) -> String {
    format!(
        "{}\n{} to move ({})\n",
        game.board(),
        game.turn(),
        game.status()
    )
}

/// Lists legal moves, either of one square or of the whole side to move.
pub fn moves(game: &Game, square: Option<&str>) -> Result<String> {
    let list = match square {
        Some(square) => {
            let coord: Coord = square.parse()?;
            game.legal_moves_at(coord)
        }
        None => game.all_legal_moves(),
    };

    let mut names: Vec<String> = list.iter().map(|m| m.to_string()).collect();
    names.sort();
    Ok(names.join("\n"))
}

/// Reports the status of both sides.
pub fn status(game: &Game) -> String {
    let board = game.board();
    let mut lines: Vec<String> = Color::ALL
        .into_iter()
        .map(|color| format!("{color}: {}", chess_engine::rules::status(board, color)))
        .collect();
    if let Some(result) = game.result() {
        lines.push(format!("result: {result}"));
    }
    lines.join("\n") + "\n"
}

/// Plays a sequence of moves such as `e2e4` or `a7a8n` and describes each.
///
/// With `json` set, the resulting board is printed in its JSON form instead.
pub fn play(game: &mut Game, moves: &[String], json: bool) -> Result<String> {
    let mut lines = Vec::with_capacity(moves.len() + 1);

    for (n, token) in moves.iter().enumerate() {
        let (from, to, promotion) = parse_move(token)?;
        let record = game
            .play(from, to, promotion)
            .with_context(|| format!("move {} ({token})", n + 1))?;
        tracing::info!(ply = n + 1, "{record}");
        lines.push(format!("{}. {record}", n + 1));
    }

    if json {
        return Ok(game.board().to_json()?);
    }

    if let Some(result) = game.result() {
        lines.push(result.to_string());
    } else if game.status() == Status::Check {
        lines.push(format!("{} is in check", game.turn()));
    }
    Ok(lines.join("\n"))
}

/// Counts leaf nodes, optionally broken down by root move.
pub fn run_perft(game: &Game, depth: u32, divide: bool) -> String {
    let board = game.board();
    let turn = game.turn();

    if !divide {
        return format!("perft({depth}) = {}\n", perft(board, turn, depth));
    }

    let results = perft_divide(board, turn, depth);
    let total: u64 = results.iter().map(|(_, n)| n).sum();
    let mut out: String = results
        .iter()
        .map(|(m, nodes)| format!("{m}: {nodes}\n"))
        .collect();
    out.push_str(&format!("\ntotal: {total}\n"));
    out
}

/// Splits `e2e4` / `e7e8q` into squares and an optional promotion piece.
fn parse_move(token: &str) -> Result<(&str, &str, Option<Piece>)> {
    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        bail!("invalid move {token:?}: expected two squares and an optional piece letter");
    }

    let promotion = match token.get(4..) {
        Some("") | None => None,
        Some(piece) => Some(
            Piece::from_name(piece)
                .with_context(|| format!("invalid promotion piece {piece:?}"))?,
        ),
    };
    Ok((&token[0..2], &token[2..4], promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_of(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("e2e4").unwrap(), ("e2", "e4", None));
        assert_eq!(
            parse_move("a7a8n").unwrap(),
            ("a7", "a8", Some(Piece::Knight))
        );
        assert!(parse_move("e2").is_err());
        assert!(parse_move("a7a8x").is_err());
        assert!(parse_move("e2e4e5").is_err());
    }

    #[test]
    fn test_show_startpos() {
        let game = load_game(&Source::Startpos, None).unwrap();
        let out = show(&game);
        assert!(out.contains("rnbqkbnr"));
        assert!(out.contains("white to move (normal)"));
    }

    #[test]
    fn test_turn_override() {
        let game = load_game(&Source::Startpos, Some(Color::Black)).unwrap();
        assert_eq!(game.turn(), Color::Black);

        let game = load_game(
            &Source::Fen("4k3/8/8/8/8/8/8/4K3 b - -".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_bad_fen() {
        assert!(load_game(&Source::Fen("nonsense".to_string()), None).is_err());
    }

    #[test]
    fn test_missing_board_file() {
        let source = Source::Json(PathBuf::from("/nonexistent/board.json"));
        assert!(load_game(&source, None).is_err());
    }

    #[test]
    fn test_board_file() {
        let path =
            std::env::temp_dir().join(format!("chess-cli-board-{}.json", std::process::id()));
        std::fs::write(&path, Board::startpos().to_json().unwrap()).unwrap();
        let game = load_game(&Source::Json(path.clone()), Some(Color::Black));
        std::fs::remove_file(&path).ok();

        let game = game.unwrap();
        assert_eq!(game.board(), &Board::startpos());
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_moves_for_square() {
        let game = Game::new();
        assert_eq!(moves(&game, Some("g1")).unwrap(), "g1f3\ng1h3");
        assert_eq!(moves(&game, None).unwrap().lines().count(), 20);
        assert!(moves(&game, Some("z9")).is_err());
    }

    #[test]
    fn test_play_fools_mate() {
        let mut game = Game::new();
        let out = play(&mut game, &moves_of(&["f2f3", "e7e5", "g2g4", "d8h4"]), false).unwrap();
        assert!(out.contains("1. pawn from f2 to f3"));
        assert!(out.contains("4. queen from d8 to h4 checkmate"));
        assert!(out.contains("black wins by checkmate"));

        let report = status(&game);
        assert!(report.contains("white: checkmate"));
        assert!(report.contains("black: normal"));
    }

    #[test]
    fn test_status_lines() {
        let game = Game::new();
        assert_eq!(status(&game), "white: normal\nblack: normal\n");
    }

    #[test]
    fn test_play_reports_check() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - -").unwrap();
        let out = play(&mut game, &moves_of(&["a1a8"]), false).unwrap();
        assert!(out.contains("rook from a1 to a8 check"));
        assert!(out.contains("black is in check"));
    }

    #[test]
    fn test_play_json_output() {
        let mut game = Game::new();
        let out = play(&mut game, &moves_of(&["e2e4"]), true).unwrap();
        let board = Board::from_json(&out).unwrap();
        assert_eq!(&board, game.board());
    }

    #[test]
    fn test_play_illegal_move_names_ply() {
        let mut game = Game::new();
        let err = play(&mut game, &moves_of(&["e2e4", "e2e4"]), false).unwrap_err();
        assert!(format!("{err:#}").contains("move 2 (e2e4)"));
    }

    #[test]
    fn test_perft_output() {
        let game = Game::new();
        assert_eq!(run_perft(&game, 2, false), "perft(2) = 400\n");

        let divided = run_perft(&game, 1, true);
        assert!(divided.contains("e2e4: 1"));
        assert!(divided.contains("total: 20"));
    }
}
