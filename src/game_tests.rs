#[cfg(test)]
mod tests {
    use crate::core::GameStatus;
    use crate::game::{ClickOutcome, Game, TurnPhase};
    use crate::logic::Board;
    use shakmaty::{Color, Role, Square};

    fn game_from(fen: &str) -> Game {
        Game::with_board(Board::from_fen(fen).unwrap())
    }

    #[test]
    fn opening_pawn_push_hands_the_turn_to_the_engine() {
        let mut game = Game::new();

        assert_eq!(game.on_square_clicked(Square::E2), ClickOutcome::Selected(Square::E2));
        assert_eq!(game.on_square_clicked(Square::E4), ClickOutcome::MovePlayed);

        assert_eq!(game.phase(), TurnPhase::AwaitingEngine);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.board().turn(), Color::Black);
        assert_eq!(game.selection(), None);
        assert!(game.board().piece_at(Square::E4).is_some());
        assert!(game.board().piece_at(Square::E2).is_none());
    }

    #[test]
    fn first_click_must_land_on_an_own_piece() {
        let mut game = Game::new();

        // Empty square.
        assert_eq!(game.on_square_clicked(Square::E4), ClickOutcome::Ignored);
        assert_eq!(game.selection(), None);

        // Opponent piece.
        assert_eq!(game.on_square_clicked(Square::E7), ClickOutcome::Ignored);
        assert_eq!(game.selection(), None);
        assert_eq!(game.phase(), TurnPhase::AwaitingHuman);
    }

    #[test]
    fn an_illegal_destination_rejects_the_move_and_clears_the_selection() {
        let mut game = Game::new();
        let before = game.board().fen();

        assert_eq!(game.on_square_clicked(Square::H1), ClickOutcome::Selected(Square::H1));
        // The rook cannot slide through its own pawn.
        assert_eq!(game.on_square_clicked(Square::H5), ClickOutcome::SelectionCleared);

        assert_eq!(game.board().fen(), before);
        assert_eq!(game.selection(), None);
        assert_eq!(game.phase(), TurnPhase::AwaitingHuman);
    }

    #[test]
    fn clicking_the_selected_square_again_clears_the_selection() {
        let mut game = Game::new();
        let before = game.board().fen();

        game.on_square_clicked(Square::E2);
        assert_eq!(game.on_square_clicked(Square::E2), ClickOutcome::SelectionCleared);

        assert_eq!(game.selection(), None);
        assert_eq!(game.board().fen(), before);
    }

    #[test]
    fn a_failed_attempt_does_not_change_the_eventual_outcome() {
        let mut direct = Game::new();
        direct.on_square_clicked(Square::G1);
        direct.on_square_clicked(Square::F3);

        let mut detoured = Game::new();
        detoured.on_square_clicked(Square::G1);
        // Illegal destination, then a click on an empty square, then
        // the same move again.
        assert_eq!(detoured.on_square_clicked(Square::G4), ClickOutcome::SelectionCleared);
        assert_eq!(detoured.on_square_clicked(Square::E5), ClickOutcome::Ignored);
        detoured.on_square_clicked(Square::G1);
        assert_eq!(detoured.on_square_clicked(Square::F3), ClickOutcome::MovePlayed);

        assert_eq!(direct.board().fen(), detoured.board().fen());
        assert_eq!(direct.phase(), detoured.phase());
    }

    #[test]
    fn turns_strictly_alternate_between_the_sides() {
        let mut game = Game::new();

        game.on_square_clicked(Square::E2);
        game.on_square_clicked(Square::E4);
        assert_eq!(game.board().turn(), Color::Black);

        game.apply_engine_reply("e7e5").unwrap();
        assert_eq!(game.phase(), TurnPhase::AwaitingHuman);
        assert_eq!(game.board().turn(), Color::White);

        game.on_square_clicked(Square::G1);
        game.on_square_clicked(Square::F3);
        assert_eq!(game.board().turn(), Color::Black);

        game.apply_engine_reply("b8c6").unwrap();
        assert_eq!(game.phase(), TurnPhase::AwaitingHuman);
        assert_eq!(game.board().turn(), Color::White);
    }

    #[test]
    fn clicks_are_dropped_while_the_engine_is_on_the_move() {
        let mut game = Game::new();
        game.on_square_clicked(Square::E2);
        game.on_square_clicked(Square::E4);
        let pending = game.board().fen();

        assert_eq!(game.phase(), TurnPhase::AwaitingEngine);
        assert_eq!(game.on_square_clicked(Square::D2), ClickOutcome::Ignored);
        assert_eq!(game.on_square_clicked(Square::E7), ClickOutcome::Ignored);
        assert_eq!(game.selection(), None);
        assert_eq!(game.board().fen(), pending);
    }

    #[test]
    fn delivering_mate_ends_the_game_without_consulting_the_engine() {
        let mut game = game_from("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");

        game.on_square_clicked(Square::A1);
        assert_eq!(game.on_square_clicked(Square::A8), ClickOutcome::MovePlayed);

        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert!(!game.wants_engine_move());

        // Terminal lock: nothing moves any more.
        let locked = game.board().fen();
        assert_eq!(game.on_square_clicked(Square::A8), ClickOutcome::Ignored);
        assert_eq!(game.on_square_clicked(Square::G8), ClickOutcome::Ignored);
        assert_eq!(game.board().fen(), locked);
        assert_eq!(game.status(), GameStatus::Checkmate);
    }

    #[test]
    fn an_illegal_engine_reply_faults_without_touching_the_board() {
        let mut game = Game::new();
        game.on_square_clicked(Square::E2);
        game.on_square_clicked(Square::E4);
        let before = game.board().fen();

        // A white move offered on black's turn.
        assert!(game.apply_engine_reply("e1e2").is_err());
        assert_eq!(game.phase(), TurnPhase::Faulted);
        assert_eq!(game.board().fen(), before);

        // Faulted is terminal for input as well.
        assert_eq!(game.on_square_clicked(Square::D7), ClickOutcome::Ignored);
        assert_eq!(game.board().fen(), before);
    }

    #[test]
    fn a_missing_engine_reply_faults_the_session() {
        let mut game = Game::new();
        game.on_square_clicked(Square::E2);
        game.on_square_clicked(Square::E4);
        let before = game.board().fen();

        game.fault();
        assert_eq!(game.phase(), TurnPhase::Faulted);
        assert!(game.is_over());
        assert_eq!(game.board().fen(), before);
        assert_eq!(game.on_square_clicked(Square::E7), ClickOutcome::Ignored);
    }

    #[test]
    fn an_engine_reply_outside_its_turn_is_rejected() {
        let mut game = Game::new();
        let before = game.board().fen();

        assert!(game.apply_engine_reply("e7e5").is_err());
        assert_eq!(game.board().fen(), before);
        assert_eq!(game.phase(), TurnPhase::AwaitingHuman);
    }

    #[test]
    fn a_black_to_move_board_starts_with_the_engine() {
        let game = game_from("rnbqkbnr/pppppppp/8/8/4P3/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
        assert_eq!(game.phase(), TurnPhase::AwaitingEngine);
        assert!(game.wants_engine_move());
    }

    #[test]
    fn an_already_finished_board_starts_in_game_over() {
        let game = game_from("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert_eq!(game.status(), GameStatus::Checkmate);
    }

    #[test]
    fn a_selection_exposes_its_legal_destinations() {
        let mut game = Game::new();
        game.on_square_clicked(Square::E2);

        let targets = game.selected_targets();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&Square::E3));
        assert!(targets.contains(&Square::E4));
    }

    #[test]
    fn castling_works_through_two_clicks() {
        let mut game = game_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

        game.on_square_clicked(Square::E1);
        assert_eq!(game.on_square_clicked(Square::G1), ClickOutcome::MovePlayed);

        let king = game.board().piece_at(Square::G1).unwrap();
        assert_eq!(king.role, Role::King);
        assert_eq!(king.color, Color::White);
        let rook = game.board().piece_at(Square::F1).unwrap();
        assert_eq!(rook.role, Role::Rook);
        assert_eq!(game.phase(), TurnPhase::AwaitingEngine);
    }

    #[test]
    fn an_engine_move_can_end_the_game() {
        // Black to move; the queen drop to g3 stalemates the white
        // king in the corner.
        let mut game = game_from("7k/8/6q1/8/8/8/8/7K b - - 0 1");
        assert_eq!(game.phase(), TurnPhase::AwaitingEngine);

        game.apply_engine_reply("g6g3").unwrap();
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert_eq!(game.on_square_clicked(Square::H1), ClickOutcome::Ignored);
    }

    #[test]
    fn a_human_promotion_arrives_as_a_queen() {
        let mut game = game_from("8/P6k/8/8/8/8/8/K7 w - - 0 1");

        game.on_square_clicked(Square::A7);
        assert_eq!(game.on_square_clicked(Square::A8), ClickOutcome::MovePlayed);

        let piece = game.board().piece_at(Square::A8).unwrap();
        assert_eq!(piece.role, Role::Queen);
        assert_eq!(piece.color, Color::White);
    }
}
