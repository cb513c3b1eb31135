use crate::logic::Board;
use crossterm::{cursor, execute, style::Stylize, terminal};
use once_cell::sync::Lazy;
use shakmaty::{Color, File, Rank, Role, Square};
use std::collections::HashMap;
use std::io::stdout;

/// Glyph for every (color, role) pair, in FEN letters: upper case for
/// White, lower case for Black. A closed table, pieces never fall
/// outside it.
static PIECE_GLYPHS: Lazy<HashMap<(Color, Role), char>> = Lazy::new(|| {
    let mut glyphs = HashMap::new();
    for (role, white, black) in [
        (Role::Pawn, 'P', 'p'),
        (Role::Knight, 'N', 'n'),
        (Role::Bishop, 'B', 'b'),
        (Role::Rook, 'R', 'r'),
        (Role::Queen, 'Q', 'q'),
        (Role::King, 'K', 'k'),
    ] {
        glyphs.insert((Color::White, role), white);
        glyphs.insert((Color::Black, role), black);
    }
    glyphs
});

/// Everything the renderer needs beyond the board itself.
#[derive(Debug, Default)]
pub struct DisplayState {
    pub selected: Option<Square>,
    pub highlights: Vec<Square>,
    pub last_move: Option<(Square, Square)>,
    pub status_msg: Option<String>,
}

/// Redraws the whole screen. The layout below lines up with the
/// constants in `core::grid`; change one and you must change the
/// other.
pub fn render_board(board: &Board, state: &DisplayState) {
    let mut out = stdout();

    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
    .unwrap();

    print!("=== clickchess ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    print!("     a   b   c   d   e   f   g   h\r\n");
    print!("  +{}+\r\n", "----".repeat(8));

    for display_row in 0u32..8 {
        let rank = Rank::new(7 - display_row);
        print!("{} |", u32::from(rank) + 1);
        for file_index in 0u32..8 {
            let square = Square::from_coords(File::new(file_index), rank);
            render_cell(board, state, square);
        }
        print!("|\r\n");
        if display_row < 7 {
            print!("  |{}|\r\n", "    ".repeat(8));
        }
    }
    print!("  +{}+\r\n", "----".repeat(8));

    render_piece_key();
}

fn render_cell(board: &Board, state: &DisplayState, square: Square) {
    let piece = board.piece_at(square);
    let glyph = piece
        .and_then(|p| PIECE_GLYPHS.get(&(p.color, p.role)))
        .copied()
        .unwrap_or('.');

    let is_selected = state.selected == Some(square);
    let is_highlight = state.highlights.contains(&square);
    let is_last_move = state
        .last_move
        .map(|(from, to)| from == square || to == square)
        .unwrap_or(false);

    let (prefix, suffix) = if is_selected {
        ("|", "|")
    } else if is_highlight {
        ("(", ")")
    } else if is_last_move {
        ("{", "}")
    } else {
        (" ", " ")
    };

    let cell_text = format!("{} {}{}", prefix, glyph, suffix);

    if is_selected {
        print!("{}", cell_text.blue());
    } else if is_highlight {
        print!("{}", cell_text.green());
    } else if is_last_move {
        print!("{}", cell_text.red());
    } else if let Some(p) = piece {
        if p.color == Color::White {
            print!("{}", cell_text.cyan());
        } else {
            print!("{}", cell_text.magenta());
        }
    } else {
        print!("{}", cell_text);
    }
}

fn render_piece_key() {
    print!("\r\n");
    print!("  P pawn  N knight  B bishop  R rook  Q queen  K king\r\n");
    print!(
        "  {}  {}\r\n",
        "upper case: White (you)".cyan(),
        "lower case: Black (engine)".magenta()
    );
    print!("  click: select / move   q: quit\r\n");
}
