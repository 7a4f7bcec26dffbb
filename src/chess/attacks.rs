//! Attack detection: whether a given square would be attacked by a given
//! side. The sole building block for check detection and castling transit
//! checks, deliberately implemented as a square-centric ray walk rather than
//! a precomputed bitboard table: it runs once per candidate move inside the
//! make/probe/unmake legality filter in [`crate::chess::position`], not on
//! every piece at once, so there is nothing to amortize by precomputing.

use crate::chess::core::{Color, PieceKind, Square};
use crate::chess::position::Position;

/// The four diagonal step directions, shared with pseudo-move generation for
/// bishops and queens.
pub(crate) const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
/// The four orthogonal step directions, shared with pseudo-move generation
/// for rooks and queens.
pub(crate) const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
/// Knight L-offsets, shared with pseudo-move generation.
pub(crate) const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
/// King one-step offsets, shared with pseudo-move generation.
pub(crate) const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Returns true iff `square` would be attacked by a piece of color `by` in
/// the current position, i.e. some piece of `by` could legally (ignoring
/// pins, since an attacker is never pinned against its own king) capture on
/// `square` in one move.
#[must_use]
pub fn attacked_by(position: &Position, square: Square, by: Color) -> bool {
    debug_assert!(square.is_valid());
    debug_assert_ne!(by, Color::None);

    let file = i32::from(square.file() as u8);
    let rank = i32::from(square.rank() as u8);

    for &(df, dr) in &DIAGONAL_DIRECTIONS {
        if let Some(kind) = first_piece_on_ray(position, file, rank, df, dr, by) {
            if matches!(kind, PieceKind::Bishop | PieceKind::Queen) {
                return true;
            }
        }
    }
    for &(df, dr) in &ORTHOGONAL_DIRECTIONS {
        if let Some(kind) = first_piece_on_ray(position, file, rank, df, dr, by) {
            if matches!(kind, PieceKind::Rook | PieceKind::Queen) {
                return true;
            }
        }
    }
    for &(df, dr) in &KNIGHT_OFFSETS {
        if piece_at(position, file + df, rank + dr, by) == Some(PieceKind::Knight) {
            return true;
        }
    }
    for &(df, dr) in &KING_OFFSETS {
        if piece_at(position, file + df, rank + dr, by) == Some(PieceKind::King) {
            return true;
        }
    }
    // A pawn of color `by` attacks diagonally towards higher ranks if White,
    // towards lower ranks if Black; probe the two squares that such a pawn
    // would have to stand on to attack `square`.
    let pawn_rank_offset = match by {
        Color::White => -1,
        Color::Black => 1,
        Color::None => unreachable!(),
    };
    for df in [-1, 1] {
        if piece_at(position, file + df, rank + pawn_rank_offset, by) == Some(PieceKind::Pawn) {
            return true;
        }
    }
    false
}

fn piece_at(position: &Position, file: i32, rank: i32, owner: Color) -> Option<PieceKind> {
    let square = Square::from_coords(file, rank);
    if !square.is_valid() {
        return None;
    }
    let piece = position.at(square);
    if piece.color() == owner {
        Some(piece.kind())
    } else {
        None
    }
}

/// Walks outward from `(file, rank)` along `(df, dr)` until it runs off the
/// board or hits a piece. Returns the kind of the first piece of color `by`
/// found, if the ray is blocked by a piece of `by` before any other piece.
fn first_piece_on_ray(
    position: &Position,
    file: i32,
    rank: i32,
    df: i32,
    dr: i32,
    by: Color,
) -> Option<PieceKind> {
    let mut f = file + df;
    let mut r = rank + dr;
    loop {
        let square = Square::from_coords(f, r);
        if !square.is_valid() {
            return None;
        }
        let piece = position.at(square);
        if piece.is_some() {
            return if piece.color() == by {
                Some(piece.kind())
            } else {
                None
            };
        }
        f += df;
        r += dr;
    }
}
