//! Provides fully-specified [Chess Position] implementation: stores
//! information about the board and tracks the state of castling, en passant
//! and the 50-move rule counters.
//!
//! The move generator, attack-based legality filter, and make/unmake pair
//! live here too: they are the primary way of mutating [`Position`].
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt;

use anyhow::{bail, Context};

use crate::chess::attacks::{self, DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS};
use crate::chess::core::{
    CastleRights, CastleSide, Color, File, Move, MoveList, Piece, PieceKind, Promotion, Square,
    BOARD_SIZE,
};

/// Square-centric (mailbox) implementation of a chess position: a 64-entry
/// piece array plus the side to move, castling rights, en passant target and
/// move-clock bookkeeping.
///
/// This board does not validate, on construction, that it is reachable from
/// the starting position: [`Position::from_fen`] only rejects input that is
/// not well-formed FEN. Game-level semantics like threefold repetition and
/// insufficient material are outside this crate's scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    squares: [Piece; BOARD_SIZE as usize],
    side_to_move: Color,
    castle_rights: CastleRights,
    en_passant_target: Square,
    halfmove_clock: u8,
    fullmove_counter: u16,
    history: Vec<UndoFrame>,
}

/// Everything needed to reverse [`Position::make_move`] exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct UndoFrame {
    mv: Move,
    castle_rights: CastleRights,
    en_passant_target: Square,
    halfmove_clock: u8,
    captured: Piece,
}

/// Reserve capacity for this many plies before the undo stack has to grow;
/// comfortably above any game length perft or search will walk in practice.
const HISTORY_CAPACITY: usize = 128;

impl Position {
    /// The conventional initial position: all pieces on their home squares,
    /// White to move, full castling rights, no en passant target.
    #[must_use]
    pub fn starting() -> Self {
        Self::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("starting position FEN is well-formed")
    }

    /// Parses a position from its [FEN] representation.
    ///
    /// # Errors
    ///
    /// Returns an error if `fen` does not have exactly six whitespace
    /// separated fields or if any field violates its grammar (see
    /// module-level documentation and the FEN field descriptions below).
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(fen: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = fen.split_ascii_whitespace().collect();
        let &[placement, side_to_move, castling, en_passant, halfmove, fullmove] =
            fields.as_slice()
        else {
            bail!(
                "FEN should have exactly 6 fields, got {} in '{fen}'",
                fields.len()
            );
        };

        let squares = parse_placement(placement)?;
        let side_to_move = Color::try_from(side_to_move)?;
        let castle_rights = CastleRights::from_fen(castling)?;
        let en_passant_target = parse_en_passant(en_passant)?;
        let halfmove_clock: u8 = halfmove
            .parse()
            .context("halfmove clock should be a non-negative integer")?;
        if halfmove_clock > 50 {
            bail!("halfmove clock should be <= 50, got {halfmove_clock}");
        }
        let fullmove_counter: u16 = fullmove
            .parse()
            .context("fullmove counter should be a positive integer")?;
        if fullmove_counter == 0 {
            bail!("fullmove counter should be >= 1, got 0");
        }

        Ok(Self {
            squares,
            side_to_move,
            castle_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_counter,
            history: Vec::with_capacity(HISTORY_CAPACITY),
        })
    }

    /// Serializes the position to its [FEN] representation.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    #[must_use]
    pub fn to_fen(&self) -> String {
        self.to_string()
    }

    /// The piece on `square`, or [`Piece::NONE`] for an empty square.
    #[must_use]
    pub fn at(&self, square: Square) -> Piece {
        if !square.is_valid() {
            return Piece::NONE;
        }
        self.squares[square.index()]
    }

    /// The side to move.
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Current castling rights.
    #[must_use]
    pub const fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    /// The en passant target square, or [`Square::NoSquare`] if the previous
    /// move was not a pawn double push.
    #[must_use]
    pub const fn en_passant_target(&self) -> Square {
        self.en_passant_target
    }

    /// Plies since the last pawn move or capture.
    #[must_use]
    pub const fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }

    /// Number of full moves played, starting at 1 and incrementing after
    /// Black's move.
    #[must_use]
    pub const fn fullmove_counter(&self) -> u16 {
        self.fullmove_counter
    }

    fn king_square(&self, color: Color) -> Square {
        self.squares
            .iter()
            .position(|&piece| piece.color() == color && piece.kind() == PieceKind::King)
            .map_or(Square::NoSquare, |index| {
                Square::try_from(index as u8).expect("board index is always a valid square")
            })
    }

    /// Generates every pseudo-legal move for the side to move: obeying piece
    /// movement and occupancy rules, but not yet filtered for king safety.
    #[must_use]
    pub fn pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.side_to_move;
        for index in 0..BOARD_SIZE {
            let from = Square::try_from(index).expect("index is within board range");
            let piece = self.at(from);
            if piece.color() != us {
                continue;
            }
            match piece.kind() {
                PieceKind::Pawn => self.generate_pawn_moves(from, &mut moves),
                PieceKind::Knight => {
                    self.generate_offset_moves(from, &KNIGHT_OFFSETS, PieceKind::Knight, &mut moves);
                },
                PieceKind::Bishop => {
                    self.generate_sliding_moves(from, &DIAGONAL_DIRECTIONS, PieceKind::Bishop, &mut moves);
                },
                PieceKind::Rook => {
                    self.generate_sliding_moves(from, &ORTHOGONAL_DIRECTIONS, PieceKind::Rook, &mut moves);
                },
                PieceKind::Queen => {
                    self.generate_sliding_moves(from, &DIAGONAL_DIRECTIONS, PieceKind::Queen, &mut moves);
                    self.generate_sliding_moves(from, &ORTHOGONAL_DIRECTIONS, PieceKind::Queen, &mut moves);
                },
                PieceKind::King => {
                    self.generate_offset_moves(from, &KING_OFFSETS, PieceKind::King, &mut moves);
                    self.generate_castles(from, &mut moves);
                },
                PieceKind::None => unreachable!("square occupied by `us` always holds a piece"),
            }
        }
        moves
    }

    fn generate_offset_moves(
        &self,
        from: Square,
        offsets: &[(i32, i32)],
        kind: PieceKind,
        moves: &mut MoveList,
    ) {
        let file = i32::from(from.file() as u8);
        let rank = i32::from(from.rank() as u8);
        for &(df, dr) in offsets {
            let to = Square::from_coords(file + df, rank + dr);
            if !to.is_valid() {
                continue;
            }
            let target = self.at(to);
            if target.color() != self.side_to_move {
                moves.push(Move::new(from, to, kind, target.kind()));
            }
        }
    }

    fn generate_sliding_moves(
        &self,
        from: Square,
        directions: &[(i32, i32)],
        kind: PieceKind,
        moves: &mut MoveList,
    ) {
        let file = i32::from(from.file() as u8);
        let rank = i32::from(from.rank() as u8);
        for &(df, dr) in directions {
            let mut f = file + df;
            let mut r = rank + dr;
            loop {
                let to = Square::from_coords(f, r);
                if !to.is_valid() {
                    break;
                }
                let target = self.at(to);
                if target.color() == self.side_to_move {
                    break;
                }
                moves.push(Move::new(from, to, kind, target.kind()));
                if target.is_some() {
                    break;
                }
                f += df;
                r += dr;
            }
        }
    }

    fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move;
        let direction: i32 = if us == Color::White { 1 } else { -1 };
        let home_rank: i32 = if us == Color::White { 1 } else { 6 };
        let promotion_rank: i32 = if us == Color::White { 7 } else { 0 };
        let file = i32::from(from.file() as u8);
        let rank = i32::from(from.rank() as u8);

        let push_to = Square::from_coords(file, rank + direction);
        let single_push_empty = push_to.is_valid() && !self.at(push_to).is_some();
        if single_push_empty {
            push_pawn_move(moves, from, push_to, PieceKind::None, rank + direction == promotion_rank);
            if rank == home_rank {
                let double_to = Square::from_coords(file, rank + 2 * direction);
                if double_to.is_valid() && !self.at(double_to).is_some() {
                    moves.push(Move::new(from, double_to, PieceKind::Pawn, PieceKind::None));
                }
            }
        }

        for df in [-1, 1] {
            let to = Square::from_coords(file + df, rank + direction);
            if !to.is_valid() {
                continue;
            }
            let target = self.at(to);
            if target.color() == us.flip() {
                push_pawn_move(moves, from, to, target.kind(), rank + direction == promotion_rank);
            } else if to == self.en_passant_target {
                let mut mv = Move::new(from, to, PieceKind::Pawn, PieceKind::Pawn);
                mv.flags.en_passant = true;
                moves.push(mv);
            }
        }
    }

    fn generate_castles(&self, from: Square, moves: &mut MoveList) {
        let us = self.side_to_move;
        let rank: i32 = if us == Color::White { 0 } else { 7 };
        if i32::from(from.rank() as u8) != rank || from.file() != File::E {
            return;
        }
        if self.castle_rights.contains(CastleRights::for_side(us, CastleSide::Kingside))
            && !self.at(Square::from_coords(5, rank)).is_some()
            && !self.at(Square::from_coords(6, rank)).is_some()
        {
            let mut mv = Move::new(from, Square::from_coords(6, rank), PieceKind::King, PieceKind::None);
            mv.flags.castle = Some(CastleSide::Kingside);
            moves.push(mv);
        }
        if self.castle_rights.contains(CastleRights::for_side(us, CastleSide::Queenside))
            && !self.at(Square::from_coords(3, rank)).is_some()
            && !self.at(Square::from_coords(2, rank)).is_some()
            && !self.at(Square::from_coords(1, rank)).is_some()
        {
            let mut mv = Move::new(from, Square::from_coords(2, rank), PieceKind::King, PieceKind::None);
            mv.flags.castle = Some(CastleSide::Queenside);
            moves.push(mv);
        }
    }

    /// Generates every legal move for the side to move: pseudo-legal moves
    /// filtered by the make/probe/unmake king-safety test, with castling
    /// moves additionally checked for a king in check or transiting through
    /// an attacked square.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut working = self.clone();
        let us = working.side_to_move;
        let them = us.flip();
        let mut legal = MoveList::new();
        for mv in working.pseudo_moves() {
            if let Some(side) = mv.flags.castle {
                if working.attacked_by_opponent(working.king_square(us), them) {
                    continue;
                }
                let rank = mv.from.rank();
                let transit_file = match side {
                    CastleSide::Kingside => File::F,
                    CastleSide::Queenside => File::D,
                };
                let transit = Square::new(transit_file, rank);
                let step = Move::new(mv.from, transit, PieceKind::King, PieceKind::None);
                working.make_move_unchecked(&step);
                let blocked = working.attacked_by_opponent(transit, them);
                working.unmake_move_unchecked();
                if blocked {
                    continue;
                }
            }
            working.make_move_unchecked(&mv);
            let king_square = working.king_square(us);
            let illegal = working.attacked_by_opponent(king_square, them);
            working.unmake_move_unchecked();
            if !illegal {
                legal.push(mv);
            }
        }
        legal
    }

    fn attacked_by_opponent(&self, square: Square, by: Color) -> bool {
        attacks::attacked_by(self, square, by)
    }

    /// Applies `mv` to the position, pushing an undo frame.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is empty, if the piece there does not
    /// match `mv.flags.moves`, or if the move is otherwise structurally
    /// inconsistent (e.g. a promotion flag on a non-final-rank destination).
    /// On error the position is left unchanged.
    pub fn make_move(&mut self, mv: &Move) -> anyhow::Result<()> {
        let moving = self.at(mv.from);
        if !moving.is_some() {
            bail!("illegal move {mv}: no piece on {}", mv.from);
        }
        if moving.kind() != mv.flags.moves {
            bail!(
                "illegal move {mv}: {} on {} is not a {:?}",
                moving,
                mv.from,
                mv.flags.moves
            );
        }
        if moving.color() != self.side_to_move {
            bail!("illegal move {mv}: it is {:?} to move", self.side_to_move);
        }
        let promotion_rank = if moving.color() == Color::White { 7 } else { 0 };
        let reaches_promotion_rank =
            moving.kind() == PieceKind::Pawn && i32::from(mv.to.rank() as u8) == promotion_rank;
        if let Some(promotion) = mv.flags.promotes {
            if !reaches_promotion_rank {
                bail!("illegal move {mv}: promotes to {:?} from a non-promoting move", promotion);
            }
        } else if reaches_promotion_rank {
            bail!("illegal move {mv}: pawn reaches the final rank without a promotion");
        }
        if let Some(side) = mv.flags.castle {
            if !self.castle_rights.contains(CastleRights::for_side(self.side_to_move, side)) {
                bail!("illegal move {mv}: castling right for {side:?} is not available");
            }
        }
        if mv.flags.en_passant && mv.to != self.en_passant_target {
            bail!(
                "illegal move {mv}: en passant target is {}, not {}",
                self.en_passant_target,
                mv.to
            );
        }
        self.make_move_unchecked(mv);
        Ok(())
    }

    fn make_move_unchecked(&mut self, mv: &Move) {
        let us = self.side_to_move;
        let mut moving = self.at(mv.from);
        let captured = self.at(mv.to);

        self.history.push(UndoFrame {
            mv: *mv,
            castle_rights: self.castle_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            captured,
        });

        if let Some(promotion) = mv.flags.promotes {
            moving = Piece::new(us, promotion.piece_kind());
        }

        self.squares[mv.from.index()] = Piece::NONE;
        self.squares[mv.to.index()] = moving;

        if let Some(side) = mv.flags.castle {
            let rank = mv.from.rank();
            let (rook_from_file, rook_to_file) = match side {
                CastleSide::Kingside => (File::H, File::F),
                CastleSide::Queenside => (File::A, File::D),
            };
            let rook_from = Square::new(rook_from_file, rank);
            let rook_to = Square::new(rook_to_file, rank);
            self.squares[rook_to.index()] = self.squares[rook_from.index()];
            self.squares[rook_from.index()] = Piece::NONE;
        }

        if mv.flags.en_passant {
            let captured_pawn = Square::new(mv.to.file(), mv.from.rank());
            self.squares[captured_pawn.index()] = Piece::NONE;
        }

        self.en_passant_target = Square::NoSquare;
        if moving.kind() == PieceKind::Pawn
            && (i32::from(mv.to.rank() as u8) - i32::from(mv.from.rank() as u8)).abs() == 2
        {
            let ep_rank = (i32::from(mv.from.rank() as u8) + i32::from(mv.to.rank() as u8)) / 2;
            self.en_passant_target =
                Square::from_coords(i32::from(mv.from.file() as u8), ep_rank);
        }

        if moving.kind() == PieceKind::King {
            self.castle_rights.remove(CastleRights::for_color(us));
        }
        for (square, right) in [
            (Square::A1, CastleRights::WHITE_QUEENSIDE),
            (Square::H1, CastleRights::WHITE_KINGSIDE),
            (Square::A8, CastleRights::BLACK_QUEENSIDE),
            (Square::H8, CastleRights::BLACK_KINGSIDE),
        ] {
            if mv.from == square || mv.to == square {
                self.castle_rights.remove(right);
            }
        }

        self.halfmove_clock = if moving.kind() == PieceKind::Pawn
            || mv.flags.captures != PieceKind::None
            || mv.flags.en_passant
        {
            0
        } else {
            self.halfmove_clock + 1
        };

        self.side_to_move = us.flip();
        if us == Color::Black {
            self.fullmove_counter += 1;
        }
    }

    /// Reverses the most recent [`Position::make_move`].
    ///
    /// # Errors
    ///
    /// Returns an error if there is no move to undo.
    pub fn unmake_move(&mut self) -> anyhow::Result<()> {
        if self.history.is_empty() {
            bail!("nothing to undo");
        }
        self.unmake_move_unchecked();
        Ok(())
    }

    fn unmake_move_unchecked(&mut self) {
        let frame = self.history.pop().expect("checked non-empty by caller");
        let mv = frame.mv;

        self.side_to_move = self.side_to_move.flip();
        if self.side_to_move == Color::Black {
            self.fullmove_counter -= 1;
        }
        let us = self.side_to_move;

        let moved_piece = if mv.flags.promotes.is_some() {
            Piece::new(us, PieceKind::Pawn)
        } else {
            self.squares[mv.to.index()]
        };
        self.squares[mv.from.index()] = moved_piece;
        self.squares[mv.to.index()] = frame.captured;

        if let Some(side) = mv.flags.castle {
            let rank = mv.from.rank();
            let (rook_from_file, rook_to_file) = match side {
                CastleSide::Kingside => (File::H, File::F),
                CastleSide::Queenside => (File::A, File::D),
            };
            let rook_from = Square::new(rook_from_file, rank);
            let rook_to = Square::new(rook_to_file, rank);
            self.squares[rook_from.index()] = self.squares[rook_to.index()];
            self.squares[rook_to.index()] = Piece::NONE;
        }

        if mv.flags.en_passant {
            self.squares[mv.to.index()] = Piece::NONE;
            let captured_square = Square::new(mv.to.file(), mv.from.rank());
            self.squares[captured_square.index()] = Piece::new(us.flip(), PieceKind::Pawn);
        }

        self.castle_rights = frame.castle_rights;
        self.en_passant_target = frame.en_passant_target;
        self.halfmove_clock = frame.halfmove_clock;
    }
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, captures: PieceKind, promotes: bool) {
    if promotes {
        for promotion in Promotion::ALL {
            let mut mv = Move::new(from, to, PieceKind::Pawn, captures);
            mv.flags.promotes = Some(promotion);
            moves.push(mv);
        }
    } else {
        moves.push(Move::new(from, to, PieceKind::Pawn, captures));
    }
}

fn parse_placement(placement: &str) -> anyhow::Result<[Piece; BOARD_SIZE as usize]> {
    let mut squares = [Piece::NONE; BOARD_SIZE as usize];
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        bail!("piece placement should have 8 ranks, got {}", rows.len());
    }
    for (rank_from_top, row) in rows.iter().enumerate() {
        let rank = 7 - rank_from_top;
        let mut file = 0usize;
        for ch in row.chars() {
            if let Some(digit) = ch.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    bail!("rank run-length should be within 1..=8, got {digit} in '{row}'");
                }
                file += digit as usize;
            } else {
                let piece = Piece::try_from(ch)
                    .with_context(|| format!("invalid piece placement rank '{row}'"))?;
                if file >= 8 {
                    bail!("rank '{row}' has more than 8 files");
                }
                squares[rank * 8 + file] = piece;
                file += 1;
            }
        }
        if file != 8 {
            bail!("rank '{row}' does not sum to 8 files, got {file}");
        }
    }
    Ok(squares)
}

fn parse_en_passant(field: &str) -> anyhow::Result<Square> {
    if field == "-" {
        return Ok(Square::NoSquare);
    }
    let square = Square::try_from(field)?;
    let rank = square.rank() as u8;
    if rank != 2 && rank != 5 {
        bail!("en passant target should be on rank 3 or 6, got '{field}'");
    }
    Ok(square)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank_from_top in 0..8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0;
            for file in 0..8 {
                let piece = self.squares[rank * 8 + file];
                if piece.is_some() {
                    if empty_run > 0 {
                        write!(f, "{empty_run}")?;
                        empty_run = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_run += 1;
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank_from_top != 7 {
                write!(f, "/")?;
            }
        }
        write!(
            f,
            " {} {} {} {} {}",
            self.side_to_move,
            self.castle_rights.to_fen(),
            self.en_passant_target,
            self.halfmove_clock,
            self.fullmove_counter
        )
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    fn try_from(fen: &str) -> anyhow::Result<Self> {
        Self::from_fen(fen)
    }
}

/// Recursively counts the leaf nodes reachable by playing every legal move
/// to `depth` plies. `depth == 0` returns 1 regardless of position.
#[must_use]
pub fn perft(position: &Position, depth: u32) -> u64 {
    count_moves(position, depth).0
}

fn perft_impl(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        position.make_move_unchecked(&mv);
        nodes += perft_impl(position, depth - 1);
        position.unmake_move_unchecked();
    }
    nodes
}

/// Index into [`count_moves`]'s breakdown array for ordinary captures
/// (excluding en passant, which is tallied separately so the two categories
/// never overlap).
const BREAKDOWN_CAPTURES: usize = 0;
/// Breakdown index for en-passant captures.
const BREAKDOWN_EN_PASSANT: usize = 1;
/// Breakdown index for castles.
const BREAKDOWN_CASTLES: usize = 2;
/// Breakdown index for promotions.
const BREAKDOWN_PROMOTIONS: usize = 3;

/// Recursively counts the leaf nodes reachable to `depth` plies, alongside an
/// 8-slot category breakdown of every move played at every ply along the way
/// (not only moves on the final ply): index 0 counts captures excluding en
/// passant, 1 counts en-passant captures, 2 counts castles, 3 counts
/// promotions; 4..8 are reserved and always zero. `depth == 0` returns
/// `(1, [0; 8])`.
#[must_use]
pub fn count_moves(position: &Position, depth: u32) -> (u64, [u64; 8]) {
    let mut position = position.clone();
    count_moves_impl(&mut position, depth)
}

fn count_moves_impl(position: &mut Position, depth: u32) -> (u64, [u64; 8]) {
    if depth == 0 {
        return (1, [0; 8]);
    }
    let moves = position.generate_moves();
    let mut leaves = 0;
    let mut breakdown = [0; 8];
    for mv in moves {
        if mv.flags.captures != PieceKind::None && !mv.flags.en_passant {
            breakdown[BREAKDOWN_CAPTURES] += 1;
        }
        if mv.flags.en_passant {
            breakdown[BREAKDOWN_EN_PASSANT] += 1;
        }
        if mv.flags.castle.is_some() {
            breakdown[BREAKDOWN_CASTLES] += 1;
        }
        if mv.flags.promotes.is_some() {
            breakdown[BREAKDOWN_PROMOTIONS] += 1;
        }
        position.make_move_unchecked(&mv);
        let (sub_leaves, sub_breakdown) = count_moves_impl(position, depth - 1);
        leaves += sub_leaves;
        for (total, sub) in breakdown.iter_mut().zip(sub_breakdown) {
            *total += sub;
        }
        position.unmake_move_unchecked();
    }
    (leaves, breakdown)
}

/// Per-root-move leaf counts at `depth - 1`, the conventional debugging tool
/// for localizing a move generator discrepancy against a reference
/// implementation: compare `divide` output move-by-move instead of only the
/// aggregate [`perft`] count.
#[must_use]
pub fn divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    let mut position = position.clone();
    let moves = position.generate_moves();
    moves
        .into_iter()
        .map(|mv| {
            position.make_move_unchecked(&mv);
            let nodes = if depth == 0 {
                1
            } else {
                perft_impl(&mut position, depth - 1)
            };
            position.unmake_move_unchecked();
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{count_moves, divide, perft, Position};
    use crate::chess::core::{Move, Square};

    #[test]
    fn starting_position_fen_roundtrip() {
        let position = Position::starting();
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn fen_roundtrip() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
        assert!(Position::from_fen("not a fen at all").is_err());
        assert!(Position::from_fen(
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        )
        .is_err());
        assert!(Position::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"
        )
        .is_err());
        assert!(Position::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1"
        )
        .is_err());
        assert!(Position::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 51 1"
        )
        .is_err());
    }

    fn get_moves(position: &mut Position) -> Vec<String> {
        let mut moves: Vec<String> = position.generate_moves().iter().map(Move::to_string).collect();
        moves.sort();
        moves
    }

    #[test]
    fn starting_move_count() {
        let mut position = Position::starting();
        assert_eq!(get_moves(&mut position).len(), 20);
    }

    #[test]
    fn make_unmake_restores_state() {
        let mut position = Position::starting();
        let before = position.clone();
        let mv = position.generate_moves()[0];
        position.make_move(&mv).unwrap();
        position.unmake_move().unwrap();
        assert_eq!(position, before);
    }

    #[test]
    fn unmake_with_empty_history_errors() {
        let mut position = Position::starting();
        assert!(position.unmake_move().is_err());
    }

    #[test]
    fn castling_rook_relocates() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let kingside = *position
            .generate_moves()
            .iter()
            .find(|m| m.to_uci() == "e1g1")
            .expect("kingside castle should be legal");
        position.make_move(&kingside).unwrap();
        assert_eq!(
            position.to_fen(),
            "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1"
        );
        position.unmake_move().unwrap();
        assert_eq!(
            position.to_fen(),
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
        );
    }

    #[test]
    fn en_passant_removes_victim_pawn() {
        let mut position = Position::starting();
        for uci in ["e2e4", "a7a6", "e4e5", "f7f5"] {
            let mv = *position
                .generate_moves()
                .iter()
                .find(|m| m.to_uci() == uci)
                .unwrap();
            position.make_move(&mv).unwrap();
        }
        let ep_capture = *position
            .generate_moves()
            .iter()
            .find(|m| m.to_uci() == "e5f6")
            .expect("en passant capture should be legal");
        assert!(ep_capture.flags.en_passant);
        position.make_move(&ep_capture).unwrap();
        assert!(!position.at(Square::F5).is_some());
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/1pppp1pp/p4P2/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );
    }

    #[test]
    fn perft_starting_position() {
        let position = Position::starting();
        assert_eq!(perft(&position, 0), 1);
        assert_eq!(perft(&position, 1), 20);
        assert_eq!(perft(&position, 2), 400);
        assert_eq!(perft(&position, 3), 8902);
    }

    #[test]
    fn perft_kiwipete() {
        let position =
            Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        assert_eq!(perft(&position, 1), 48);
        assert_eq!(perft(&position, 2), 2039);
    }

    #[test]
    fn perft_endgame() {
        let position = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&position, 1), 14);
        assert_eq!(perft(&position, 2), 191);
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = Position::starting();
        let breakdown = divide(&position, 2);
        let total: u64 = breakdown.iter().map(|(_, nodes)| nodes).sum();
        assert_eq!(total, perft(&position, 3));
    }

    #[test]
    fn count_moves_zero_depth_is_one_leaf_no_breakdown() {
        let position = Position::starting();
        assert_eq!(count_moves(&position, 0), (1, [0; 8]));
    }

    #[test]
    fn count_moves_matches_perft_starting_position() {
        let position = Position::starting();
        let (leaves, breakdown) = count_moves(&position, 3);
        assert_eq!(leaves, perft(&position, 3));
        assert_eq!(breakdown, [34, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn count_moves_breakdown_kiwipete() {
        let position =
            Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        let (leaves, breakdown) = count_moves(&position, 2);
        assert_eq!(leaves, 2039);
        assert_eq!(breakdown, [351, 1, 91, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn count_moves_breakdown_endgame() {
        let position = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        let (leaves, breakdown) = count_moves(&position, 2);
        assert_eq!(leaves, 191);
        assert_eq!(breakdown, [14, 0, 0, 0, 0, 0, 0, 0]);
    }
}
