//! Board primitives commonly used within [`crate::chess`].

use std::{fmt, mem};

use anyhow::bail;
use arrayvec::ArrayVec;
use bitflags::bitflags;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Maximum number of pseudo-legal moves any chess position can have. Used to
/// size [`MoveList`] so move generation never allocates.
pub const MAX_MOVES: usize = 218;

/// A fixed-capacity, stack-allocated list of moves, sized to the worst case
/// pseudo-legal move count of any reachable position.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// All eight files, in ascending order.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute::<u8, Self>(file as u8 - b'a') }),
            _ => bail!("unknown file: expected within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(column) }),
            _ => bail!("unknown file: expected within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Rank {
    /// All eight ranks, in ascending order.
    pub const ALL: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute::<u8, Self>(rank as u8 - b'1') }),
            _ => bail!("unknown rank: expected within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(row) }),
            _ => bail!("unknown rank: expected within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// Board squares: from left to right, from bottom to the top, followed by the
/// distinguished "no square" sentinel used for an absent en passant target.
///
/// ```
/// use tabia::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use tabia::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
    /// Sentinel value distinct from every square on the board. Used for an
    /// absent en passant target.
    NoSquare,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute::<u8, Self>(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Builds a square from (possibly out-of-range) file/rank coordinates,
    /// returning [`Square::NoSquare`] when either coordinate is off the
    /// board. Convenient for ray-walking and offset probing without manual
    /// bounds checks at every step.
    #[must_use]
    pub fn from_coords(file: i32, rank: i32) -> Self {
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return Self::NoSquare;
        }
        Self::new(
            File::try_from(file as u8).expect("file was range-checked above"),
            Rank::try_from(rank as u8).expect("rank was range-checked above"),
        )
    }

    /// Returns file (column) on which the square is located.
    ///
    /// # Panics
    ///
    /// Panics if called on [`Square::NoSquare`].
    #[must_use]
    pub fn file(self) -> File {
        debug_assert!(self.is_valid());
        unsafe { mem::transmute::<u8, File>(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    ///
    /// # Panics
    ///
    /// Panics if called on [`Square::NoSquare`].
    #[must_use]
    pub fn rank(self) -> Rank {
        debug_assert!(self.is_valid());
        unsafe { mem::transmute::<u8, Rank>(self as u8 / BOARD_WIDTH) }
    }

    /// False only for [`Square::NoSquare`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self as u8) < BOARD_SIZE
    }

    /// Index into a 64-element board array. Callers must check
    /// [`Square::is_valid`] first; [`Square::NoSquare`] has no board index.
    #[must_use]
    pub fn index(self) -> usize {
        debug_assert!(self.is_valid());
        self as usize
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute::<u8, Self>(square_index) }),
            _ => bail!("unknown square index: needs to be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        if square == "-" {
            return Ok(Self::NoSquare);
        }
        if square.bytes().len() != 2 {
            bail!(
                "unknown square: should be two-char, got {square} with {} chars",
                square.bytes().len()
            );
        }
        let (file, rank) = (
            *square.as_bytes().first().unwrap() as char,
            *square.as_bytes().get(1).unwrap() as char,
        );
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "-");
        }
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Side to move or side owning a piece. `None` is the zero value and is used
/// to represent the owner of an empty square.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Color {
    #[default]
    None,
    White,
    Black,
}

impl Color {
    /// The other side. Undefined (returns `None`) for `Color::None`.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
            Self::None => Self::None,
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("unknown side to move: expected 'w' or 'b', got '{color}'"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::White => 'w',
                Self::Black => 'b',
                Self::None => '-',
            }
        )
    }
}

/// Standard [chess pieces], plus the `None` sentinel used for an empty
/// square.
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum PieceKind {
    #[default]
    None,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// A piece kind a pawn can promote to, or `None` for the rest.
    #[must_use]
    pub const fn is_promotion_target(self) -> bool {
        matches!(self, Self::Knight | Self::Bishop | Self::Rook | Self::Queen)
    }
}

const PIECE_KIND_SHIFT: u8 = 2;
const PIECE_COLOR_MASK: u8 = 0b11;

/// A piece owned by a player, packed into a single byte: piece kind in the
/// high bits, color in the low bits, so that the zero value denotes an empty
/// square. Mirrors how a mailbox board packs a square's contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Piece(u8);

impl Piece {
    /// The zero value: no piece, used for empty squares.
    pub const NONE: Self = Self(0);

    /// Builds a piece from its kind and owner. Returns [`Piece::NONE`] if
    /// either is the `None` sentinel.
    #[must_use]
    pub fn new(color: Color, kind: PieceKind) -> Self {
        if color == Color::None || kind == PieceKind::None {
            return Self::NONE;
        }
        Self(((kind as u8) << PIECE_KIND_SHIFT) | (color as u8 & PIECE_COLOR_MASK))
    }

    /// Owning side, or [`Color::None`] for an empty square.
    #[must_use]
    pub fn color(self) -> Color {
        match self.0 & PIECE_COLOR_MASK {
            1 => Color::White,
            2 => Color::Black,
            _ => Color::None,
        }
    }

    /// Piece kind, or [`PieceKind::None`] for an empty square.
    #[must_use]
    pub fn kind(self) -> PieceKind {
        match self.0 >> PIECE_KIND_SHIFT {
            1 => PieceKind::Pawn,
            2 => PieceKind::Knight,
            3 => PieceKind::Bishop,
            4 => PieceKind::Rook,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => PieceKind::None,
        }
    }

    /// True for every value except [`Piece::NONE`].
    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// Algebraic notation symbol used in FEN. Uppercase for white, lowercase
    /// for black.
    #[must_use]
    pub fn algebraic_symbol(self) -> char {
        let result = match self.kind() {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
            PieceKind::None => return ' ',
        };
        match self.color() {
            Color::White => result.to_ascii_uppercase(),
            _ => result,
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("unknown piece symbol: expected within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.algebraic_symbol())
    }
}

/// Which side of the board a castle move or castling right refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

bitflags! {
    /// Tracks the ability to [castle] each side for both players (kingside is
    /// often referred to as O-O or OO, queenside -- O-O-O or OOO). When the
    /// king moves, a player loses the ability to castle both sides; when a
    /// rook moves (or is captured) on its home corner, the player loses the
    /// ability to castle that side.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CastleRights: u8 {
        /// White can castle kingside.
        const WHITE_KINGSIDE  = 0b0001;
        /// White can castle queenside.
        const WHITE_QUEENSIDE = 0b0010;
        /// Black can castle kingside.
        const BLACK_KINGSIDE  = 0b0100;
        /// Black can castle queenside.
        const BLACK_QUEENSIDE = 0b1000;
    }
}

impl CastleRights {
    /// The bit for a specific (color, side) pair.
    #[must_use]
    pub const fn for_side(color: Color, side: CastleSide) -> Self {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
            (Color::None, _) => Self::empty(),
        }
    }

    /// Both rights for a color.
    #[must_use]
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KINGSIDE.union(Self::WHITE_QUEENSIDE),
            Color::Black => Self::BLACK_KINGSIDE.union(Self::BLACK_QUEENSIDE),
            Color::None => Self::empty(),
        }
    }

    /// Parses the FEN castling rights field (`"-"` or a subset of `"KQkq"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the field contains anything outside `KQkq` or `-`.
    pub fn from_fen(field: &str) -> anyhow::Result<Self> {
        if field == "-" {
            return Ok(Self::empty());
        }
        let mut rights = Self::empty();
        for ch in field.chars() {
            rights |= match ch {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => bail!("unknown castling rights symbol '{ch}' in '{field}'"),
            };
        }
        Ok(rights)
    }

    /// Emits the FEN castling rights field in canonical `KQkq` order.
    #[must_use]
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut result = String::with_capacity(4);
        if self.contains(Self::WHITE_KINGSIDE) {
            result.push('K');
        }
        if self.contains(Self::WHITE_QUEENSIDE) {
            result.push('Q');
        }
        if self.contains(Self::BLACK_KINGSIDE) {
            result.push('k');
        }
        if self.contains(Self::BLACK_QUEENSIDE) {
            result.push('q');
        }
        result
    }
}

/// Promotion target a pawn move can carry. A strict subset of [`PieceKind`]:
/// a pawn can never promote to a pawn or a king.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Promotion {
    /// The four promotion targets, in the conventional N/B/R/Q generation
    /// order.
    pub const ALL: [Self; 4] = [Self::Knight, Self::Bishop, Self::Rook, Self::Queen];

    /// Corresponding [`PieceKind`].
    #[must_use]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            Self::Knight => PieceKind::Knight,
            Self::Bishop => PieceKind::Bishop,
            Self::Rook => PieceKind::Rook,
            Self::Queen => PieceKind::Queen,
        }
    }

    fn algebraic_symbol(self) -> char {
        match self {
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
        }
    }
}

/// Metadata attached to every generated move. `check` and `offers_draw` are
/// opaque to the engine: they exist for a SAN layer built on top of it and
/// are never inspected by move generation, make/unmake, or perft.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    /// Kind of the piece being moved. Never `None` for a move that came out
    /// of the generator.
    pub moves: PieceKind,
    /// Kind of the piece being captured, or `None`. Set to `Pawn` for en
    /// passant captures even though the captured pawn does not sit on the
    /// destination square.
    pub captures: PieceKind,
    /// Promotion target, if any.
    pub promotes: Option<Promotion>,
    /// Which side this move castles, if any.
    pub castle: Option<CastleSide>,
    /// True iff this move is a pawn capturing en passant.
    pub en_passant: bool,
    /// Set by a SAN layer; never produced or consulted by this crate.
    pub check: bool,
    /// Set by a SAN layer; never produced or consulted by this crate.
    pub offers_draw: bool,
}

/// A single chess move: origin square, destination square, and the flags
/// describing what kind of move it is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Move {
    /// Square the moving piece starts on.
    pub from: Square,
    /// Square the moving piece ends on. For castling this is the king's
    /// destination, not the rook's.
    pub to: Square,
    /// Metadata describing the move.
    pub flags: MoveFlags,
}

impl Move {
    /// Builds a regular (non-special) move.
    #[must_use]
    pub fn new(from: Square, to: Square, moves: PieceKind, captures: PieceKind) -> Self {
        Self {
            from,
            to,
            flags: MoveFlags {
                moves,
                captures,
                ..MoveFlags::default()
            },
        }
    }

    /// UCI-style long algebraic form: `e2e4`, `e7e8q`, castling as king
    /// moves (`e1g1`).
    #[must_use]
    pub fn to_uci(self) -> String {
        let mut result = format!("{}{}", self.from, self.to);
        if let Some(promotion) = self.flags.promotes {
            result.push(promotion.algebraic_symbol());
        }
        result
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod test {
    use std::mem::{size_of, size_of_val};

    use pretty_assertions::assert_eq;

    use super::{
        CastleRights, CastleSide, Color, File, Piece, PieceKind, Rank, Square, BOARD_SIZE,
        BOARD_WIDTH,
    };

    #[test]
    fn rank() {
        assert_eq!(
            ('1'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            vec![
                Rank::One,
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
            ]
        );
    }

    #[test]
    #[should_panic(expected = "unknown rank: expected within '1'..='8', got '9'")]
    fn rank_from_incorrect_char() {
        Rank::try_from('9').unwrap();
    }

    #[test]
    #[should_panic(expected = "unknown rank: expected within 0..BOARD_WIDTH, got 8")]
    fn rank_from_incorrect_index() {
        Rank::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            vec![
                File::A,
                File::B,
                File::C,
                File::D,
                File::E,
                File::F,
                File::G,
                File::H,
            ]
        );
    }

    #[test]
    #[should_panic(expected = "unknown file: expected within 'a'..='h', got 'i'")]
    fn file_from_incorrect_char() {
        File::try_from('i').unwrap();
    }

    #[test]
    fn square_roundtrip() {
        for square_index in 0..BOARD_SIZE {
            let square = Square::try_from(square_index).unwrap();
            assert_eq!(square as u8, square_index);
            assert_eq!(Square::new(square.file(), square.rank()), square);
        }
    }

    #[test]
    fn square_from_str() {
        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert_eq!(Square::try_from("-").unwrap(), Square::NoSquare);
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a9").is_err());
    }

    #[test]
    #[should_panic(expected = "unknown square index: needs to be in 0..BOARD_SIZE, got 64")]
    fn square_from_incorrect_index() {
        Square::try_from(BOARD_SIZE).unwrap();
    }

    #[test]
    fn no_square_is_invalid() {
        assert!(!Square::NoSquare.is_valid());
        assert!(Square::A1.is_valid());
    }

    #[test]
    fn from_coords_out_of_range() {
        assert_eq!(Square::from_coords(-1, 4), Square::NoSquare);
        assert_eq!(Square::from_coords(4, 8), Square::NoSquare);
        assert_eq!(Square::from_coords(3, 3), Square::D4);
    }

    #[test]
    fn primitive_size() {
        assert_eq!(size_of::<Square>(), 1);
        assert_eq!(size_of::<Piece>(), 1);
        let squares: [Piece; BOARD_SIZE as usize] = [Piece::NONE; BOARD_SIZE as usize];
        assert_eq!(size_of_val(&squares), BOARD_SIZE as usize);
    }

    #[test]
    fn piece_roundtrip() {
        for symbol in "KQRBNPkqrbnp".chars() {
            let piece = Piece::try_from(symbol).unwrap();
            assert_eq!(piece.algebraic_symbol(), symbol);
        }
        assert_eq!(Piece::NONE.kind(), PieceKind::None);
        assert_eq!(Piece::NONE.color(), Color::None);
        assert!(!Piece::NONE.is_some());
        assert!(Piece::try_from('K').unwrap().is_some());
    }

    #[test]
    fn castle_rights_fen() {
        assert_eq!(CastleRights::from_fen("-").unwrap(), CastleRights::empty());
        assert_eq!(
            CastleRights::from_fen("KQkq").unwrap(),
            CastleRights::all()
        );
        assert_eq!(CastleRights::empty().to_fen(), "-");
        assert_eq!(CastleRights::all().to_fen(), "KQkq");
        assert_eq!(
            CastleRights::for_side(Color::White, CastleSide::Kingside).to_fen(),
            "K"
        );
        assert!(CastleRights::from_fen("x").is_err());
    }

    #[test]
    fn color_flip() {
        assert_eq!(Color::White.flip(), Color::Black);
        assert_eq!(Color::Black.flip(), Color::White);
    }
}
