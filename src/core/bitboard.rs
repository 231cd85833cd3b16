//! A fixed-size occupancy bitboard using const generics.
//!
//! Boards are represented as an `N×N` grid packed row-major into an unsigned
//! integer `T`; bit `y * N + x` is the cell in column `x`, row `y`. The type
//! is `no_std` friendly and avoids heap allocations. It backs ship footprints
//! and fleet occupancy, where overlap and no-touch checks become a couple of
//! mask operations.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use super::config::BOARD_SIZE;

/// Occupancy board sized for the standard 10×10 grid.
pub type FleetMask = BitBoard<u128, BOARD_SIZE>;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Requested board size N*N exceeds capacity of `T::BITS`.
    SizeTooLarge { n: usize, capacity: usize },
    /// Column or row index is out of bounds [0..N).
    IndexOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeTooLarge { n, capacity } => {
                write!(f, "SizeTooLarge: N*N={} exceeds T::BITS={}", n * n, capacity)
            }
            BitBoardError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

/// A fixed-size N×N bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const BOARD_BITS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    fn column_mask(x: usize) -> T {
        let mut col = T::zero();
        for y in 0..N {
            col = col | (T::one() << (y * N + x));
        }
        col
    }

    /// Create a new empty bitboard without a size check.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Fallible constructor: returns `Err(SizeTooLarge)` if N*N > T::BITS.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = mem::size_of::<T>() * 8;
        if Self::BOARD_BITS > capacity {
            Err(BitBoardError::SizeTooLarge { n: N, capacity })
        } else {
            Ok(BitBoard { bits: T::zero() })
        }
    }

    /// Number of occupied cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Returns `true` if the two boards share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.bits & other.bits).is_zero()
    }

    /// Gets the bit at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<bool, BitBoardError> {
        self.check_bounds(x, y)?;
        Ok(((self.bits >> (y * N + x)) & T::one()) != T::zero())
    }

    /// Sets the bit at (x, y).
    pub fn set(&mut self, x: usize, y: usize) -> Result<(), BitBoardError> {
        self.check_bounds(x, y)?;
        self.bits = self.bits | (T::one() << (y * N + x));
        Ok(())
    }

    /// Clears the bit at (x, y).
    pub fn clear(&mut self, x: usize, y: usize) -> Result<(), BitBoardError> {
        self.check_bounds(x, y)?;
        self.bits = self.bits & !(T::one() << (y * N + x));
        Ok(())
    }

    #[inline]
    fn check_bounds(&self, x: usize, y: usize) -> Result<(), BitBoardError> {
        if x >= N || y >= N {
            Err(BitBoardError::IndexOutOfBounds { x, y })
        } else {
            Ok(())
        }
    }

    /// Creates a bitboard from the raw integer, masking out upper bits.
    #[inline]
    pub fn from_raw(raw: T) -> Self {
        BitBoard {
            bits: raw & Self::mask(),
        }
    }

    /// Creates a bitboard from an iterator over `(x, y)` positions.
    pub fn from_cells<I>(iter: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut board = Self::new();
        for (x, y) in iter {
            board.set(x, y)?;
        }
        Ok(board)
    }

    /// Cells orthogonally adjacent to any set cell, excluding the set cells
    /// themselves. Row wrap-around is masked out.
    pub fn orthogonal_halo(&self) -> Self {
        let bits = self.bits;
        let first_col = Self::column_mask(0);
        let last_col = Self::column_mask(N - 1);
        let vertical = (bits << N) | (bits >> N);
        let horizontal = ((bits & !last_col) << 1) | ((bits & !first_col) >> 1);
        Self::from_raw((vertical | horizontal) & !bits)
    }

    /// Iterator over the set cells as `(x, y)`, row-major.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T, N> {
        SetBits {
            board: self,
            idx: 0,
        }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", N)?;
        fmt::Display::fmt(self, f)?;
        writeln!(f)
    }
}

impl<T, const N: usize> fmt::Display for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let bit = if ((self.bits >> (y * N + x)) & T::one()) != T::zero() {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if y + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set bits of a bitboard.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T, N>,
    idx: usize,
}

impl<'a, T, const N: usize> Iterator for SetBits<'a, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some((idx % N, idx / N));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

/// Bitwise NOT, restricted to the board cells.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self::from_raw(!self.bits)
    }
}

impl<T, const N: usize> BitAndAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits = self.bits & rhs.bits;
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}
