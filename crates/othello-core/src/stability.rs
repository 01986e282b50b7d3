//! Stable disc detection.
//!
//! A disc is stable when no sequence of moves can flip it. Detection is
//! conservative: every disc reported is stable, but not every stable disc is
//! found. Edges come from a precomputed table of all 8-cell edge configurations;
//! interior discs are stable when each of their four lines is either full or
//! anchored by a stable neighbour.

use std::sync::OnceLock;

use crate::bitboard::{Bitboard, shift};
use crate::board::Board;
use crate::constants::SCORE_MAX;
use crate::types::Score;

/// Interior squares (everything but the outer ring).
const INTERIOR_MASK: u64 = 0x007e7e7e7e7e7e00;

const RANK_1: u64 = 0x0000_0000_0000_00ff;
const FILE_A: u64 = 0x0101_0101_0101_0101;

/// Lookup tables shared by all stability queries.
struct StabilityTables {
    /// Stable discs for the player on a single edge, indexed by `player * 256 + opponent`.
    edge: Box<[u8]>,
    /// Masks of the 15 diagonals running A1-H8.
    diagonals: Vec<u64>,
    /// Masks of the 15 diagonals running A8-H1.
    anti_diagonals: Vec<u64>,
}

static TABLES: OnceLock<StabilityTables> = OnceLock::new();

fn tables() -> &'static StabilityTables {
    TABLES.get_or_init(|| StabilityTables {
        edge: build_edge_table(),
        diagonals: line_masks(|file, rank| file + 7 - rank),
        anti_diagonals: line_masks(|file, rank| file + rank),
    })
}

/// Forces the lookup tables to be built. Optional: the first query builds them lazily.
pub fn init() {
    let _ = tables();
}

/// Groups the 64 squares into 15 lines by `key(file, rank)`.
fn line_masks(key: impl Fn(usize, usize) -> usize) -> Vec<u64> {
    let mut masks = vec![0u64; 15];
    for sq in 0..64 {
        masks[key(sq % 8, sq / 8)] |= 1 << sq;
    }
    masks
}

/// Places a disc for `me` at cell `x` of an edge and flips what it brackets.
///
/// # Returns
///
/// The `(me, other)` edge configuration after the move.
fn play_edge(me: u32, other: u32, x: i32) -> (u32, u32) {
    let mut me = me | (1 << x);
    let mut other = other;
    for step in [-1, 1] {
        let mut y = x + step;
        let mut run = 0;
        while (0..8).contains(&y) && (other >> y) & 1 != 0 {
            run |= 1 << y;
            y += step;
        }
        if (0..8).contains(&y) && (me >> y) & 1 != 0 {
            me |= run;
            other &= !run;
        }
    }
    (me, other)
}

/// Builds the edge stability table.
///
/// A player disc is stable on an edge when it still belongs to the player in
/// every configuration reachable by filling empty cells, whichever side plays
/// them. Children always hold one more disc, so configurations are resolved
/// from full edges down to empty ones.
fn build_edge_table() -> Box<[u8]> {
    let mut table = vec![0u8; 256 * 256].into_boxed_slice();
    for filled in (0..=8).rev() {
        for p in 0u32..256 {
            for o in 0u32..256 {
                if p & o != 0 || (p | o).count_ones() != filled {
                    continue;
                }
                let empty = !(p | o) & 0xff;
                let mut stable = p;
                for x in 0..8 {
                    if stable == 0 {
                        break;
                    }
                    if (empty >> x) & 1 == 0 {
                        continue;
                    }
                    let (cp, co) = play_edge(p, o, x);
                    stable &= table[(cp * 256 + co) as usize] as u32;
                    let (co, cp) = play_edge(o, p, x);
                    stable &= table[(cp * 256 + co) as usize] as u32;
                }
                table[(p * 256 + o) as usize] = stable as u8;
            }
        }
    }
    table
}

/// Extracts file A (A1 in bit 0 up to A8 in bit 7) or file H, shifted down by `file`.
fn pack_file(x: u64, file: u32) -> usize {
    (0..8).fold(0, |acc, rank| {
        acc | ((((x >> (rank * 8 + file)) & 1) as usize) << rank)
    })
}

/// Inverse of [`pack_file`].
fn unpack_file(edge: u8, file: u32) -> u64 {
    (0..8).fold(0, |acc, rank| {
        acc | ((((edge >> rank) & 1) as u64) << (rank * 8 + file))
    })
}

/// Stable discs for the player on the four edges.
fn get_stable_edge(p: u64, o: u64) -> u64 {
    let edge = &tables().edge;
    let lookup = |pe: usize, oe: usize| edge[pe * 256 + oe];

    let rank_1 = lookup((p & RANK_1) as usize, (o & RANK_1) as usize) as u64;
    let rank_8 = (lookup((p >> 56) as usize, (o >> 56) as usize) as u64) << 56;
    let file_a = unpack_file(lookup(pack_file(p, 0), pack_file(o, 0)), 0);
    let file_h = unpack_file(lookup(pack_file(p, 7), pack_file(o, 7)), 7);
    rank_1 | rank_8 | file_a | file_h
}

/// ORs together every mask in `masks` that is completely occupied.
fn full_lines_of(occupied: u64, masks: impl Iterator<Item = u64>) -> u64 {
    masks.filter(|&m| occupied & m == m).fold(0, |acc, m| acc | m)
}

/// Returns the occupied squares lying on a full line, per direction:
/// horizontal, vertical, A1-H8 diagonal and A8-H1 diagonal.
fn get_full_lines(occupied: u64) -> [u64; 4] {
    let tables = tables();
    [
        full_lines_of(occupied, (0..8).map(|r| RANK_1 << (8 * r))),
        full_lines_of(occupied, (0..8).map(|f| FILE_A << f)),
        full_lines_of(occupied, tables.diagonals.iter().copied()),
        full_lines_of(occupied, tables.anti_diagonals.iter().copied()),
    ]
}

/// Grows the stable set through interior discs whose four lines are each
/// full or touching a stable disc.
fn get_stable_by_contact(candidates: u64, mut stable: u64, full: &[u64; 4]) -> u64 {
    loop {
        let horizontal = shift(stable, 0) | shift(stable, 1) | full[0];
        let vertical = shift(stable, 2) | shift(stable, 3) | full[1];
        let diagonal = shift(stable, 4) | shift(stable, 7) | full[2];
        let anti_diagonal = shift(stable, 5) | shift(stable, 6) | full[3];

        let next = stable | (horizontal & vertical & diagonal & anti_diagonal & candidates);
        if next == stable {
            return stable;
        }
        stable = next;
    }
}

/// Estimates the stable discs of `player`.
///
/// # Arguments
///
/// * `player` - Bitboard of the discs to test.
/// * `opponent` - Bitboard of the other side's discs.
///
/// # Returns
///
/// A subset of `player` that can never be flipped.
pub fn get_stable_discs(player: Bitboard, opponent: Bitboard) -> Bitboard {
    let (p, o) = (player.bits(), opponent.bits());
    let candidates = p & INTERIOR_MASK;
    let full = get_full_lines(p | o);
    let all_full = full[0] & full[1] & full[2] & full[3];

    let stable = get_stable_edge(p, o) | (all_full & candidates);
    Bitboard::new(get_stable_by_contact(candidates, stable, &full))
}

/// Attempts to prove a fail-low in the exact endgame search.
///
/// Opponent discs that are stable will still be the opponent's at the end of
/// the game, which bounds the best final margin the player can reach.
///
/// # Arguments
///
/// * `board` - Current board position.
/// * `alpha` - Lower bound of the search window, in disc margin units.
///
/// # Returns
///
/// `Some(bound)` if the bound does not exceed `alpha`, `None` otherwise.
pub fn stability_cutoff(board: &Board, alpha: Score) -> Option<Score> {
    // The bound can only reach alpha if the opponent holds enough discs at all.
    if SCORE_MAX - 2 * board.opponent.count() as Score > alpha {
        return None;
    }

    let stable = get_stable_discs(board.opponent, board.player).count() as Score;
    let bound = SCORE_MAX - 2 * stable;
    (bound <= alpha).then_some(bound)
}
