// In: src/pipeline/planner.rs

//! The parse planner for padat.
//!
//! This module is the "smart" engine that turns the user-facing quality dial
//! into concrete search behavior. It operates by:
//! 1. Mapping `Quality` to chain depth, lazy evaluation, block sizing, and
//!    whether the optimal parse runs at all.
//! 2. Executing the chosen parse: greedy/lazy hash-chain tokenization at the
//!    lower levels, a cost-model dynamic program with statistics refinement
//!    at the top.
//!
//! This decouples "what do the knobs mean?" from the mechanics of match
//! finding and entropy coding.

use crate::config::PadatConfig;
use crate::kernels::matchfind::{MatchFinder, Token, MAX_MATCH_LEN, MIN_MATCH_LEN};
use crate::pipeline::models::{dist_alphabet_size, distance_to_symbol, length_to_symbol, CostModel, LIT_ALPHABET};

//==================================================================================
// 1. Search Parameters
//==================================================================================

/// Concrete knobs the quality level resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Hash-chain probe budget per position.
    pub max_chain: usize,
    /// Defer matches by one byte when the next position matches longer.
    pub lazy: bool,
    /// Number of cost-model DP passes (0 = greedy/lazy only).
    pub optimal_passes: u8,
    /// Token budget per block before the modeler starts a new one.
    pub tokens_per_block: usize,
}

/// Resolves a quality level into search parameters.
pub fn plan_search(config: &PadatConfig) -> SearchParams {
    let q = config.quality.level();
    let max_chain = match q {
        0 => 4,
        1 => 8,
        2 => 16,
        3 => 32,
        4 => 64,
        5 => 128,
        6 => 256,
        7 => 512,
        8 => 1024,
        9 => 2048,
        _ => 4096,
    };
    let lazy = (4..=9).contains(&q);
    let optimal_passes = match q {
        0..=9 => 0,
        10 => 1,
        _ => 2,
    };
    // Bigger blocks amortize table headers at speed-oriented levels; smaller
    // blocks let the statistics adapt when we are paying for ratio anyway.
    let tokens_per_block = match q {
        0..=4 => 1 << 16,
        5..=8 => 1 << 14,
        _ => 1 << 13,
    };

    let params = SearchParams {
        max_chain,
        lazy,
        optimal_passes,
        tokens_per_block,
    };
    log::debug!(
        "planner: quality {} -> chain {}, lazy {}, optimal passes {}, block {} tokens",
        q,
        params.max_chain,
        params.lazy,
        params.optimal_passes,
        params.tokens_per_block
    );
    params
}

//==================================================================================
// 2. Parse Execution
//==================================================================================

/// Tokenizes the input with the strategy the quality level calls for.
pub fn tokenize(data: &[u8], config: &PadatConfig, params: &SearchParams) -> Vec<Token> {
    let mut finder = MatchFinder::new(config.window, data.len(), params.max_chain, params.lazy);
    let mut tokens = finder.tokenize(data);

    for pass in 0..params.optimal_passes {
        // Each pass prices symbols from the previous pass's statistics and
        // re-parses; the first refinement recovers most of the gain.
        let cost = cost_model_from_tokens(&tokens, config.window.bits());
        tokens = tokenize_optimal(&mut finder, data, &cost);
        log::debug!(
            "planner: optimal pass {} produced {} tokens",
            pass + 1,
            tokens.len()
        );
    }

    tokens
}

/// Builds an entropy cost model from the symbol statistics of an existing
/// token stream.
fn cost_model_from_tokens(tokens: &[Token], window_bits: u8) -> CostModel {
    if tokens.is_empty() {
        return CostModel::flat(dist_alphabet_size(window_bits));
    }
    let mut lit_len = vec![0u32; LIT_ALPHABET];
    let mut dist = vec![0u32; dist_alphabet_size(window_bits)];
    for token in tokens {
        match *token {
            Token::Literal(byte) => lit_len[byte as usize] += 1,
            Token::Copy { len, dist: d } => {
                let (len_sym, _, _) = length_to_symbol(len);
                let (dist_sym, _, _) = distance_to_symbol(d);
                lit_len[len_sym as usize] += 1;
                dist[dist_sym as usize] += 1;
            }
        }
    }
    CostModel::from_statistics(&lit_len, &dist)
}

/// Optimal tokenization by forward dynamic programming: for every position,
/// consider a literal and every achievable match length, tracking the
/// cheapest way to reach each byte offset; then trace the winning path back.
fn tokenize_optimal(finder: &mut MatchFinder, data: &[u8], cost: &CostModel) -> Vec<Token> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    finder.reset();

    // costs[i] = cheapest bit cost to encode bytes 0..i.
    let mut costs = vec![f32::MAX; n + 1];
    let mut len_at = vec![0u16; n + 1];
    let mut dist_at = vec![0u32; n + 1];
    costs[0] = 0.0;

    for i in 0..n {
        if costs[i] == f32::MAX {
            continue;
        }

        let literal = costs[i] + cost.literal_cost(data[i]);
        if literal < costs[i + 1] {
            costs[i + 1] = literal;
            len_at[i + 1] = 1;
            dist_at[i + 1] = 0;
        }

        // Probe before inserting so the chain never yields position i itself.
        let (sublen, longest) = finder.find_match_sublens(data, i);
        finder.insert(data, i);

        for len in MIN_MATCH_LEN..=longest.min(MAX_MATCH_LEN) {
            let dist = sublen[len];
            if dist == 0 {
                continue;
            }
            let candidate = costs[i] + cost.copy_cost(len as u16, dist);
            let end = i + len;
            if candidate < costs[end] {
                costs[end] = candidate;
                len_at[end] = len as u16;
                dist_at[end] = dist;
            }
        }
    }

    // Walk back from the end collecting token lengths, then emit forward.
    let mut reversed = Vec::new();
    let mut at = n;
    while at > 0 {
        let len = len_at[at] as usize;
        debug_assert!(len > 0, "DP left an unreachable position");
        reversed.push((len, dist_at[at]));
        at -= len;
    }

    let mut tokens = Vec::with_capacity(reversed.len());
    let mut pos = 0usize;
    for (len, dist) in reversed.into_iter().rev() {
        if len == 1 && dist == 0 {
            tokens.push(Token::Literal(data[pos]));
        } else {
            tokens.push(Token::Copy {
                len: len as u16,
                dist,
            });
        }
        pos += len;
    }

    tokens
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
