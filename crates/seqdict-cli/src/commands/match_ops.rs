use std::fmt::Write as _;

use clap::ValueEnum;
use seqdict_core::{ApproxMatch, ClosestOptions, Match, Matcher};
use unicode_width::UnicodeWidthStr;

use super::dict_ops::open;
use crate::dict_source::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// Every occurrence, overlapping ones included
    All,
    /// Greedy longest, non-overlapping
    Longest,
    /// Longest matches plus the gaps between them
    Segment,
}

pub fn match_cmd(dict_file: &str, text: &str, mode: MatchMode, json: bool) {
    let dict = open(dict_file);
    let matcher = Matcher::new(&dict);
    let input = tokenize(text);
    let matches = match mode {
        MatchMode::All => matcher.find_all_matches(&input),
        MatchMode::Longest => matcher.find_non_overlapping(&input),
        MatchMode::Segment => matcher.segment(&input),
    };
    if json {
        let out = die!(serde_json::to_string_pretty(&matches), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", format_matches(&matches));
    }
}

pub struct ClosestArgs {
    pub k: usize,
    pub combine: bool,
    pub collapse: bool,
    pub max_cost: Option<u32>,
    pub json: bool,
}

pub fn closest_cmd(dict_file: &str, text: &str, args: &ClosestArgs) {
    let dict = open(dict_file);
    let matcher = Matcher::new(&dict);
    let input = tokenize(text);
    let mut opts = ClosestOptions::default().combine_matches(args.combine);
    if args.collapse {
        opts = opts.keep_all_alternatives(false);
    }
    if args.max_cost.is_some() {
        opts = opts.max_cost(args.max_cost);
    }
    let results = matcher.find_closest_matches_with(&input, args.k, &opts);
    if args.json {
        let out = die!(serde_json::to_string_pretty(&results), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", format_closest(&results));
    }
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

pub fn format_matches(matches: &[Match<String, String>]) -> String {
    let keys: Vec<String> = matches.iter().map(|m| m.key.join(" ")).collect();
    let width = keys.iter().map(|k| UnicodeWidthStr::width(k.as_str())).max().unwrap_or(0);
    let mut out = String::new();
    for (m, key) in matches.iter().zip(&keys) {
        let value = m.value.as_deref().unwrap_or("-");
        let _ = writeln!(out, "[{:>3},{:>3})  {}  {}", m.start, m.end, pad(key, width), value);
    }
    out
}

pub fn format_closest(results: &[ApproxMatch<String, String>]) -> String {
    let mut out = String::new();
    for (i, m) in results.iter().enumerate() {
        if m.components.is_empty() {
            let _ = writeln!(
                out,
                "#{:>2}: cost={}  {}  => {}",
                i + 1,
                m.cost,
                m.key.join(" "),
                m.value.as_deref().unwrap_or("-")
            );
        } else {
            let segs: Vec<String> = m
                .components
                .iter()
                .map(|c| format!("{}[{},{})", c.key.join(" "), c.start, c.end))
                .collect();
            let _ = writeln!(out, "#{:>2}: cost={}  {}", i + 1, m.cost, segs.join(" | "));
        }
    }
    out
}
