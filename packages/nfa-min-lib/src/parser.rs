//! In this file, we parse textual descriptions of NFAs.
//!
//! A description consists of sections, one per line, followed by the
//! transition list. An example is as follows:
//! ```text
//! # comment
//! states: 1, 2, 3
//! start: 1
//! finals: 3
//! alphabet: a, b
//! transitions:
//!   1, a, 1
//!   1, a, 2
//!   2, b, 3
//!   1, 3
//! ```
//!
//! A transition with only two entries is an epsilon move. Without an
//! `alphabet` section the alphabet is the sorted set of symbols used by the
//! transitions. `finals` may be left out, meaning no state accepts.
use std::{fmt::Display, path::Path};

use anyhow::Context;
use itertools::Itertools;
use nom::{
    Parser,
    bytes::complete::{tag, take_till1},
    character::complete::{alpha1, space0},
    combinator::{all_consuming, opt},
    error::ParseError,
    sequence::preceded,
};

use crate::automaton::{
    description::{NfaDescription, UnknownStatePolicy},
    nfa::{NFA, NFAEdge},
};

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ':' || c == '#'
}

fn token<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    take_till1(is_delimiter)(input)
}

fn separator<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, (), E> {
    let (input, _) = space0(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, _) = space0(input)?;
    Ok((input, ()))
}

// E.g., 1, 2, 3
fn token_list<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, Vec<&'a str>, E> {
    nom::multi::separated_list0(separator, token).parse(input)
}

#[test]
fn test_token_list_1() {
    let input = "q0, q1 ,q2";
    let (_, list) = token_list::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(list, vec!["q0", "q1", "q2"]);
}

#[test]
fn test_token_list_2() {
    let (rest, list) = token_list::<nom::error::Error<&str>>("").unwrap();
    assert!(list.is_empty());
    assert_eq!(rest, "");
}

/// A section header together with its entries, e.g. `states: 1, 2`.
fn section<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, (&'a str, Vec<&'a str>), E> {
    let (input, _) = space0(input)?;
    let (input, name) = alpha1(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, _) = space0(input)?;
    let (input, entries) = token_list(input)?;
    let (input, _) = space0(input)?;

    Ok((input, (name, entries)))
}

#[test]
fn test_section_1() {
    let input = "states: 1, 2, 3";
    let (_, (name, entries)) = section::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(name, "states");
    assert_eq!(entries, vec!["1", "2", "3"]);
}

#[test]
fn test_section_2() {
    let input = "transitions:";
    let (_, (name, entries)) = section::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(name, "transitions");
    assert!(entries.is_empty());
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionLine<'a> {
    pub from: &'a str,
    pub symbol: Option<&'a str>,
    pub to: &'a str,
}

// E.g., `1, a, 2` or `1, 2` for an epsilon move
fn transition<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, TransitionLine<'a>, E> {
    let (input, _) = space0(input)?;
    let (input, first) = token(input)?;
    let (input, _) = separator(input)?;
    let (input, second) = token(input)?;
    let (input, third) = opt(preceded(separator, token)).parse(input)?;
    let (input, _) = space0(input)?;

    let line = match third {
        Some(third) => TransitionLine {
            from: first,
            symbol: Some(second),
            to: third,
        },
        None => TransitionLine {
            from: first,
            symbol: None,
            to: second,
        },
    };

    Ok((input, line))
}

#[test]
fn test_transition_1() {
    let input = "  q1, a, q2";
    let (_, line) = transition::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(line.from, "q1");
    assert_eq!(line.symbol, Some("a"));
    assert_eq!(line.to, "q2");
}

#[test]
fn test_transition_2() {
    let input = "1,3";
    let (_, line) = transition::<nom::error::Error<&str>>(input).unwrap();
    assert_eq!(line.from, "1");
    assert_eq!(line.symbol, None);
    assert_eq!(line.to, "3");
}

#[test]
fn test_transition_3() {
    let input = "1, a, 2, 3";
    let result = all_consuming(transition::<nom::error::Error<&str>>).parse(input);
    assert!(result.is_err());
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn owned(entries: Vec<&str>) -> Vec<String> {
    entries.into_iter().map(String::from).collect()
}

/// Parses a textual NFA description.
pub fn parse_description(input: &str) -> anyhow::Result<NfaDescription<String, String>> {
    let mut states: Option<Vec<String>> = None;
    let mut start: Option<String> = None;
    let mut finals: Option<Vec<String>> = None;
    let mut alphabet: Option<Vec<String>> = None;
    let mut transitions: Option<Vec<(String, NFAEdge<String>, String)>> = None;

    for (index, raw_line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw_line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(transitions) = transitions.as_mut() {
            let (_, parsed) = all_consuming(transition::<nom::error::Error<&str>>)
                .parse(line)
                .map_err(|e| {
                    anyhow::anyhow!("line {}: invalid transition `{}`: {}", line_number, line, e)
                })?;

            transitions.push((
                parsed.from.to_string(),
                NFAEdge::from(parsed.symbol.map(String::from)),
                parsed.to.to_string(),
            ));
            continue;
        }

        let (_, (name, entries)) = all_consuming(section::<nom::error::Error<&str>>)
            .parse(line)
            .map_err(|e| {
                anyhow::anyhow!("line {}: invalid section `{}`: {}", line_number, line, e)
            })?;

        let slot = match name {
            "states" => &mut states,
            "finals" => &mut finals,
            "alphabet" => &mut alphabet,
            "start" => {
                if start.is_some() {
                    anyhow::bail!("line {}: duplicate section `start`", line_number);
                }
                match entries.as_slice() {
                    [single] => start = Some(single.to_string()),
                    _ => anyhow::bail!(
                        "line {}: `start` needs exactly one state, found {}",
                        line_number,
                        entries.len()
                    ),
                }
                continue;
            }
            "transitions" => {
                if !entries.is_empty() {
                    anyhow::bail!(
                        "line {}: transitions must be listed on the following lines",
                        line_number
                    );
                }
                transitions = Some(vec![]);
                continue;
            }
            other => anyhow::bail!("line {}: unknown section `{}`", line_number, other),
        };

        if slot.is_some() {
            anyhow::bail!("line {}: duplicate section `{}`", line_number, name);
        }
        *slot = Some(owned(entries));
    }

    let states = states.context("missing section `states`")?;
    let start = start.context("missing section `start`")?;
    let transitions = transitions.context("missing section `transitions`")?;

    let mut description = NfaDescription::new(states, start, finals.unwrap_or_default());
    for (from, symbol, to) in transitions {
        description = match symbol {
            NFAEdge::Symbol(symbol) => description.with_transition(from, symbol, to),
            NFAEdge::Epsilon => description.with_epsilon(from, to),
        };
    }

    Ok(match alphabet {
        Some(alphabet) => description.with_alphabet(alphabet),
        None => description.with_collected_alphabet(),
    })
}

pub fn parse_description_file<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<NfaDescription<String, String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read description file {}", path.display()))?;

    parse_description(&content)
        .with_context(|| format!("failed to parse description file {}", path.display()))
}

#[test]
fn test_description_1() {
    let input = r#"
    # the example from the README
    states: 1, 2, 3
    start: 1
    finals: 3
    transitions:
        1, a, 1
        1, a, 2
        2, b, 3   # last one
    "#;

    let description = parse_description(input).unwrap();
    assert_eq!(description.states, vec!["1", "2", "3"]);
    assert_eq!(description.start, "1");
    assert_eq!(description.finals, vec!["3"]);
    assert_eq!(description.alphabet, vec!["a", "b"]);
    assert_eq!(description.transitions.len(), 3);
}

#[test]
fn test_description_2() {
    let input = r#"
    start: q0
    alphabet: x, y
    states: q0, q1
    transitions:
        q0, q1
    "#;

    let description = parse_description(input).unwrap();
    assert!(description.finals.is_empty());
    assert_eq!(description.alphabet, vec!["x", "y"]);
    assert_eq!(description.transitions[0].symbol, NFAEdge::Epsilon);
}

#[test]
fn test_description_errors() {
    let missing_start = "states: 1\ntransitions:\n";
    assert!(parse_description(missing_start).is_err());

    let bad_line = "states: 1\nstart: 1\ntransitions:\n1, a\n1 a 1\n";
    let error = parse_description(bad_line).unwrap_err();
    assert!(error.to_string().starts_with("line 5"));

    let unknown_section = "states: 1\nstart: 1\ninitial: 1\ntransitions:\n";
    let error = parse_description(unknown_section).unwrap_err();
    assert!(error.to_string().contains("unknown section"));

    let two_starts = "states: 1, 2\nstart: 1, 2\ntransitions:\n";
    assert!(parse_description(two_starts).is_err());
}

pub trait ToDescriptionFormat {
    fn to_description_format(&self) -> String;
}

impl<L: Display, S: Display> ToDescriptionFormat for NfaDescription<L, S> {
    fn to_description_format(&self) -> String {
        let mut text = String::new();

        text.push_str(&format!("states: {}\n", self.states.iter().join(", ")));
        text.push_str(&format!("start: {}\n", self.start));
        text.push_str(&format!("finals: {}\n", self.finals.iter().join(", ")));
        text.push_str(&format!("alphabet: {}\n", self.alphabet.iter().join(", ")));

        text.push_str("transitions:\n");
        for transition in &self.transitions {
            match &transition.symbol {
                NFAEdge::Symbol(symbol) => text.push_str(&format!(
                    "    {}, {}, {}\n",
                    transition.from, symbol, transition.to
                )),
                NFAEdge::Epsilon => {
                    text.push_str(&format!("    {}, {}\n", transition.from, transition.to))
                }
            }
        }

        text
    }
}

#[test]
fn test_description_format_round_trip() {
    let input = "states: 1, 2\nstart: 1\nfinals: 2\ntransitions:\n1, a, 2\n2, 1\n";
    let description = parse_description(input).unwrap();
    let written = description.to_description_format();

    assert_eq!(parse_description(&written).unwrap(), description);
}

impl NFA<String, String> {
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        policy: UnknownStatePolicy,
    ) -> anyhow::Result<Self> {
        let description = parse_description_file(path)?;
        Ok(NFA::from_description(&description, policy)?)
    }
}
