//! Memoized top-down pattern matching.
//!
//! A [`Parser`] is built once per input line: it tokenizes the line,
//! snapshots the thing and room dictionaries, and then enumerates every
//! way the registered patterns cover the tokens. Memoization is keyed
//! on `(nonterminal, position)`; a nonterminal re-entered at the same
//! position while still being expanded yields nothing, which keeps
//! accidental left recursion finite.

use std::collections::{HashMap, HashSet};

use fathom_foundation::{Id, Result};
use fathom_world::{queries, Direction, World};

use crate::action::Action;
use crate::dictionary::Dictionary;
use crate::grammar::{Captures, Elem, Frontend, Grammar, GrammarRule, SlotValue};
use crate::token::{tokenize, Token};
use crate::ARTICLES;

/// One way a nonterminal matched a token span.
#[derive(Clone, Debug)]
pub struct ActionMatch {
    /// The built action.
    pub action: Action,
    /// The grammar score: noun-phrase points plus sub-match scores.
    pub score: i32,
    /// First token index covered.
    pub start: usize,
    /// One past the last token index covered.
    pub end: usize,
}

/// Parser state for one input line.
pub struct Parser<'g> {
    grammar: &'g Grammar,
    input: String,
    tokens: Vec<Token>,
    things: Dictionary,
    rooms: Dictionary,
    memo: HashMap<(String, usize), Option<Vec<ActionMatch>>>,
}

impl<'g> Parser<'g> {
    /// Builds a parser for one line, snapshotting the dictionaries.
    ///
    /// # Errors
    ///
    /// Propagates property rule faults from dictionary building.
    pub fn new(world: &mut World, grammar: &'g Grammar, input: &str) -> Result<Self> {
        Ok(Self {
            grammar,
            input: input.to_string(),
            tokens: tokenize(input),
            things: Dictionary::build(world, "thing")?,
            rooms: Dictionary::build(world, "room")?,
            memo: HashMap::new(),
        })
    }

    /// The tokens of the line.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Every word the grammar or the dictionaries know.
    #[must_use]
    pub fn known_words(&self) -> HashSet<String> {
        let mut words: HashSet<String> = self.grammar.literal_words().clone();
        words.extend(self.things.words().map(str::to_string));
        words.extend(self.rooms.words().map(str::to_string));
        words.extend(ARTICLES.iter().map(|a| (*a).to_string()));
        for dir in Direction::ALL {
            words.extend(dir.words().iter().map(|w| (*w).to_string()));
        }
        words
    }

    /// Parses the whole line as a command: an `action` match optionally
    /// followed by a terminal period.
    ///
    /// # Errors
    ///
    /// Propagates property rule faults from noun filtering.
    pub fn parse_command(&mut self, world: &mut World) -> Result<Vec<ActionMatch>> {
        let n = self.tokens.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        let trailing_period = self.tokens[n - 1].text == ".";
        let matches = self.parse_nonterminal(world, "action", 0)?;
        Ok(matches
            .into_iter()
            .filter(|m| m.end == n || (trailing_period && m.end == n - 1))
            .collect())
    }

    /// Enumerates matches of a nonterminal at a position.
    ///
    /// # Errors
    ///
    /// Propagates property rule faults from noun filtering.
    pub fn parse_nonterminal(
        &mut self,
        world: &mut World,
        nonterminal: &str,
        pos: usize,
    ) -> Result<Vec<ActionMatch>> {
        let key = (nonterminal.to_string(), pos);
        if let Some(cached) = self.memo.get(&key) {
            return Ok(cached.clone().unwrap_or_default());
        }
        self.memo.insert(key.clone(), None);

        let rules: Vec<GrammarRule> = self.grammar.rules(nonterminal).to_vec();
        let mut out = Vec::new();
        for rule in rules {
            if let Some(when) = &rule.when {
                if !when(world) {
                    continue;
                }
            }
            for (end, caps, score) in self.match_seq(world, &rule.elems, pos)? {
                out.push(ActionMatch {
                    action: (rule.build)(&caps),
                    score,
                    start: pos,
                    end,
                });
            }
        }

        self.memo.insert(key, Some(out.clone()));
        Ok(out)
    }

    fn match_seq(
        &mut self,
        world: &mut World,
        elems: &[Elem],
        pos: usize,
    ) -> Result<Vec<(usize, Captures, i32)>> {
        let Some((first, rest)) = elems.split_first() else {
            return Ok(vec![(pos, Captures::default(), 0)]);
        };

        let mut out = Vec::new();
        for (end, capture, score) in self.match_elem(world, first, pos)? {
            for (tail_end, tail_caps, tail_score) in self.match_seq(world, rest, end)? {
                let caps = match &capture {
                    Some((name, value)) => tail_caps.prepended(name, value.clone()),
                    None => tail_caps,
                };
                out.push((tail_end, caps, score + tail_score));
            }
        }
        Ok(out)
    }

    #[allow(clippy::type_complexity)]
    fn match_elem(
        &mut self,
        world: &mut World,
        elem: &Elem,
        pos: usize,
    ) -> Result<Vec<(usize, Option<(String, SlotValue)>, i32)>> {
        match elem {
            Elem::Literal(alts) => {
                let hit = self
                    .tokens
                    .get(pos)
                    .is_some_and(|t| t.is_word() && alts.contains(&t.text));
                if hit {
                    Ok(vec![(pos + 1, None, 0)])
                } else {
                    Ok(Vec::new())
                }
            }
            Elem::Slot { name, frontend } => self.match_slot(world, name, frontend, pos),
        }
    }

    #[allow(clippy::type_complexity)]
    fn match_slot(
        &mut self,
        world: &mut World,
        name: &str,
        frontend: &Frontend,
        pos: usize,
    ) -> Result<Vec<(usize, Option<(String, SlotValue)>, i32)>> {
        let mut out = Vec::new();
        match frontend {
            Frontend::Direction => {
                if let Some(token) = self.tokens.get(pos) {
                    if let Some(dir) = Direction::parse(&token.text) {
                        out.push((pos + 1, Some((name.to_string(), SlotValue::Dir(dir))), 0));
                    }
                }
            }
            Frontend::Text => {
                for end in pos + 1..=self.tokens.len() {
                    if !self.tokens[end - 1].is_word() {
                        break;
                    }
                    let span =
                        self.input[self.tokens[pos].start..self.tokens[end - 1].end].to_string();
                    out.push((end, Some((name.to_string(), SlotValue::Text(span))), 0));
                }
            }
            Frontend::Action => {
                for m in self.parse_nonterminal(world, "action", pos)? {
                    out.push((
                        m.end,
                        Some((name.to_string(), SlotValue::Act(m.action))),
                        m.score,
                    ));
                }
            }
            Frontend::Anything | Frontend::Something | Frontend::Obj(_) => {
                let actor = world.actor();
                for (end, id, score) in self.match_noun(pos, &self.things) {
                    let keep = match frontend {
                        Frontend::Anything => true,
                        Frontend::Something => queries::visible_to(world, &id, &actor)?,
                        Frontend::Obj(target) => &id == target,
                        _ => unreachable!(),
                    };
                    if keep {
                        out.push((end, Some((name.to_string(), SlotValue::Obj(id))), score));
                    }
                }
            }
            Frontend::Anywhere | Frontend::Somewhere => {
                let actor = world.actor();
                for (end, id, score) in self.match_noun(pos, &self.rooms) {
                    let keep = match frontend {
                        Frontend::Anywhere => true,
                        Frontend::Somewhere => world.bool_prop2("known", &id, &actor)?,
                        _ => unreachable!(),
                    };
                    if keep {
                        out.push((end, Some((name.to_string(), SlotValue::Obj(id))), score));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Noun-phrase matching: an optional article, then successive words
    /// intersecting the candidate set, with a match emitted for every
    /// id remaining at each step.
    fn match_noun(&self, pos: usize, dict: &Dictionary) -> Vec<(usize, Id, i32)> {
        let mut p = pos;
        if self
            .tokens
            .get(p)
            .is_some_and(|t| ARTICLES.contains(&t.text.as_str()))
        {
            p += 1;
        }
        let phrase_start = p;

        let mut current: Vec<(Id, i32)> = Vec::new();
        let mut results = Vec::new();

        while let Some(token) = self.tokens.get(p) {
            if !token.is_word() {
                break;
            }
            let entries = dict.lookup(&token.text);
            if entries.is_empty() {
                break;
            }

            let mut narrowed: Vec<(Id, i32)> = Vec::new();
            for (id, role) in entries {
                if p == phrase_start {
                    narrowed.push((id.clone(), role.points()));
                } else if let Some((_, base)) = current.iter().find(|(cid, _)| cid == id) {
                    narrowed.push((id.clone(), base + role.points()));
                }
            }
            if narrowed.is_empty() {
                break;
            }
            p += 1;
            current = narrowed;

            let span = self.input[self.tokens[phrase_start].start..self.tokens[p - 1].end]
                .to_lowercase();
            for (id, score) in &current {
                let bonus = i32::from(dict.name_of(id) == Some(span.as_str()));
                results.push((p, id.clone(), score + bonus));
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_foundation::Value;
    use fathom_world::LocTag;

    fn obj(s: &str) -> Value {
        Value::Id(Id::from(s))
    }

    fn setup() -> (World, Grammar) {
        let mut world = World::new();
        world.create("lobby", "room").unwrap();
        world.create("player", "person").unwrap();
        world.create("red-ball", "thing").unwrap();
        world.set_player(&Id::from("player"));
        world.set("makes_light", &[obj("lobby")], true);
        world
            .relate(&Id::from("player"), &Id::from("lobby"), LocTag::ContainedBy)
            .unwrap();
        world
            .relate(&Id::from("red-ball"), &Id::from("lobby"), LocTag::ContainedBy)
            .unwrap();

        let mut grammar = Grammar::new();
        grammar
            .understand(
                "action",
                "take/get [something x]",
                |caps| Action::new("take").with_dobj(caps.obj("x").expect("captured")),
                None,
            )
            .unwrap();
        grammar
            .understand(
                "action",
                "look/l",
                |_| Action::new("look"),
                None,
            )
            .unwrap();
        (world, grammar)
    }

    #[test]
    fn take_ball_matches() {
        let (mut world, grammar) = setup();
        let mut parser = Parser::new(&mut world, &grammar, "take ball").unwrap();
        let matches = parser.parse_command(&mut world).unwrap();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].action.is("take"));
        assert_eq!(matches[0].action.dobj, Some(Id::from("red-ball")));
        // One noun word.
        assert_eq!(matches[0].score, 2);
    }

    #[test]
    fn article_consumed_silently() {
        let (mut world, grammar) = setup();
        let mut parser = Parser::new(&mut world, &grammar, "take the ball").unwrap();
        let matches = parser.parse_command(&mut world).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn full_name_earns_bonus() {
        let (mut world, grammar) = setup();
        let mut parser = Parser::new(&mut world, &grammar, "take red ball").unwrap();
        let matches = parser.parse_command(&mut world).unwrap();

        assert_eq!(matches.len(), 1);
        // adjective (1) + noun (2) + exact-name bonus (1)
        assert_eq!(matches[0].score, 4);
    }

    #[test]
    fn terminal_period_accepted() {
        let (mut world, grammar) = setup();
        let mut parser = Parser::new(&mut world, &grammar, "take ball.").unwrap();
        let matches = parser.parse_command(&mut world).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn partial_span_rejected() {
        let (mut world, grammar) = setup();
        let mut parser = Parser::new(&mut world, &grammar, "take ball now").unwrap();
        let matches = parser.parse_command(&mut world).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn invisible_things_filtered_by_something() {
        let (mut world, grammar) = setup();
        world.create("chest", "container").unwrap();
        world.set("openable", &[obj("chest")], true);
        world
            .relate(&Id::from("chest"), &Id::from("lobby"), LocTag::ContainedBy)
            .unwrap();
        world
            .relate(&Id::from("red-ball"), &Id::from("chest"), LocTag::ContainedBy)
            .unwrap();

        let mut parser = Parser::new(&mut world, &grammar, "take ball").unwrap();
        let matches = parser.parse_command(&mut world).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn two_balls_yield_two_parses() {
        let (mut world, grammar) = setup();
        world.create("big-red-ball", "thing").unwrap();
        world.set("name", &[obj("red-ball")], "small red ball");
        world.set("name", &[obj("big-red-ball")], "big red ball");
        world
            .relate(
                &Id::from("big-red-ball"),
                &Id::from("lobby"),
                LocTag::ContainedBy,
            )
            .unwrap();

        let mut parser = Parser::new(&mut world, &grammar, "take red ball").unwrap();
        let matches = parser.parse_command(&mut world).unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn known_words_cover_grammar_and_dictionary() {
        let (mut world, grammar) = setup();
        let parser = Parser::new(&mut world, &grammar, "x").unwrap();
        let words = parser.known_words();

        assert!(words.contains("take"));
        assert!(words.contains("ball"));
        assert!(words.contains("the"));
        assert!(words.contains("ne"));
        assert!(!words.contains("quux"));
    }
}
