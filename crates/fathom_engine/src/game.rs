//! The game context: world, grammar, verbs, and the phase rulebooks.

use std::collections::BTreeMap;
use std::fmt;

use fathom_dispatch::{Method, Rulebook};
use fathom_foundation::{Id, Result};
use fathom_parser::grammar::{Captures, WhenFn};
use fathom_parser::Action;
use fathom_world::{prose, World};

use crate::score::Verdict;

/// A rulebook over the game for one pipeline phase.
pub type PhaseRules<R> = Rulebook<Game, Action, R>;

/// A method over the game for one pipeline phase.
pub type PhaseMethod<R> = Method<Game, Action, R>;

/// The five phase rulebooks every action runs through.
pub struct Phases {
    /// Rates the action; below the cutoff it refuses to run.
    pub verify: PhaseRules<Verdict>,
    /// Performs implicit prerequisite actions.
    pub try_before: PhaseRules<()>,
    /// Checks semantic preconditions; may abort or redirect.
    pub before: PhaseRules<()>,
    /// Mutates the world. Must not fail.
    pub carry_out: PhaseRules<()>,
    /// Emits narration; skipped for silent sub-actions.
    pub report: PhaseRules<()>,
}

impl Phases {
    fn new() -> Self {
        let mut verify = Rulebook::new("verify");
        verify.prepend(Method::new("default", |_, _, _| Ok(Verdict::logical())));

        let mut phases = Self {
            verify,
            try_before: Rulebook::new("try_before"),
            before: Rulebook::new("before"),
            carry_out: Rulebook::new("carry_out"),
            report: Rulebook::new("report"),
        };
        for book in [
            &mut phases.try_before,
            &mut phases.before,
            &mut phases.carry_out,
            &mut phases.report,
        ] {
            book.prepend(Method::new("default", |_, _, _| Ok(())));
        }
        phases
    }
}

/// Presentation details for a registered verb.
#[derive(Clone, Debug)]
pub struct VerbInfo {
    /// The gerund used in `(first ...)` and `(doing ... instead)`
    /// notices, e.g. `taking`.
    pub gerund: String,
    /// The preposition joining dobj and iobj in notices.
    pub prep: Option<String>,
}

/// A pending disambiguation menu; the next input line picks by number
/// or is read as a fresh command.
#[derive(Clone, Debug)]
pub struct Menu {
    /// Labels and the actions they select.
    pub options: Vec<(String, Action)>,
}

/// Everything one running game holds.
pub struct Game {
    /// The world model.
    pub world: World,
    /// The grammar the parser matches against.
    pub grammar: fathom_parser::Grammar,
    /// The phase rulebooks.
    pub phases: Phases,
    verbs: BTreeMap<Id, VerbInfo>,
    pub(crate) pending_menu: Option<Menu>,
    /// The actor's visible container and its light state at the end of
    /// the previous turn; a change triggers a re-render.
    pub(crate) last_scene: Option<(Id, bool)>,
}

impl Game {
    /// A game with the standard verb library and description defaults
    /// installed.
    #[must_use]
    pub fn new() -> Self {
        let mut game = Self::bare();
        crate::describe::install(&mut game.world);
        crate::verbs::install(&mut game);
        game
    }

    /// A game with empty grammar and phase books; mostly for tests.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            world: World::new(),
            grammar: fathom_parser::Grammar::new(),
            phases: Phases::new(),
            verbs: BTreeMap::new(),
            pending_menu: None,
            last_scene: None,
        }
    }

    // --- Verb registration ---

    /// Registers a verb with its gerund.
    pub fn verb(&mut self, name: &str, gerund: &str) {
        self.verbs.insert(
            Id::from(name),
            VerbInfo {
                gerund: gerund.to_string(),
                prep: None,
            },
        );
    }

    /// Registers a verb whose notices join dobj and iobj with a
    /// preposition, e.g. `putting X into Y`.
    pub fn verb_with_prep(&mut self, name: &str, gerund: &str, prep: &str) {
        self.verbs.insert(
            Id::from(name),
            VerbInfo {
                gerund: gerund.to_string(),
                prep: Some(prep.to_string()),
            },
        );
    }

    /// Looks up a verb's presentation details.
    #[must_use]
    pub fn verb_info(&self, verb: &Id) -> Option<&VerbInfo> {
        self.verbs.get(verb)
    }

    /// Registers a grammar pattern under the `action` nonterminal.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable pattern.
    pub fn understand(
        &mut self,
        pattern: &str,
        build: impl Fn(&Captures) -> Action + 'static,
    ) -> Result<()> {
        self.grammar.understand("action", pattern, build, None)
    }

    /// Registers a grammar pattern gated on world state.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable pattern.
    pub fn understand_when(
        &mut self,
        pattern: &str,
        build: impl Fn(&Captures) -> Action + 'static,
        when: WhenFn,
    ) -> Result<()> {
        self.grammar.understand("action", pattern, build, Some(when))
    }

    /// Registers an author mistake: the pattern parses into a
    /// `making_mistake` action that dominates disambiguation and prints
    /// the message.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable pattern.
    pub fn understand_mistake(&mut self, pattern: &str, message: &str) -> Result<()> {
        let message = message.to_string();
        self.understand(pattern, move |_| {
            Action::new("making_mistake").with_text(message.clone())
        })
    }

    // --- Phase rule registration ---

    /// Adds a verify rule for a verb. The rule's verdict is combined
    /// with the rest of the chain, worst reason winning.
    pub fn verify_rule(
        &mut self,
        verb: &str,
        name: &str,
        f: impl Fn(&mut Game, &Action) -> Result<Verdict> + 'static,
    ) {
        let guard_verb = verb.to_string();
        self.phases.verify.append(Method::guarded(
            name,
            move |_: &Game, action: &Action| action.is(&guard_verb),
            move |game, action, next| {
                let below = next.call(game, action)?;
                let mine = f(game, action)?;
                Ok(Verdict::combine(mine, below))
            },
        ));
    }

    /// Adds a try_before rule for a verb; it runs, then defers to the
    /// rest of the chain.
    pub fn try_before_rule(
        &mut self,
        verb: &str,
        name: &str,
        f: impl Fn(&mut Game, &Action) -> Result<()> + 'static,
    ) {
        let guard_verb = verb.to_string();
        self.phases.try_before.append(Method::guarded(
            name,
            move |_: &Game, action: &Action| action.is(&guard_verb),
            move |game, action, next| {
                f(game, action)?;
                next.call(game, action)
            },
        ));
    }

    /// Adds a before rule for a verb; it runs, then defers to the rest
    /// of the chain.
    pub fn before_rule(
        &mut self,
        verb: &str,
        name: &str,
        f: impl Fn(&mut Game, &Action) -> Result<()> + 'static,
    ) {
        let guard_verb = verb.to_string();
        self.phases.before.append(Method::guarded(
            name,
            move |_: &Game, action: &Action| action.is(&guard_verb),
            move |game, action, next| {
                f(game, action)?;
                next.call(game, action)
            },
        ));
    }

    /// Sets a verb's carry_out rule. The most recently registered rule
    /// wins unless it defers through the raw rulebook.
    pub fn carry_out_rule(
        &mut self,
        verb: &str,
        name: &str,
        f: impl Fn(&mut Game, &Action) -> Result<()> + 'static,
    ) {
        let guard_verb = verb.to_string();
        self.phases.carry_out.append(Method::guarded(
            name,
            move |_: &Game, action: &Action| action.is(&guard_verb),
            move |game, action, _| f(game, action),
        ));
    }

    /// Sets a verb's report rule. The most recently registered rule
    /// wins unless it defers through the raw rulebook.
    pub fn report_rule(
        &mut self,
        verb: &str,
        name: &str,
        f: impl Fn(&mut Game, &Action) -> Result<()> + 'static,
    ) {
        let guard_verb = verb.to_string();
        self.phases.report.append(Method::guarded(
            name,
            move |_: &Game, action: &Action| action.is(&guard_verb),
            move |game, action, _| f(game, action),
        ));
    }

    // --- Labels ---

    /// A plain-text gerund phrase for an action, used by the implicit
    /// and redirect notices: `taking the red ball`, `going north`.
    ///
    /// # Errors
    ///
    /// Propagates property rule faults from name lookup.
    pub fn action_label(&mut self, action: &Action) -> Result<String> {
        let info = self.verbs.get(&action.verb).cloned();
        let gerund = info
            .as_ref()
            .map_or_else(|| format!("{}ing", action.verb), |i| i.gerund.clone());
        let mut label = gerund;

        if let Some(dir) = action.direction {
            label.push(' ');
            label.push_str(dir.name());
        }
        if let Some(dobj) = &action.dobj {
            label.push_str(" the ");
            label.push_str(&prose::display_name(&mut self.world, dobj)?);
        }
        if let Some(iobj) = &action.iobj {
            let prep = info
                .as_ref()
                .and_then(|i| i.prep.clone())
                .unwrap_or_else(|| "with".to_string());
            label.push(' ');
            label.push_str(&prep);
            label.push_str(" the ");
            label.push_str(&prose::display_name(&mut self.world, iobj)?);
        }
        if let Some(room) = &action.room {
            label.push_str(" to ");
            label.push_str(&prose::display_name(&mut self.world, room)?);
        }
        Ok(label)
    }

    /// The pending disambiguation menu, if one is showing.
    #[must_use]
    pub fn pending_menu(&self) -> Option<&Menu> {
        self.pending_menu.as_ref()
    }

    /// Takes the accumulated transcript from the world's sink.
    pub fn take_output(&mut self) -> String {
        self.world.take_output()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("world", &self.world)
            .field("verbs", &self.verbs.len())
            .field("pending_menu", &self.pending_menu.is_some())
            .finish_non_exhaustive()
    }
}
