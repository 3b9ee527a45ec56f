//! Ordered "first matching rule wins" tables.
//!
//! Both the input classifier and the decision engine are expressed as
//! ordered slices of [`Rule`]s evaluated by [`first_match`].

/// A named `(predicate, outcome)` pair.
#[derive(Debug, Clone, Copy)]
pub struct Rule<P, T> {
    /// Short rule name, used in debug logs
    pub name: &'static str,
    /// Predicate deciding whether the rule fires
    pub when: P,
    /// Outcome of the rule (a value, or a function producing one)
    pub then: T,
}

/// Returns the first rule whose predicate holds for `ctx`.
pub fn first_match<'r, C, P, T>(rules: &'r [Rule<P, T>], ctx: &C) -> Option<&'r Rule<P, T>>
where
    C: ?Sized,
    P: Fn(&C) -> bool,
{
    rules.iter().find(|rule| (rule.when)(ctx))
}
