//! Policy port - anything that picks an action for the current state

use crate::{
    Result,
    gridworld::{Action, GridWorld, Position},
};

/// Action-selection interface shared by learned and baseline policies.
///
/// The environment is passed so that geometry-aware baselines can inspect
/// the grid and draw from its random source. Policies must not move the
/// agent; only the loop calls [`GridWorld::step`].
///
/// # Examples
///
/// ```
/// use gridq::{
///     Result,
///     gridworld::{Action, GridWorld, Position},
///     ports::Policy,
/// };
///
/// struct AlwaysRight;
///
/// impl Policy for AlwaysRight {
///     fn select_action(&mut self, _state: Position, _env: &mut GridWorld) -> Result<Action> {
///         Ok(Action::Right)
///     }
///
///     fn name(&self) -> &str {
///         "always-right"
///     }
/// }
/// ```
pub trait Policy: Send {
    /// Pick an action for `state`.
    ///
    /// # Errors
    ///
    /// Policies that can run out of decisions (scripted replays) report it
    /// here; learned and baseline policies never fail.
    fn select_action(&mut self, state: Position, env: &mut GridWorld) -> Result<Action>;

    /// Name used in logs and comparison tables.
    fn name(&self) -> &str;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn select_action(&mut self, state: Position, env: &mut GridWorld) -> Result<Action> {
        (**self).select_action(state, env)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
