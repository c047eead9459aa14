//! Plugin hooks for host test frameworks.
//!
//! A host framework collects its tests and then hands the whole collection to
//! every registered [`CollectionHook`] once, before running anything. The
//! hooks in this module reorder that collection in place.
//!
//! Two hooks exist:
//! - [`ReorderHook`] always applies an ordering compiled when the hook was
//!   built
//! - [`OptionReorderHook`] applies whatever the `--reorder` command line
//!   option asks for, and does nothing if the option was not given
//!
//! [`register`] is what a host calls to install the plugin.

use std::{borrow::Cow, fmt};

use crate::{
    error::ReorderError,
    options::ReorderOption,
    reorder::{DEFAULT_REGEX_ORDERING, PrefixReorder, RegexReorder, Slot, TestReorder},
    test::TestItem,
};

/// The collection context of a host run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Session {
    pub name: Cow<'static, str>,
}

impl Session {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }
}

/// The host configuration hooks get to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    pub reorder: ReorderOption,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reorder(self, reorder: impl Into<ReorderOption>) -> Self {
        Self {
            reorder: reorder.into(),
        }
    }
}

/// A hook called once per run with the collected tests, after discovery and
/// before execution.
///
/// The only effect a hook may have is rearranging `items`. An error aborts the
/// run before any test is executed.
pub trait CollectionHook<T> {
    fn collection_modify_items(
        &self,
        session: &Session,
        config: &Config,
        items: &mut [T],
    ) -> Result<(), ReorderError>;
}

impl<T, F> CollectionHook<T> for F
where
    F: Fn(&Session, &Config, &mut [T]) -> Result<(), ReorderError>,
{
    fn collection_modify_items(
        &self,
        session: &Session,
        config: &Config,
        items: &mut [T],
    ) -> Result<(), ReorderError> {
        self(session, config, items)
    }
}

/// A hook applying an ordering that was compiled up front.
///
/// Since the ordering is already compiled, this hook never fails.
#[derive(Debug, Clone)]
pub struct ReorderHook<R> {
    reorder: R,
}

impl<R: TestReorder> ReorderHook<R> {
    pub fn new(reorder: R) -> Self {
        Self { reorder }
    }

    pub fn reorder(&self) -> &R {
        &self.reorder
    }
}

impl ReorderHook<PrefixReorder> {
    /// Build a hook matching literal prefixes, see [`PrefixReorder`].
    pub fn prefix(slots: &[Slot]) -> Result<Self, ReorderError> {
        PrefixReorder::new(slots).map(Self::new)
    }
}

impl ReorderHook<RegexReorder> {
    /// Build a hook matching regular expressions, see [`RegexReorder`].
    pub fn regex(slots: &[Slot]) -> Result<Self, ReorderError> {
        RegexReorder::new(slots).map(Self::new)
    }
}

impl<T: TestItem, R: TestReorder> CollectionHook<T> for ReorderHook<R> {
    fn collection_modify_items(
        &self,
        _: &Session,
        _: &Config,
        items: &mut [T],
    ) -> Result<(), ReorderError> {
        self.reorder.reorder(items);
        Ok(())
    }
}

impl<R: fmt::Display> fmt::Display for ReorderHook<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reorder tests by {}", self.reorder)
    }
}

/// The automatic hook for
/// [`DEFAULT_PREFIX_ORDERING`](crate::reorder::DEFAULT_PREFIX_ORDERING).
pub fn default_prefix_reordering_hook() -> ReorderHook<PrefixReorder> {
    ReorderHook::new(PrefixReorder::default())
}

/// The automatic hook for [`DEFAULT_REGEX_ORDERING`].
pub fn default_reordering_hook() -> ReorderHook<RegexReorder> {
    ReorderHook::new(RegexReorder::default())
}

/// A hook driven by the `--reorder` command line option.
///
/// Without the option tests keep their discovery order. Given without
/// patterns, [`DEFAULT_REGEX_ORDERING`] is applied, otherwise the patterns
/// are compiled as regular expressions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptionReorderHook;

impl OptionReorderHook {
    pub fn new() -> Self {
        Self
    }

    /// Compile the ordering `config` asks for, if any.
    pub fn requested(config: &Config) -> Result<Option<RegexReorder>, ReorderError> {
        match &config.reorder {
            ReorderOption::Absent => Ok(None),
            ReorderOption::Default => RegexReorder::new(DEFAULT_REGEX_ORDERING).map(Some),
            ReorderOption::Custom(slots) => RegexReorder::new(slots).map(Some),
        }
    }
}

impl<T: TestItem> CollectionHook<T> for OptionReorderHook {
    fn collection_modify_items(
        &self,
        _: &Session,
        config: &Config,
        items: &mut [T],
    ) -> Result<(), ReorderError> {
        let reorder = Self::requested(config)?;
        if reorder.is_none() {
            tracing::debug!("reordering not requested");
        }
        reorder.reorder(items);
        Ok(())
    }
}

type BoxedHook<'h, T> = Box<dyn CollectionHook<T> + 'h>;

/// The hooks a host calls for its collected tests, in registration order.
pub struct PluginRegistry<'h, T> {
    hooks: Vec<(Cow<'static, str>, BoxedHook<'h, T>)>,
}

impl<T> Default for PluginRegistry<'_, T> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<T> fmt::Debug for PluginRegistry<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|(name, _)| name))
            .finish()
    }
}

impl<'h, T> PluginRegistry<'h, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        hook: impl CollectionHook<T> + 'h,
    ) -> &mut Self {
        let name = name.into();
        tracing::debug!(%name, "registered collection hook");
        self.hooks.push((name, Box::new(hook) as BoxedHook<'h, T>));
        self
    }

    pub fn with_hook(
        mut self,
        name: impl Into<Cow<'static, str>>,
        hook: impl CollectionHook<T> + 'h,
    ) -> Self {
        self.register(name, hook);
        self
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.hooks.iter().map(|(name, _)| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Call every hook with the collected tests, stopping at the first error.
    pub fn collection_modify_items(
        &self,
        session: &Session,
        config: &Config,
        items: &mut [T],
    ) -> Result<(), ReorderError> {
        for (name, hook) in &self.hooks {
            let _span = tracing::debug_span!("collection_modify_items", hook = %name).entered();
            hook.collection_modify_items(session, config, items)?;
        }
        Ok(())
    }
}

/// Install the option-driven hook under the name `reorder`.
pub fn register<T: TestItem>(registry: &mut PluginRegistry<'_, T>) {
    registry.register("reorder", OptionReorderHook::new());
}
