//! View construction.

use super::{ViewManager, ViewRef};
use crate::error::{BuildError, BuildResult};
use crate::model::ModelRef;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Boxed future for view construction. Views are `Rc`-based, so no `Send` bound.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Context handed to a view constructor.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Manager the new view belongs to.
    pub owner: Rc<ViewManager>,
    /// View the new view is nested in.
    pub parent: Option<ViewRef>,
}

/// Something that can turn a model into a view.
///
/// Constructors may build sub-views through `options.owner` and must await
/// them before resolving, so a view is only returned once its subtree exists.
pub trait ViewFactory {
    /// Build a view for `model`.
    fn build(&self, model: ModelRef, options: BuildOptions) -> BoxFuture<'_, BuildResult<ViewRef>>;
}

type Constructor = Rc<dyn Fn(ModelRef, BuildOptions) -> BoxFuture<'static, BuildResult<ViewRef>>>;

/// A [`ViewFactory`] dispatching on the model's type name.
#[derive(Default)]
pub struct ViewRegistry {
    constructors: HashMap<&'static str, Constructor>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor used for models whose type is `type_name`.
    /// Replaces any previous constructor for that type.
    pub fn register<F, Fut>(&mut self, type_name: &'static str, constructor: F)
    where
        F: Fn(ModelRef, BuildOptions) -> Fut + 'static,
        Fut: Future<Output = BuildResult<ViewRef>> + 'static,
    {
        let constructor: Constructor = Rc::new(move |model: ModelRef, options: BuildOptions| {
            Box::pin(constructor(model, options)) as BoxFuture<'static, BuildResult<ViewRef>>
        });
        self.constructors.insert(type_name, constructor);
    }

    /// Check whether a constructor is registered for `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }
}

impl ViewFactory for ViewRegistry {
    fn build(&self, model: ModelRef, options: BuildOptions) -> BoxFuture<'_, BuildResult<ViewRef>> {
        match self.constructors.get(model.type_name()) {
            Some(constructor) => {
                log::debug!("Building view for {}", model);
                constructor(model, options)
            }
            None => {
                log::warn!("No view registered for model type {}", model.type_name());
                let error = BuildError::UnknownModel(model.to_string());
                Box::pin(async move { Err(error) })
            }
        }
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.constructors.keys().collect();
        types.sort();
        f.debug_struct("ViewRegistry").field("types", &types).finish()
    }
}
