//! Handler results.

use serde::Serialize;
use serde_json::{Map, Value};

const REDIRECT_PREFIX: &str = "redirect:";

/// A named view plus the model it should be rendered with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAndView {
    view: String,
    model: Map<String, Value>,
}

impl ModelAndView {
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            model: Map::new(),
        }
    }

    /// View that sends the client to `location`.
    pub fn redirect(location: &str) -> Self {
        Self::new(format!("{REDIRECT_PREFIX}{location}"))
    }

    /// Add a model attribute, replacing any previous value under `name`.
    pub fn add_object(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.model.insert(name.into(), value.into());
        self
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn model(&self) -> &Map<String, Value> {
        &self.model
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.model.get(name)
    }

    /// Redirect target when the view is `redirect:<location>`.
    pub fn redirect_location(&self) -> Option<&str> {
        self.view.strip_prefix(REDIRECT_PREFIX)
    }
}
