//! Name -> stepper factory lookup, so a caller (or a config file) can select
//! an integration method by string rather than by type.

use std::collections::HashMap;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::BallisticsError;
use crate::stepper::{EulerStepper, Rk4Stepper, Stepper, VerletStepper};

type StepperFactory = fn() -> Box<dyn Stepper>;

/// Maps engine names to stepper constructors. Built-in entries cover the
/// three steppers this crate ships; a caller can register more.
pub struct EngineRegistry {
    factories: HashMap<String, StepperFactory>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        let mut factories: HashMap<String, StepperFactory> = HashMap::new();
        factories.insert("euler".to_string(), euler_stepper as StepperFactory);
        factories.insert("rk4".to_string(), rk4_stepper as StepperFactory);
        factories.insert("verlet".to_string(), verlet_stepper as StepperFactory);
        Self { factories }
    }

    pub fn register(&mut self, name: impl Into<String>, factory: StepperFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn build(&self, name: &str, config: Config) -> Result<Engine, BallisticsError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| BallisticsError::UnknownEngine { name: name.to_string() })?;
        Ok(Engine::new(factory(), config))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn euler_stepper() -> Box<dyn Stepper> {
    Box::new(EulerStepper)
}

fn rk4_stepper() -> Box<dyn Stepper> {
    Box::new(Rk4Stepper)
}

fn verlet_stepper() -> Box<dyn Stepper> {
    Box::new(VerletStepper)
}
